use std::sync::Arc;

use petclinic_db::memory::InMemoryClinic;
use petclinic_db::repositories::{OwnerRepo, OwnerRepository, VisitRepo, VisitRepository};
use petclinic_db::DbPool;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Owner data access.
    pub owners: Arc<dyn OwnerRepository>,
    /// Visit data access.
    pub visits: Arc<dyn VisitRepository>,
    /// Database connection pool; `None` when running on the in-memory store.
    pub pool: Option<DbPool>,
    /// Server configuration.
    pub config: Arc<ServerConfig>,
}

impl AppState {
    /// State backed by PostgreSQL repositories sharing one pool.
    pub fn postgres(pool: DbPool, config: ServerConfig) -> Self {
        Self {
            owners: Arc::new(OwnerRepo::new(pool.clone())),
            visits: Arc::new(VisitRepo::new(pool.clone())),
            pool: Some(pool),
            config: Arc::new(config),
        }
    }

    /// State backed by a single in-memory store serving both repositories.
    pub fn in_memory(store: Arc<InMemoryClinic>, config: ServerConfig) -> Self {
        Self {
            owners: store.clone(),
            visits: store,
            pool: None,
            config: Arc::new(config),
        }
    }
}
