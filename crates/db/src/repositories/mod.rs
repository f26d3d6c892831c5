//! Data-access collaborators consumed by the HTTP layer.
//!
//! Handlers only see the [`OwnerRepository`] and [`VisitRepository`] traits;
//! the concrete store is chosen at startup (PostgreSQL, or the in-memory
//! store from [`crate::memory`]).

pub mod owner_repo;
pub mod visit_repo;

use async_trait::async_trait;
use petclinic_core::types::DbId;

use crate::models::owner::Owner;
use crate::models::visit::Visit;

pub use owner_repo::OwnerRepo;
pub use visit_repo::VisitRepo;

#[async_trait]
pub trait OwnerRepository: Send + Sync {
    /// Load an owner together with its pets.
    async fn find_by_id(&self, id: DbId) -> Result<Option<Owner>, sqlx::Error>;

    /// Owners whose first name starts with `first_name` (case-sensitive),
    /// each with its pets. The empty string matches every owner.
    async fn find_by_first_name(&self, first_name: &str) -> Result<Vec<Owner>, sqlx::Error>;

    /// Insert a new owner or update an existing one's contact fields.
    ///
    /// Returns the stored owner (with its pets). Updating an id that does
    /// not exist fails with [`sqlx::Error::RowNotFound`].
    async fn save(&self, owner: &Owner) -> Result<Owner, sqlx::Error>;
}

#[async_trait]
pub trait VisitRepository: Send + Sync {
    /// Visits for one pet, oldest first.
    async fn find_by_pet_id(&self, pet_id: DbId) -> Result<Vec<Visit>, sqlx::Error>;
}
