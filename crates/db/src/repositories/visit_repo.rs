//! Repository for the `visits` table.

use async_trait::async_trait;
use petclinic_core::types::DbId;
use sqlx::PgPool;

use crate::models::visit::Visit;
use crate::repositories::VisitRepository;

const COLUMNS: &str = "id, pet_id, visit_date, description";

/// PostgreSQL-backed visit repository. Read-only.
#[derive(Clone)]
pub struct VisitRepo {
    pool: PgPool,
}

impl VisitRepo {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl VisitRepository for VisitRepo {
    async fn find_by_pet_id(&self, pet_id: DbId) -> Result<Vec<Visit>, sqlx::Error> {
        let query = format!(
            "SELECT {COLUMNS} FROM visits
             WHERE pet_id = $1
             ORDER BY visit_date ASC, id ASC"
        );
        sqlx::query_as::<_, Visit>(&query)
            .bind(pet_id)
            .fetch_all(&self.pool)
            .await
    }
}
