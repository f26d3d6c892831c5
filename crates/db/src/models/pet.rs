//! Pet entity model.

use chrono::NaiveDate;
use petclinic_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

use crate::models::visit::Visit;

/// A pet row joined with its type name.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Pet {
    pub id: DbId,
    pub owner_id: DbId,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    /// Name from the `pet_types` table, e.g. `cat`.
    pub pet_type: String,
    /// Only populated for the owner detail view.
    #[sqlx(skip)]
    pub visits: Vec<Visit>,
}

/// Input for registering a pet under an owner.
#[derive(Debug, Clone)]
pub struct NewPet {
    pub owner_id: DbId,
    pub name: String,
    pub birth_date: Option<NaiveDate>,
    pub pet_type: String,
}
