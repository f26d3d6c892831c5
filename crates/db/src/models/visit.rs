//! Visit entity model.

use chrono::NaiveDate;
use petclinic_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;

/// A visit row from the `visits` table.
#[derive(Debug, Clone, PartialEq, FromRow, Serialize)]
pub struct Visit {
    pub id: DbId,
    pub pet_id: DbId,
    pub visit_date: NaiveDate,
    pub description: String,
}

/// Input for recording a visit.
#[derive(Debug, Clone)]
pub struct NewVisit {
    pub pet_id: DbId,
    pub visit_date: NaiveDate,
    pub description: String,
}
