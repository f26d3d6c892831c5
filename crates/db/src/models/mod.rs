//! Domain model structs and DTOs.
//!
//! Each submodule contains a `FromRow` + `Serialize` entity struct matching
//! the database row, plus the input types used to create it.

pub mod owner;
pub mod pet;
pub mod visit;
