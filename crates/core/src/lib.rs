//! Domain building blocks shared by the clinic's storage and HTTP layers.
//!
//! Nothing in here touches I/O: the binder, the field-error model and the
//! search classification are pure functions over plain values.

pub mod binding;
pub mod error;
pub mod field_errors;
pub mod search;
pub mod types;
