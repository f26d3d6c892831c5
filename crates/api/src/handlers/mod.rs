//! Request handlers.
//!
//! Handlers delegate to the repositories held in [`AppState`](crate::state::AppState)
//! and map store failures via [`AppError`](crate::error::AppError).

pub mod owner;
