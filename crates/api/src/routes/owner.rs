//! Route definitions for the owner pages.

use axum::routing::get;
use axum::Router;

use crate::handlers::owner;
use crate::state::AppState;

/// Owner routes, mounted at the root.
///
/// ```text
/// GET    /owners/new                 -> init_creation_form
/// POST   /owners/new                 -> process_creation_form
/// GET    /owners/find                -> init_find_form
/// GET    /owners                     -> process_find_form
/// GET    /owners/{owner_id}/edit     -> init_update_form
/// POST   /owners/{owner_id}/edit     -> process_update_form
/// GET    /owners/{owner_id}          -> show_owner
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route(
            "/owners/new",
            get(owner::init_creation_form).post(owner::process_creation_form),
        )
        .route("/owners/find", get(owner::init_find_form))
        .route("/owners", get(owner::process_find_form))
        .route(
            "/owners/{owner_id}/edit",
            get(owner::init_update_form).post(owner::process_update_form),
        )
        .route("/owners/{owner_id}", get(owner::show_owner))
}
