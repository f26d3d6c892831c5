//! Rendered view documents.
//!
//! HTML templating lives outside this service. Every page handler that does
//! not redirect answers with a [`ViewResponse`]: the name of the view to
//! render, the model it renders, and any field errors to show on a form.
//!
//! ```json
//! { "view": "owners/findOwners", "model": { "owner": { ... } },
//!   "errors": { "first_name": [{ "code": "notFound", "message": "not found" }] } }
//! ```

use axum::response::{IntoResponse, Redirect, Response};
use axum::Json;
use petclinic_core::field_errors::FieldErrors;
use petclinic_core::types::DbId;
use petclinic_db::models::owner::Owner;
use serde::Serialize;

/// View names understood by the template layer.
pub mod views {
    pub const OWNER_CREATE_OR_UPDATE_FORM: &str = "owners/createOrUpdateOwnerForm";
    pub const FIND_OWNERS: &str = "owners/findOwners";
    pub const OWNERS_LIST: &str = "owners/ownersList";
    pub const OWNER_DETAILS: &str = "owners/ownerDetails";
}

/// A view name plus its model and form errors.
#[derive(Debug, Serialize)]
pub struct ViewResponse<T: Serialize> {
    pub view: &'static str,
    pub model: T,
    #[serde(skip_serializing_if = "FieldErrors::is_empty")]
    pub errors: FieldErrors,
}

impl<T: Serialize> ViewResponse<T> {
    pub fn new(view: &'static str, model: T) -> Self {
        Self {
            view,
            model,
            errors: FieldErrors::new(),
        }
    }

    pub fn with_errors(mut self, errors: FieldErrors) -> Self {
        self.errors = errors;
        self
    }
}

impl<T: Serialize> IntoResponse for ViewResponse<T> {
    fn into_response(self) -> Response {
        Json(self).into_response()
    }
}

/// Model for views that show a single owner (forms and details).
#[derive(Debug, Serialize)]
pub struct OwnerModel {
    pub owner: Owner,
}

/// Model for the owner disambiguation list.
#[derive(Debug, Serialize)]
pub struct SelectionsModel {
    pub selections: Vec<Owner>,
}

/// `303 See Other` to an owner's detail page.
pub fn redirect_to_owner(id: DbId) -> Redirect {
    Redirect::to(&format!("/owners/{id}"))
}
