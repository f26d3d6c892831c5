//! Handlers for the `/owners` pages.
//!
//! Form submissions are bound through [`OwnerForm::binder`], so an `id`
//! field in the payload is dropped before it can reach an [`Owner`]. The
//! identity of an edited owner always comes from the URL path.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Form;
use petclinic_core::error::CoreError;
use petclinic_core::field_errors::FieldErrors;
use petclinic_core::search::{normalize_filter, SearchOutcome};
use petclinic_core::types::DbId;
use petclinic_db::models::owner::{Owner, OwnerForm};
use validator::Validate;

use crate::error::{AppError, AppResult};
use crate::query::{FindOwnersParams, QueryPairs};
use crate::response::{redirect_to_owner, views, OwnerModel, SelectionsModel, ViewResponse};
use crate::state::AppState;

/// Raw `application/x-www-form-urlencoded` pairs, in submission order.
type FormFields = Vec<(String, String)>;

fn owner_not_found(id: DbId) -> AppError {
    AppError::Core(CoreError::NotFound { entity: "Owner", id })
}

/// Bind submitted fields onto an owner form and validate it.
fn bind_owner_form(fields: FormFields) -> (OwnerForm, FieldErrors) {
    let bound = OwnerForm::binder().bind(fields);
    if !bound.rejected().is_empty() {
        tracing::warn!(fields = ?bound.rejected(), "Ignored disallowed owner form fields");
    }
    let form = OwnerForm::from_bound(&bound);
    let errors = match form.validate() {
        Ok(()) => FieldErrors::new(),
        Err(errors) => FieldErrors::from(errors),
    };
    (form, errors)
}

fn owner_form_view(owner: Owner) -> ViewResponse<OwnerModel> {
    ViewResponse::new(views::OWNER_CREATE_OR_UPDATE_FORM, OwnerModel { owner })
}

// ---------------------------------------------------------------------------
// Creation
// ---------------------------------------------------------------------------

/// GET /owners/new
pub async fn init_creation_form() -> ViewResponse<OwnerModel> {
    owner_form_view(Owner::default())
}

/// POST /owners/new
///
/// Invalid input redisplays the form with field errors. A valid owner is
/// saved and the client is redirected to its detail page.
pub async fn process_creation_form(
    State(state): State<AppState>,
    Form(fields): Form<FormFields>,
) -> AppResult<Response> {
    let (form, errors) = bind_owner_form(fields);
    if !errors.is_empty() {
        tracing::debug!(errors = errors.error_count(), "Owner creation form rejected");
        return Ok(owner_form_view(form.into_owner(None))
            .with_errors(errors)
            .into_response());
    }

    let saved = state.owners.save(&form.into_owner(None)).await?;
    let id = saved
        .id
        .ok_or_else(|| CoreError::Internal("saved owner has no id".into()))?;

    tracing::info!(owner_id = id, "Owner created");
    Ok(redirect_to_owner(id).into_response())
}

// ---------------------------------------------------------------------------
// Search
// ---------------------------------------------------------------------------

/// GET /owners/find
pub async fn init_find_form() -> ViewResponse<OwnerModel> {
    ViewResponse::new(
        views::FIND_OWNERS,
        OwnerModel {
            owner: Owner::default(),
        },
    )
}

/// GET /owners?first_name=
///
/// A missing or empty filter lists every owner; any other filter is used
/// as submitted. Zero matches redisplay the
/// search form with a `notFound` error on `first_name`; one match redirects
/// to that owner; several render the selection list.
pub async fn process_find_form(
    State(state): State<AppState>,
    Query(pairs): Query<QueryPairs>,
) -> AppResult<Response> {
    let params = FindOwnersParams::from_pairs(pairs);
    let first_name = normalize_filter(params.first_name.as_deref());
    let results = state.owners.find_by_first_name(&first_name).await?;
    tracing::debug!(filter = %first_name, matches = results.len(), "Owner search");

    let response = match SearchOutcome::classify(results) {
        SearchOutcome::NotFound => {
            let mut errors = FieldErrors::new();
            errors.reject("first_name", "notFound", "not found");
            let owner = Owner {
                first_name,
                ..Owner::default()
            };
            ViewResponse::new(views::FIND_OWNERS, OwnerModel { owner })
                .with_errors(errors)
                .into_response()
        }
        SearchOutcome::Single(owner) => {
            let id = owner
                .id
                .ok_or_else(|| CoreError::Internal("stored owner has no id".into()))?;
            redirect_to_owner(id).into_response()
        }
        SearchOutcome::Multiple(selections) => {
            ViewResponse::new(views::OWNERS_LIST, SelectionsModel { selections }).into_response()
        }
    };
    Ok(response)
}

// ---------------------------------------------------------------------------
// Editing
// ---------------------------------------------------------------------------

/// GET /owners/{owner_id}/edit
pub async fn init_update_form(
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<ViewResponse<OwnerModel>> {
    let owner = state
        .owners
        .find_by_id(owner_id)
        .await?
        .ok_or_else(|| owner_not_found(owner_id))?;
    Ok(owner_form_view(owner))
}

/// POST /owners/{owner_id}/edit
///
/// The saved identity is `owner_id` from the path, whatever the payload says.
pub async fn process_update_form(
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
    Form(fields): Form<FormFields>,
) -> AppResult<Response> {
    let (form, errors) = bind_owner_form(fields);
    if !errors.is_empty() {
        tracing::debug!(owner_id, errors = errors.error_count(), "Owner update form rejected");
        return Ok(owner_form_view(form.into_owner(Some(owner_id)))
            .with_errors(errors)
            .into_response());
    }

    state
        .owners
        .save(&form.into_owner(Some(owner_id)))
        .await
        .map_err(|err| match err {
            sqlx::Error::RowNotFound => owner_not_found(owner_id),
            other => AppError::Database(other),
        })?;

    tracing::info!(owner_id, "Owner updated");
    Ok(redirect_to_owner(owner_id).into_response())
}

// ---------------------------------------------------------------------------
// Details
// ---------------------------------------------------------------------------

/// GET /owners/{owner_id}
///
/// Renders the owner with every pet's visit history attached.
pub async fn show_owner(
    State(state): State<AppState>,
    Path(owner_id): Path<DbId>,
) -> AppResult<ViewResponse<OwnerModel>> {
    let mut owner = state
        .owners
        .find_by_id(owner_id)
        .await?
        .ok_or_else(|| owner_not_found(owner_id))?;

    for pet in &mut owner.pets {
        pet.visits = state.visits.find_by_pet_id(pet.id).await?;
    }

    Ok(ViewResponse::new(views::OWNER_DETAILS, OwnerModel { owner }))
}
