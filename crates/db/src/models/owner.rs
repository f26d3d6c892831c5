//! Owner entity model and form DTO.

use petclinic_core::binding::{BoundFields, DataBinder};
use petclinic_core::types::DbId;
use serde::Serialize;
use sqlx::FromRow;
use validator::{Validate, ValidationError};

use crate::models::pet::Pet;

/// An owner row from the `owners` table, with its pets attached.
///
/// `id` is `None` until the owner has been saved.
#[derive(Debug, Clone, Default, PartialEq, FromRow, Serialize)]
pub struct Owner {
    pub id: Option<DbId>,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub city: String,
    pub telephone: String,
    /// Ordered by pet name.
    #[sqlx(skip)]
    pub pets: Vec<Pet>,
}

impl Owner {
    /// True until the owner has been persisted.
    pub fn is_new(&self) -> bool {
        self.id.is_none()
    }
}

/// Client-editable owner fields, as submitted by the create and edit forms.
///
/// The identity is not a form field; see [`OwnerForm::binder`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Validate)]
pub struct OwnerForm {
    #[validate(custom(function = "not_blank"))]
    pub first_name: String,
    #[validate(custom(function = "not_blank"))]
    pub last_name: String,
    #[validate(custom(function = "not_blank"))]
    pub address: String,
    #[validate(custom(function = "not_blank"))]
    pub city: String,
    #[validate(custom(function = "telephone_digits"))]
    pub telephone: String,
}

impl OwnerForm {
    /// Binder for owner payloads. The identity is never client-assignable.
    pub fn binder() -> DataBinder {
        DataBinder::new().disallow("id")
    }

    /// Map bound fields onto a form. Missing fields become empty strings and
    /// are then reported by validation.
    pub fn from_bound(fields: &BoundFields) -> Self {
        Self {
            first_name: fields.get_or_empty("first_name"),
            last_name: fields.get_or_empty("last_name"),
            address: fields.get_or_empty("address"),
            city: fields.get_or_empty("city"),
            telephone: fields.get_or_empty("telephone"),
        }
    }

    /// Build an owner carrying these fields and the given identity.
    pub fn into_owner(self, id: Option<DbId>) -> Owner {
        Owner {
            id,
            first_name: self.first_name,
            last_name: self.last_name,
            address: self.address,
            city: self.city,
            telephone: self.telephone,
            pets: Vec::new(),
        }
    }
}

impl From<&Owner> for OwnerForm {
    fn from(owner: &Owner) -> Self {
        Self {
            first_name: owner.first_name.clone(),
            last_name: owner.last_name.clone(),
            address: owner.address.clone(),
            city: owner.city.clone(),
            telephone: owner.telephone.clone(),
        }
    }
}

const MAX_TELEPHONE_DIGITS: usize = 10;

fn not_blank(value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::new("required").with_message("must not be empty".into()));
    }
    Ok(())
}

fn telephone_digits(value: &str) -> Result<(), ValidationError> {
    not_blank(value)?;
    let all_digits = value.chars().all(|c| c.is_ascii_digit());
    if !all_digits || value.len() > MAX_TELEPHONE_DIGITS {
        return Err(ValidationError::new("telephone").with_message(
            "numeric value out of bounds (<10 digits>.<0 digits> expected)".into(),
        ));
    }
    Ok(())
}
