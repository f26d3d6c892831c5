//! Field-level errors attached to a redisplayed form.

use std::collections::BTreeMap;

use serde::Serialize;
use validator::ValidationErrors;

/// A single error on a form field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FieldError {
    /// Machine-readable code, e.g. `required` or `notFound`.
    pub code: String,
    /// Human-readable message shown next to the field.
    pub message: String,
}

/// Errors keyed by field name. Serializes as `{ field: [{code, message}] }`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<FieldError>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record an error against `field`.
    pub fn reject(&mut self, field: &str, code: &str, message: &str) {
        self.0.entry(field.to_string()).or_default().push(FieldError {
            code: code.to_string(),
            message: message.to_string(),
        });
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn field(&self, field: &str) -> &[FieldError] {
        self.0.get(field).map(Vec::as_slice).unwrap_or_default()
    }

    /// Total number of errors across all fields.
    pub fn error_count(&self) -> usize {
        self.0.values().map(Vec::len).sum()
    }
}

impl From<ValidationErrors> for FieldErrors {
    fn from(errors: ValidationErrors) -> Self {
        let mut out = FieldErrors::new();
        for (field, field_errors) in errors.field_errors() {
            for error in field_errors {
                let message = error
                    .message
                    .as_ref()
                    .map(|m| m.to_string())
                    .unwrap_or_else(|| error.code.to_string());
                out.reject(&field.to_string(), &error.code, &message);
            }
        }
        out
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use validator::ValidationError;

    #[test]
    fn reject_accumulates_per_field() {
        let mut errors = FieldErrors::new();
        errors.reject("telephone", "required", "must not be empty");
        errors.reject("telephone", "telephone", "bad digits");
        errors.reject("city", "required", "must not be empty");

        assert_eq!(errors.error_count(), 3);
        assert_eq!(errors.field("telephone").len(), 2);
        assert_eq!(errors.field("city").len(), 1);
        assert!(errors.field("address").is_empty());
    }

    #[test]
    fn serializes_as_field_map() {
        let mut errors = FieldErrors::new();
        errors.reject("first_name", "notFound", "not found");

        let json = serde_json::to_value(&errors).unwrap();
        assert_eq!(json["first_name"][0]["code"], "notFound");
        assert_eq!(json["first_name"][0]["message"], "not found");
    }

    #[test]
    fn converts_validator_errors() {
        let mut source = ValidationErrors::new();
        let mut with_message = ValidationError::new("required");
        with_message.message = Some("must not be empty".into());
        source.add("city", with_message);
        source.add("telephone", ValidationError::new("telephone"));

        let errors = FieldErrors::from(source);
        assert_eq!(errors.field("city")[0].message, "must not be empty");
        // Falls back to the code when no message was configured.
        assert_eq!(errors.field("telephone")[0].message, "telephone");
    }
}
