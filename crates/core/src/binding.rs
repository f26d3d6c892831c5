//! Request-payload field binding with a deny-list.
//!
//! Submitted forms arrive as flat `name=value` pairs. Before any of them are
//! mapped onto an entity, [`DataBinder::bind`] strips every field the entity
//! must not accept from the client (most importantly its identity).
//! Field names are compared case-insensitively.

use std::collections::HashMap;

/// Result of binding a submitted payload.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BoundFields {
    values: HashMap<String, String>,
    rejected: Vec<String>,
}

impl BoundFields {
    /// Value of an accepted field, if it was submitted.
    pub fn get(&self, field: &str) -> Option<&str> {
        self.values.get(field).map(String::as_str)
    }

    /// Value of an accepted field, or the empty string when absent.
    pub fn get_or_empty(&self, field: &str) -> String {
        self.get(field).unwrap_or_default().to_string()
    }

    /// Names of submitted fields that matched the deny-list, in submission order.
    pub fn rejected(&self) -> &[String] {
        &self.rejected
    }
}

/// Filters submitted fields against a list of disallowed field names.
#[derive(Debug, Clone, Default)]
pub struct DataBinder {
    disallowed: Vec<String>,
}

impl DataBinder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a disallowed field name.
    pub fn disallow(mut self, field: &str) -> Self {
        self.disallowed.push(field.to_string());
        self
    }

    /// Whether `field` may be bound.
    pub fn is_allowed(&self, field: &str) -> bool {
        !self
            .disallowed
            .iter()
            .any(|name| name.eq_ignore_ascii_case(field))
    }

    /// Bind submitted pairs, dropping disallowed fields.
    ///
    /// When a field is submitted more than once the first value wins.
    pub fn bind<I, K, V>(&self, pairs: I) -> BoundFields
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let mut bound = BoundFields::default();
        for (name, value) in pairs {
            let name = name.into();
            if !self.is_allowed(&name) {
                bound.rejected.push(name);
                continue;
            }
            bound.values.entry(name).or_insert_with(|| value.into());
        }
        bound
    }
}
