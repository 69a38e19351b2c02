//! Field-scoped validation results.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::FieldName;

/// Key used for failures that do not belong to a single field.
pub const SERVER_ERROR_KEY: &str = "server_error";

/// Field name to human-readable error message. Empty means valid.
///
/// Serialises as a flat JSON object so it can travel in a cookie.
///
/// # Examples
/// ```
/// use signup::domain::{FieldName, ValidationErrors};
///
/// let mut errors = ValidationErrors::new();
/// errors.insert(FieldName::Phone, "bad phone");
/// assert_eq!(errors.get(FieldName::Phone), Some("bad phone"));
/// assert_eq!(errors.to_json().as_deref().ok(), Some(r#"{"phone":"bad phone"}"#));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ValidationErrors(BTreeMap<String, String>);

impl ValidationErrors {
    /// Create an empty (valid) result.
    pub fn new() -> Self {
        Self::default()
    }

    /// A result carrying only a general, non-field failure.
    pub fn server_error(message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.0.insert(SERVER_ERROR_KEY.to_owned(), message.into());
        errors
    }

    /// Record `message` against `field`.
    pub fn insert(&mut self, field: FieldName, message: impl Into<String>) {
        self.0.insert(field.as_str().to_owned(), message.into());
    }

    /// `true` when no field and no general failure was recorded.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Number of recorded failures, general entry included.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Message recorded for `field`, if any.
    pub fn get(&self, field: FieldName) -> Option<&str> {
        self.0.get(field.as_str()).map(String::as_str)
    }

    /// Whether `field` was flagged.
    pub fn contains(&self, field: FieldName) -> bool {
        self.0.contains_key(field.as_str())
    }

    /// The general failure message, if one was recorded.
    pub fn general(&self) -> Option<&str> {
        self.0.get(SERVER_ERROR_KEY).map(String::as_str)
    }

    /// Per-field messages, skipping the general entry and unknown keys.
    pub fn field_errors(&self) -> impl Iterator<Item = (FieldName, &str)> {
        self.0
            .iter()
            .filter_map(|(key, message)| FieldName::from_wire(key).map(|f| (f, message.as_str())))
    }

    /// Names of every flagged key, general entry included.
    pub fn keys(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Serialise to the JSON object form.
    pub fn to_json(&self) -> serde_json::Result<String> {
        serde_json::to_string(self)
    }

    /// Parse the JSON object form.
    pub fn from_json(raw: &str) -> serde_json::Result<Self> {
        serde_json::from_str(raw)
    }
}
