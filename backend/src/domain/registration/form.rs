//! Raw, unvalidated form submissions.

use std::collections::BTreeMap;

use super::FieldName;

/// Field name to one-or-many submitted values.
///
/// Values are kept exactly as received; repeated keys accumulate in order so
/// multi-select inputs such as `language` survive intact.
///
/// # Examples
/// ```
/// use signup::domain::{FieldName, SubmittedForm};
///
/// let form = SubmittedForm::from_urlencoded(b"language=Go&language=C%2B%2B&bio=hi+there");
/// assert_eq!(form.all(FieldName::Language), ["Go", "C++"]);
/// assert_eq!(form.first(FieldName::Bio), Some("hi there"));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubmittedForm {
    values: BTreeMap<String, Vec<String>>,
}

impl SubmittedForm {
    /// Create an empty submission.
    pub fn new() -> Self {
        Self::default()
    }

    /// Decode an `application/x-www-form-urlencoded` body.
    pub fn from_urlencoded(body: &[u8]) -> Self {
        url::form_urlencoded::parse(body)
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }

    /// Append one value under `field`.
    pub fn push(&mut self, field: impl Into<String>, value: impl Into<String>) {
        self.values
            .entry(field.into())
            .or_default()
            .push(value.into());
    }

    /// Builder-style variant of [`SubmittedForm::push`].
    #[must_use]
    pub fn with(mut self, field: FieldName, value: impl Into<String>) -> Self {
        self.push(field.as_str(), value);
        self
    }

    /// Replace every value held under `field`.
    pub fn set_all(&mut self, field: FieldName, values: Vec<String>) {
        self.values.insert(field.as_str().to_owned(), values);
    }

    /// First submitted value, if the field was present at all.
    pub fn first(&self, field: FieldName) -> Option<&str> {
        self.values
            .get(field.as_str())
            .and_then(|values| values.first())
            .map(String::as_str)
    }

    /// First submitted value or the empty string.
    pub fn first_or_empty(&self, field: FieldName) -> &str {
        self.first(field).unwrap_or_default()
    }

    /// All submitted values for `field`; empty when absent.
    pub fn all(&self, field: FieldName) -> &[String] {
        self.values
            .get(field.as_str())
            .map(Vec::as_slice)
            .unwrap_or_default()
    }

    /// Whether `field` was submitted with at least one value.
    pub fn contains(&self, field: FieldName) -> bool {
        !self.all(field).is_empty()
    }
}

impl<K, V> FromIterator<(K, V)> for SubmittedForm
where
    K: Into<String>,
    V: Into<String>,
{
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut form = Self::new();
        for (key, value) in iter {
            form.push(key, value);
        }
        form
    }
}
