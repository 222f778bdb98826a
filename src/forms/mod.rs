//! Input structs deserialised from the presentation layer and validated into
//! typed payloads.

use std::collections::BTreeMap;
use std::fmt::{Display, Formatter};

use serde::Serialize;
use validator::ValidationErrors;

pub mod articles;
pub mod categories;
pub mod ideas;
pub mod reactions;

/// Validation messages keyed by form field, in field order.
///
/// Nested sub-forms use `<prefix>-<index>-<field>` keys, e.g.
/// `translations-0-title`.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(transparent)]
pub struct FieldErrors(BTreeMap<String, Vec<String>>);

impl FieldErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.0.entry(field.into()).or_default().push(message.into());
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, field: &str) -> bool {
        self.0.contains_key(field)
    }

    pub fn get(&self, field: &str) -> Option<&[String]> {
        self.0.get(field).map(Vec::as_slice)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.0.keys().map(String::as_str)
    }

    /// Records `result`'s error under `field` unless the field is already
    /// flagged, and returns the value on success.
    pub(crate) fn check<T, E: Display>(&mut self, field: &str, result: Result<T, E>) -> Option<T> {
        match result {
            Ok(value) => Some(value),
            Err(e) => {
                if !self.contains(field) {
                    self.add(field, e.to_string());
                }
                None
            }
        }
    }

    /// Copies `validator` field errors, prefixing every field name.
    pub(crate) fn extend_validation(&mut self, prefix: &str, errors: &ValidationErrors) {
        for (field, field_errors) in errors.field_errors() {
            let key = format!("{prefix}{field}");
            for error in field_errors.iter() {
                let message = match &error.message {
                    Some(message) => message.to_string(),
                    None => format!("{field} is invalid ({})", error.code),
                };
                self.add(key.clone(), message);
            }
        }
    }

    /// `Ok(())` when nothing was recorded.
    pub(crate) fn into_result(self) -> Result<(), FieldErrors> {
        if self.is_empty() { Ok(()) } else { Err(self) }
    }
}

impl Display for FieldErrors {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        let mut first = true;
        for (field, messages) in &self.0 {
            for message in messages {
                if !first {
                    write!(f, "; ")?;
                }
                write!(f, "{field}: {message}")?;
                first = false;
            }
        }
        Ok(())
    }
}

impl std::error::Error for FieldErrors {}

impl From<ValidationErrors> for FieldErrors {
    fn from(value: ValidationErrors) -> Self {
        let mut errors = Self::new();
        errors.extend_validation("", &value);
        errors
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn check_keeps_first_message_per_field() {
        let mut errors = FieldErrors::new();
        let value: Option<i32> = errors.check("rating", Err::<i32, _>("out of range"));
        assert!(value.is_none());
        errors.check("rating", Err::<i32, _>("second"));
        assert_eq!(errors.get("rating"), Some(&["out of range".to_string()][..]));
        assert_eq!(errors.check("title", Ok::<_, String>(1)), Some(1));
        assert!(!errors.contains("title"));
    }

    #[test]
    fn displays_fields_in_order() {
        let mut errors = FieldErrors::new();
        errors.add("title", "title cannot be empty");
        errors.add("content", "content cannot be empty");
        assert_eq!(
            errors.to_string(),
            "content: content cannot be empty; title: title cannot be empty"
        );
        assert_eq!(errors.into_result().unwrap_err().fields().count(), 2);
    }
}
