//! Validation results
//!
//! Derived from form state on every change; never stored as the source of
//! truth.

use serde::Serialize;
use std::collections::BTreeMap;

/// Which rule family produced an error
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorKind {
    /// Single field fails its own rule
    Field,
    /// Relationship between fields fails
    CrossField,
    /// Backend rejected the value of this field
    Submission,
}

#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
pub struct FieldError {
    pub kind: ErrorKind,
    pub message: String,
}

#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize)]
pub struct ValidationResult {
    field_errors: BTreeMap<String, FieldError>,
}

impl ValidationResult {
    pub fn valid() -> Self {
        Self::default()
    }

    pub fn is_valid(&self) -> bool {
        self.field_errors.is_empty()
    }

    /// Attach an error to `field` unless an earlier rule already did. Rules
    /// run in a fixed order, so the first message per field wins.
    pub fn reject(&mut self, field: impl Into<String>, kind: ErrorKind, message: impl Into<String>) {
        self.field_errors
            .entry(field.into())
            .or_insert_with(|| FieldError { kind, message: message.into() });
    }

    pub fn has_error(&self, field: &str) -> bool {
        self.field_errors.contains_key(field)
    }

    pub fn error(&self, field: &str) -> Option<&FieldError> {
        self.field_errors.get(field)
    }

    pub fn message(&self, field: &str) -> Option<&str> {
        self.error(field).map(|e| e.message.as_str())
    }

    pub fn errors(&self) -> impl Iterator<Item = (&str, &FieldError)> {
        self.field_errors.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.field_errors.len()
    }

    pub fn is_empty(&self) -> bool {
        self.field_errors.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_first_error_wins() {
        let mut result = ValidationResult::valid();
        result.reject("minAmount", ErrorKind::Field, "first");
        result.reject("minAmount", ErrorKind::CrossField, "second");
        assert_eq!(result.len(), 1);
        assert_eq!(result.message("minAmount"), Some("first"));
        assert_eq!(result.error("minAmount").unwrap().kind, ErrorKind::Field);
    }

    #[test]
    fn test_valid_when_empty() {
        let result = ValidationResult::valid();
        assert!(result.is_valid());
        assert_eq!(result.message("anything"), None);
    }
}
