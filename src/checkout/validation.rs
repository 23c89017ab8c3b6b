//! Field validation

use std::fmt;

use smallvec::SmallVec;
use thiserror::Error;

/// A single field that failed validation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldError {
    /// Name of the offending field
    pub field: &'static str,

    /// Message to show next to the field
    pub message: &'static str,
}

impl fmt::Display for FieldError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

/// Every field that failed validation on a form.
#[derive(Debug, Clone, Default, PartialEq, Eq, Error)]
#[error("{} field(s) failed validation", .errors.len())]
pub struct ValidationErrors {
    errors: SmallVec<[FieldError; 8]>,
}

impl ValidationErrors {
    /// Message for the given field, if it failed.
    pub fn get(&self, field: &str) -> Option<&'static str> {
        self.errors
            .iter()
            .find(|error| error.field == field)
            .map(|error| error.message)
    }

    /// Failed fields in form order.
    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    /// Number of failed fields.
    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Whether every field passed.
    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }
}

impl<'a> IntoIterator for &'a ValidationErrors {
    type Item = &'a FieldError;
    type IntoIter = std::slice::Iter<'a, FieldError>;

    fn into_iter(self) -> Self::IntoIter {
        self.errors.iter()
    }
}

/// Collects field errors for one form.
#[derive(Debug, Default)]
pub(crate) struct Validator {
    errors: ValidationErrors,
}

impl Validator {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    /// Require `value` to have at least `min` characters once trimmed.
    pub(crate) fn min_len(
        &mut self,
        field: &'static str,
        value: &str,
        min: usize,
        message: &'static str,
    ) -> &mut Self {
        if value.trim().chars().count() < min {
            self.errors.errors.push(FieldError { field, message });
        }

        self
    }

    pub(crate) fn finish(&mut self) -> Result<(), ValidationErrors> {
        let errors = std::mem::take(&mut self.errors);

        if errors.is_empty() {
            Ok(())
        } else {
            Err(errors)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lengths_are_counted_on_trimmed_characters() {
        let mut validator = Validator::new();

        validator
            .min_len("name", "  é  ", 2, "too short")
            .min_len("city", "Oslo", 2, "too short")
            .min_len("state", "ÅÅ", 2, "too short");

        let errors = validator.finish().err().unwrap_or_default();

        assert_eq!(errors.len(), 1);
        assert_eq!(errors.get("name"), Some("too short"));
        assert_eq!(errors.get("city"), None);
    }

    #[test]
    fn finish_without_failures_is_ok() {
        let mut validator = Validator::new();

        validator.min_len("name", "Ada", 2, "too short");

        assert_eq!(validator.finish(), Ok(()));
    }

    #[test]
    fn display_counts_failed_fields() {
        let mut validator = Validator::new();

        validator
            .min_len("a", "", 1, "required")
            .min_len("b", "", 1, "required");

        let errors = validator.finish().err().unwrap_or_default();

        assert_eq!(errors.to_string(), "2 field(s) failed validation");
        assert_eq!(
            errors.iter().map(ToString::to_string).collect::<Vec<_>>(),
            vec!["a: required", "b: required"]
        );
    }
}
