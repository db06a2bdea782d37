// Field validation helpers shared by the domain records
// Collects every failed rule so clients see all problems at once

use once_cell::sync::Lazy;
use regex::Regex;

use super::errors::{DomainError, FieldError};

static HTTP_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://[^\s/$.?#][^\s]*$").expect("valid url regex"));

static GITHUB_URL: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^https?://(www\.)?github\.com/.*").expect("valid github regex"));

static HEX_COLOR: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#([A-Fa-f0-9]{6}|[A-Fa-f0-9]{3})$").expect("valid hex regex"));

static PERSON_NAME: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[a-zA-Z\s\-'.]+$").expect("valid name regex"));

/// Accumulates field errors for one record
///
/// # Example
/// ```
/// use portfolio_api::domain::validation::Validator;
///
/// let mut v = Validator::default();
/// v.length("name", "", 1, 100, "Name must be between 1 and 100 characters");
/// assert!(v.finish().is_err());
/// ```
#[derive(Debug, Default)]
pub struct Validator {
    errors: Vec<FieldError>,
}

impl Validator {
    pub fn push(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError::new(field, message));
    }

    /// Character count must lie within `min..=max`
    pub fn length(&mut self, field: &str, value: &str, min: usize, max: usize, message: &str) {
        let len = value.chars().count();
        if len < min || len > max {
            self.push(field, message);
        }
    }

    pub fn max_length(&mut self, field: &str, value: Option<&str>, max: usize, message: &str) {
        if let Some(value) = value {
            if value.chars().count() > max {
                self.push(field, message);
            }
        }
    }

    pub fn http_url(&mut self, field: &str, value: Option<&str>, message: &str) {
        if let Some(value) = value {
            if !is_http_url(value) {
                self.push(field, message);
            }
        }
    }

    pub fn github_url(&mut self, field: &str, value: Option<&str>) {
        if let Some(value) = value {
            if !GITHUB_URL.is_match(value) {
                self.push(field, "Must be a valid GitHub URL");
            }
        }
    }

    pub fn hex_color(&mut self, field: &str, value: &str) {
        if !is_hex_color(value) {
            self.push(field, format!("{} must be a valid hex color", field));
        }
    }

    pub fn person_name(&mut self, field: &str, value: &str, label: &str) {
        if !PERSON_NAME.is_match(value) {
            self.push(
                field,
                format!(
                    "{} can only contain letters, spaces, hyphens, apostrophes, and periods",
                    label
                ),
            );
        }
    }

    /// Numeric value must lie within `min..=max`
    pub fn range<T: PartialOrd + Copy>(&mut self, field: &str, value: T, min: T, max: T, message: &str) {
        if value < min || value > max {
            self.push(field, message);
        }
    }

    /// Merges errors reported by a nested record under a field prefix
    pub fn nested(&mut self, prefix: &str, result: Result<(), DomainError>) {
        match result {
            Ok(()) => {}
            Err(DomainError::Validation(errors)) => {
                for e in errors {
                    self.push(format!("{}.{}", prefix, e.field), e.message);
                }
            }
            Err(other) => self.push(prefix, other.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn finish(self) -> Result<(), DomainError> {
        if self.errors.is_empty() {
            Ok(())
        } else {
            Err(DomainError::Validation(self.errors))
        }
    }
}

pub fn is_http_url(value: &str) -> bool {
    HTTP_URL.is_match(value)
}

pub fn is_hex_color(value: &str) -> bool {
    HEX_COLOR.is_match(value)
}

/// Trims a string and maps empty results to `None`
pub fn trim_optional(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
