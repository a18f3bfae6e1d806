//! Input validation for submission requests.
//!
//! Collects field-tagged errors so a rejected form reports every problem at
//! once instead of failing on the first field.

use std::fmt;

/// A single validation failure tied to the wire name of the offending field.
#[derive(Debug, Clone)]
pub struct ValidationError {
    pub field: String,
    pub message: String,
}

impl ValidationError {
    pub fn new(field: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            field: field.into(),
            message: message.into(),
        }
    }

    /// Error for a required field that is missing or blank after trimming.
    pub fn empty_field(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} is required and cannot be empty"))
    }

    /// Error for a field that must parse as a number.
    pub fn not_a_number(field: &str, label: &str) -> Self {
        Self::new(field, format!("{label} must be a number"))
    }
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}] {}", self.field, self.message)
    }
}

impl std::error::Error for ValidationError {}

/// Collection of validation errors with formatted output.
#[derive(Debug, Default)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self { errors: Vec::new() }
    }

    pub fn add(&mut self, error: ValidationError) {
        self.errors.push(error);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// One-line summary suitable for an HTTP error body.
    pub fn to_message(&self) -> String {
        let details: Vec<String> = self.errors.iter().map(|e| e.to_string()).collect();
        format!(
            "validation failed ({} error{}): {}",
            self.errors.len(),
            if self.errors.len() == 1 { "" } else { "s" },
            details.join("; ")
        )
    }

    pub fn into_result(self) -> Result<(), String> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self.to_message())
        }
    }
}

/// Validate that a string is not empty after trimming.
pub fn validate_required(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(ValidationError::empty_field(field, label));
    }
}

/// Validate that a string parses as a finite number. Empty input is reported
/// as a missing field, not a parse failure.
pub fn validate_numeric(value: &str, field: &str, label: &str, errors: &mut ValidationErrors) {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        errors.add(ValidationError::empty_field(field, label));
        return;
    }

    match trimmed.parse::<f64>() {
        Ok(number) if number.is_finite() => {}
        _ => errors.add(ValidationError::not_a_number(field, label)),
    }
}
