//! Core error types for CRM RS
//!
//! Every layer converts its failures into [`CrmError`]; the API boundary is
//! the only place that turns it into an HTTP status.

use thiserror::Error;

/// Core error type for all CRM operations
#[derive(Error, Debug)]
pub enum CrmError {
    #[error("Validation failed: {0}")]
    Validation(#[from] ValidationErrors),

    #[error("{entity} with id {id} was not found")]
    NotFound { entity: &'static str, id: String },

    #[error("{0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Database error: {0}")]
    Database(String),

    #[error("The operation was cancelled")]
    Cancelled,

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CrmError {
    pub fn not_found(entity: &'static str, id: impl std::fmt::Display) -> Self {
        CrmError::NotFound {
            entity,
            id: id.to_string(),
        }
    }

    pub fn bad_request(message: impl Into<String>) -> Self {
        CrmError::BadRequest(message.into())
    }

    pub fn unauthorized(message: impl Into<String>) -> Self {
        CrmError::Unauthorized(message.into())
    }

    pub fn internal(message: impl Into<String>) -> Self {
        CrmError::Internal(message.into())
    }

    /// HTTP status code for the error kind
    pub fn status_code(&self) -> u16 {
        match self {
            CrmError::Validation(_) | CrmError::BadRequest(_) => 400,
            CrmError::Unauthorized(_) => 401,
            CrmError::NotFound { .. } => 404,
            CrmError::Database(_) | CrmError::Cancelled | CrmError::Internal(_) => 500,
        }
    }

    pub fn error_code(&self) -> &'static str {
        match self {
            CrmError::Validation(_) => "validation_failed",
            CrmError::NotFound { .. } => "not_found",
            CrmError::BadRequest(_) => "bad_request",
            CrmError::Unauthorized(_) => "unauthorized",
            CrmError::Database(_) => "database_error",
            CrmError::Cancelled => "cancelled",
            CrmError::Internal(_) => "internal_error",
        }
    }
}

/// A single violated rule
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: String,
    pub message: String,
}

/// Ordered collection of violated rules.
///
/// Rules are kept in the order they were checked so the caller sees the
/// same list every time for the same input.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct ValidationErrors {
    errors: Vec<FieldError>,
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.messages().join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn single(field: impl Into<String>, message: impl Into<String>) -> Self {
        let mut errors = Self::new();
        errors.add(field, message);
        errors
    }

    pub fn add(&mut self, field: impl Into<String>, message: impl Into<String>) {
        self.errors.push(FieldError {
            field: field.into(),
            message: message.into(),
        });
    }

    /// Add an error not tied to a specific field
    pub fn add_base(&mut self, message: impl Into<String>) {
        self.add("base", message);
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    /// Check if there are errors for a specific field
    pub fn has_error(&self, field: &str) -> bool {
        self.errors.iter().any(|e| e.field == field)
    }

    /// Get errors for a specific field
    pub fn get(&self, field: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.field == field)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldError> {
        self.errors.iter()
    }

    pub fn merge(&mut self, other: ValidationErrors) {
        self.errors.extend(other.errors);
    }

    /// Rule messages in the order they were recorded
    pub fn messages(&self) -> Vec<String> {
        self.errors.iter().map(|e| e.message.clone()).collect()
    }

    /// `Ok(())` when nothing was recorded
    pub fn into_result(self) -> Result<(), ValidationErrors> {
        if self.is_empty() {
            Ok(())
        } else {
            Err(self)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_errors_keep_order() {
        let mut errors = ValidationErrors::new();
        errors.add("name", "Company name is required");
        errors.add("email", "Email address is not valid");
        errors.add("name", "Company name must not exceed 200 characters");

        assert_eq!(
            errors.messages(),
            vec![
                "Company name is required",
                "Email address is not valid",
                "Company name must not exceed 200 characters",
            ]
        );
        assert_eq!(errors.get("name").len(), 2);
        assert!(errors.has_error("email"));
        assert!(!errors.has_error("phone"));
    }

    #[test]
    fn test_merge_and_into_result() {
        let mut errors = ValidationErrors::new();
        assert!(errors.clone().into_result().is_ok());

        errors.merge(ValidationErrors::single("id", "Role ID is required"));
        errors.add_base("Request is malformed");

        let err = errors.into_result().unwrap_err();
        assert_eq!(err.len(), 2);
        assert!(err.has_error("base"));
    }

    #[test]
    fn test_status_codes() {
        assert_eq!(CrmError::from(ValidationErrors::new()).status_code(), 400);
        assert_eq!(CrmError::bad_request("nope").status_code(), 400);
        assert_eq!(CrmError::unauthorized("no token").status_code(), 401);
        assert_eq!(CrmError::not_found("Company", "42").status_code(), 404);
        assert_eq!(CrmError::Cancelled.status_code(), 500);
        assert_eq!(CrmError::internal("boom").status_code(), 500);
    }

    #[test]
    fn test_not_found_message() {
        let err = CrmError::not_found("Invoice Status", "abc");
        assert_eq!(err.to_string(), "Invoice Status with id abc was not found");
        assert_eq!(err.error_code(), "not_found");
    }
}
