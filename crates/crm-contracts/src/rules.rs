//! Reusable rule checks
//!
//! Each check appends to the error list and never returns early, so callers
//! can chain them and report every violation at once.

use std::sync::LazyLock;

use crm_core::ValidationErrors;
use regex::Regex;
use rust_decimal::Decimal;
use uuid::Uuid;

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^@\s]+@[^@\s]+\.[^@\s]+$").expect("email pattern is valid")
});

/// `"{type_name} ID is required"` when `id` is nil
pub fn require_id(id: Uuid, type_name: &str, errors: &mut ValidationErrors) {
    if id.is_nil() {
        errors.add("id", format!("{type_name} ID is required"));
    }
}

/// Non-nil reference to another entity
pub fn require_reference(id: Uuid, field: &str, label: &str, errors: &mut ValidationErrors) {
    if id.is_nil() {
        errors.add(field, format!("{label} ID is required"));
    }
}

/// Non-blank text no longer than `max` characters
pub fn require_text(value: &str, field: &str, label: &str, max: usize, errors: &mut ValidationErrors) {
    if value.trim().is_empty() {
        errors.add(field, format!("{label} is required"));
    } else {
        max_length(value, field, label, max, errors);
    }
}

pub fn max_length(value: &str, field: &str, label: &str, max: usize, errors: &mut ValidationErrors) {
    if value.chars().count() > max {
        errors.add(field, format!("{label} must not exceed {max} characters"));
    }
}

pub fn optional_max_length(
    value: Option<&str>,
    field: &str,
    label: &str,
    max: usize,
    errors: &mut ValidationErrors,
) {
    if let Some(value) = value {
        max_length(value, field, label, max, errors);
    }
}

pub fn email(value: &str, field: &str, errors: &mut ValidationErrors) {
    if !EMAIL_PATTERN.is_match(value) {
        errors.add(field, "Email address is not valid");
    }
}

pub fn optional_email(value: Option<&str>, field: &str, errors: &mut ValidationErrors) {
    if let Some(value) = value.filter(|v| !v.trim().is_empty()) {
        email(value, field, errors);
    }
}

pub fn positive(value: Decimal, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value <= Decimal::ZERO {
        errors.add(field, format!("{label} must be greater than zero"));
    }
}

pub fn non_negative(value: Decimal, field: &str, label: &str, errors: &mut ValidationErrors) {
    if value < Decimal::ZERO {
        errors.add(field, format!("{label} cannot be negative"));
    }
}
