//! Result type aliases

use crate::error::{CrmError, ValidationErrors};

/// Standard Result type for CRM operations
pub type CrmResult<T> = Result<T, CrmError>;

/// Result of running a rule set
pub type ValidationResult = Result<(), ValidationErrors>;
