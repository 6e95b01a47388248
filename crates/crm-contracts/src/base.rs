//! Base contract system

use crm_core::ValidationErrors;
use crm_models::Profile;

pub use crm_core::ValidationResult;

/// Validates one request type
pub trait Contract<R>: Send + Sync {
    fn validate(&self, request: &R) -> ValidationResult;
}

/// Business rules for an entity's DTO, shared by the create and update contracts
pub trait DtoRules: Profile {
    /// Push every violated rule into `errors`, in declaration order
    fn check(dto: &Self::Dto, errors: &mut ValidationErrors);
}
