//! Create contract

use std::marker::PhantomData;

use crm_core::ValidationErrors;
use crm_models::CreateCommand;

use crate::base::{Contract, DtoRules, ValidationResult};
use crate::rules;

/// Contract for creating an entity: the DTO must carry a non-nil id and
/// satisfy the entity's rules
pub struct CreateContract<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> CreateContract<T> {
    pub fn new() -> Self {
        Self { _entity: PhantomData }
    }
}

impl<T> Default for CreateContract<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DtoRules> Contract<CreateCommand<T>> for CreateContract<T> {
    fn validate(&self, request: &CreateCommand<T>) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        rules::require_id(T::dto_id(&request.dto), T::TYPE_NAME, &mut errors);
        T::check(&request.dto, &mut errors);

        errors.into_result()
    }
}
