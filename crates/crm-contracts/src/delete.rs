//! Delete contract

use std::marker::PhantomData;

use crm_core::{Entity, ValidationErrors};
use crm_models::{DeleteCommand, Profile};

use crate::base::{Contract, ValidationResult};
use crate::rules;

pub struct DeleteContract<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> DeleteContract<T> {
    pub fn new() -> Self {
        Self { _entity: PhantomData }
    }
}

impl<T> Default for DeleteContract<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Profile> Contract<DeleteCommand<T>> for DeleteContract<T> {
    fn validate(&self, request: &DeleteCommand<T>) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        rules::require_id(request.id, <T as Entity>::TYPE_NAME, &mut errors);
        errors.into_result()
    }
}
