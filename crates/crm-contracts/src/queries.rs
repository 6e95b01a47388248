//! Query contracts

use std::marker::PhantomData;

use crm_core::{Entity, Named, ValidationErrors, MAX_PAGE_SIZE};
use crm_models::{GetByIdQuery, GetByNameQuery, GetPagedQuery, Profile};

use crate::base::{Contract, ValidationResult};
use crate::rules;

macro_rules! contract_struct {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        pub struct $name<T> {
            _entity: PhantomData<fn() -> T>,
        }

        impl<T> $name<T> {
            pub fn new() -> Self {
                Self { _entity: PhantomData }
            }
        }

        impl<T> Default for $name<T> {
            fn default() -> Self {
                Self::new()
            }
        }
    };
}

contract_struct!(GetByIdContract);
contract_struct!(
    /// Name must be non-blank
    GetByNameContract
);
contract_struct!(
    /// Page number ≥ 1, page size in 1..=100
    GetPagedContract
);

impl<T: Profile> Contract<GetByIdQuery<T>> for GetByIdContract<T> {
    fn validate(&self, request: &GetByIdQuery<T>) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        rules::require_id(request.id, <T as Entity>::TYPE_NAME, &mut errors);
        errors.into_result()
    }
}

impl<T: Profile + Named> Contract<GetByNameQuery<T>> for GetByNameContract<T> {
    fn validate(&self, request: &GetByNameQuery<T>) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        if request.name.trim().is_empty() {
            errors.add("name", format!("{} name is required", <T as Entity>::TYPE_NAME));
        }
        errors.into_result()
    }
}

impl<T: Profile> Contract<GetPagedQuery<T>> for GetPagedContract<T> {
    fn validate(&self, request: &GetPagedQuery<T>) -> ValidationResult {
        let mut errors = ValidationErrors::new();
        let page = request.pagination;

        if page.page_number < 1 {
            errors.add("pageNumber", "Page number must be at least 1");
        }
        if !(1..=MAX_PAGE_SIZE).contains(&page.page_size) {
            errors.add(
                "pageSize",
                format!("Page size must be between 1 and {MAX_PAGE_SIZE}"),
            );
        }

        errors.into_result()
    }
}
