//! Update contract

use std::marker::PhantomData;

use crm_core::ValidationErrors;
use crm_models::UpdateCommand;

use crate::base::{Contract, DtoRules, ValidationResult};
use crate::rules;

/// Contract for updating an entity. Same rules as create; the id names the
/// row to update.
pub struct UpdateContract<T> {
    _entity: PhantomData<fn() -> T>,
}

impl<T> UpdateContract<T> {
    pub fn new() -> Self {
        Self { _entity: PhantomData }
    }
}

impl<T> Default for UpdateContract<T> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: DtoRules> Contract<UpdateCommand<T>> for UpdateContract<T> {
    fn validate(&self, request: &UpdateCommand<T>) -> ValidationResult {
        let mut errors = ValidationErrors::new();

        rules::require_id(T::dto_id(&request.dto), T::TYPE_NAME, &mut errors);
        T::check(&request.dto, &mut errors);

        errors.into_result()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crm_models::{Invoice, InvoiceDto};
    use chrono::NaiveDate;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_invoice_rules() {
        let contract = UpdateContract::<Invoice>::new();
        let command = UpdateCommand::<Invoice>::new(InvoiceDto {
            id: Uuid::new_v4(),
            invoice_number: "INV-7".into(),
            company_id: Uuid::nil(),
            invoice_status_id: None,
            issue_date: NaiveDate::from_ymd_opt(2024, 6, 10).unwrap(),
            due_date: NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            amount: Decimal::ZERO,
        });

        let errors = contract.validate(&command).unwrap_err();
        assert_eq!(
            errors.messages(),
            vec![
                "Company ID is required",
                "Due date must be on or after the issue date",
                "Amount must be greater than zero"
            ]
        );
    }
}
