//! Company and activity rules

use crm_core::ValidationErrors;
use crm_models::{Activity, ActivityDto, Company, CompanyDto};

use crate::base::DtoRules;
use crate::rules;

impl DtoRules for Company {
    fn check(dto: &CompanyDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.name, "name", "Company name", 200, errors);
        rules::optional_email(dto.email.as_deref(), "email", errors);
        rules::optional_max_length(dto.phone.as_deref(), "phone", "Phone", 50, errors);
        rules::optional_max_length(dto.website.as_deref(), "website", "Website", 255, errors);
        if let Some(revenue) = dto.annual_revenue {
            rules::non_negative(revenue, "annualRevenue", "Annual revenue", errors);
        }
    }
}

impl DtoRules for Activity {
    fn check(dto: &ActivityDto, errors: &mut ValidationErrors) {
        rules::require_text(&dto.subject, "subject", "Activity subject", 200, errors);
        rules::optional_max_length(
            dto.description.as_deref(),
            "description",
            "Description",
            2000,
            errors,
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use uuid::Uuid;

    #[test]
    fn test_company_negative_revenue() {
        let dto = CompanyDto {
            id: Uuid::new_v4(),
            name: "Contoso".into(),
            account_type_id: None,
            email: Some("sales@contoso.test".into()),
            phone: None,
            website: None,
            annual_revenue: Some(Decimal::new(-5, 0)),
        };

        let mut errors = ValidationErrors::new();
        Company::check(&dto, &mut errors);
        assert_eq!(errors.messages(), vec!["Annual revenue cannot be negative"]);
    }

    #[test]
    fn test_activity_subject_required() {
        let dto = ActivityDto {
            id: Uuid::new_v4(),
            subject: String::new(),
            description: None,
            activity_status_id: None,
            company_id: None,
            owner_id: None,
            due_date: None,
        };

        let mut errors = ValidationErrors::new();
        Activity::check(&dto, &mut errors);
        assert_eq!(errors.get("subject"), vec!["Activity subject is required"]);
    }
}
