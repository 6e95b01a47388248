//! Company model
//!
//! Table: companies

use crm_core::{Audit, Entity, Named};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// Customer or prospect organization
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub id: Uuid,

    /// Company name (unique)
    pub name: String,

    pub account_type_id: Option<Uuid>,
    pub email: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub annual_revenue: Option<Decimal>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Company);

impl Entity for Company {
    const TABLE_NAME: &'static str = "companies";
    const TYPE_NAME: &'static str = "Company";
}

impl Named for Company {
    fn name(&self) -> &str {
        &self.name
    }
}

impl Company {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            name: name.into(),
            account_type_id: None,
            email: None,
            phone: None,
            website: None,
            annual_revenue: None,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompanyDto {
    pub id: Uuid,
    pub name: String,
    #[serde(default)]
    pub account_type_id: Option<Uuid>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
    #[serde(default)]
    pub annual_revenue: Option<Decimal>,
}

pub type CompanyListDto = ListDto<CompanyDto>;
pub type CompanyDetailsDto = DetailsDto<CompanyDto>;

impl Profile for Company {
    type Dto = CompanyDto;

    fn to_dto(&self) -> CompanyDto {
        CompanyDto {
            id: self.id,
            name: self.name.clone(),
            account_type_id: self.account_type_id,
            email: self.email.clone(),
            phone: self.phone.clone(),
            website: self.website.clone(),
            annual_revenue: self.annual_revenue,
        }
    }

    fn from_dto(dto: CompanyDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            name: dto.name,
            account_type_id: dto.account_type_id,
            email: dto.email,
            phone: dto.phone,
            website: dto.website,
            annual_revenue: dto.annual_revenue,
            audit,
        }
    }

    fn dto_id(dto: &CompanyDto) -> Uuid {
        dto.id
    }
}

pub type GetAllCompaniesQuery = GetAllQuery<Company>;
pub type GetPagedCompaniesQuery = GetPagedQuery<Company>;
pub type GetCompanyByIdQuery = GetByIdQuery<Company>;
pub type GetCompanyByNameQuery = GetByNameQuery<Company>;
pub type CreateCompanyCommand = CreateCommand<Company>;
pub type UpdateCompanyCommand = UpdateCommand<Company>;
pub type DeleteCompanyCommand = DeleteCommand<Company>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_round_trip() {
        let mut company = Company::new("Contoso");
        company.email = Some("info@contoso.test".into());
        company.annual_revenue = Some(Decimal::new(125_000_050, 2));

        let back = Company::from_dto(company.to_dto(), company.audit.clone());
        assert_eq!(back, company);
    }

    #[test]
    fn test_list_dto_carries_modified_stamp() {
        let company = Company::new("Contoso");
        let json = serde_json::to_value(company.to_list_dto()).unwrap();

        assert_eq!(json["name"], "Contoso");
        assert_eq!(json["modifiedBy"], "system");
        assert!(json.get("createdBy").is_none());
    }
}
