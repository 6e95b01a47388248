//! Invoice model
//!
//! Table: invoices

use chrono::NaiveDate;
use crm_core::{Audit, Entity, Totaled};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Invoice {
    pub id: Uuid,
    pub invoice_number: String,
    pub company_id: Uuid,
    pub invoice_status_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: Decimal,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Invoice);

impl Entity for Invoice {
    const TABLE_NAME: &'static str = "invoices";
    const TYPE_NAME: &'static str = "Invoice";
}

/// Invoiced amount per company
impl Totaled for Invoice {
    const GROUP_NAME: &'static str = "Company";

    fn group_id(&self) -> Uuid {
        self.company_id
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Invoice {
    pub fn new(
        invoice_number: impl Into<String>,
        company_id: Uuid,
        issue_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_number: invoice_number.into(),
            company_id,
            invoice_status_id: None,
            issue_date,
            due_date: issue_date + chrono::Duration::days(30),
            amount,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InvoiceDto {
    pub id: Uuid,
    pub invoice_number: String,
    pub company_id: Uuid,
    #[serde(default)]
    pub invoice_status_id: Option<Uuid>,
    pub issue_date: NaiveDate,
    pub due_date: NaiveDate,
    pub amount: Decimal,
}

pub type InvoiceListDto = ListDto<InvoiceDto>;
pub type InvoiceDetailsDto = DetailsDto<InvoiceDto>;

impl Profile for Invoice {
    type Dto = InvoiceDto;

    fn to_dto(&self) -> InvoiceDto {
        InvoiceDto {
            id: self.id,
            invoice_number: self.invoice_number.clone(),
            company_id: self.company_id,
            invoice_status_id: self.invoice_status_id,
            issue_date: self.issue_date,
            due_date: self.due_date,
            amount: self.amount,
        }
    }

    fn from_dto(dto: InvoiceDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            invoice_number: dto.invoice_number,
            company_id: dto.company_id,
            invoice_status_id: dto.invoice_status_id,
            issue_date: dto.issue_date,
            due_date: dto.due_date,
            amount: dto.amount,
            audit,
        }
    }

    fn dto_id(dto: &InvoiceDto) -> Uuid {
        dto.id
    }
}

pub type GetAllInvoicesQuery = GetAllQuery<Invoice>;
pub type GetPagedInvoicesQuery = GetPagedQuery<Invoice>;
pub type GetInvoiceByIdQuery = GetByIdQuery<Invoice>;
pub type GetCompanyInvoiceTotalQuery = GetTotalQuery<Invoice>;
pub type CreateInvoiceCommand = CreateCommand<Invoice>;
pub type UpdateInvoiceCommand = UpdateCommand<Invoice>;
pub type DeleteInvoiceCommand = DeleteCommand<Invoice>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_round_trip() {
        let issued = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let invoice = Invoice::new("INV-0001", Uuid::new_v4(), issued, Decimal::new(49_900, 2));

        assert_eq!(invoice.due_date, NaiveDate::from_ymd_opt(2024, 3, 31).unwrap());

        let back = Invoice::from_dto(invoice.to_dto(), invoice.audit.clone());
        assert_eq!(back, invoice);
        assert_eq!(back.group_id(), invoice.company_id);
    }

    #[test]
    fn test_amount_serializes_exactly() {
        let issued = NaiveDate::from_ymd_opt(2024, 3, 1).unwrap();
        let invoice = Invoice::new("INV-0002", Uuid::new_v4(), issued, Decimal::new(10, 1));
        let json = serde_json::to_value(invoice.to_dto()).unwrap();

        assert_eq!(json["amount"], "1.0");
        assert_eq!(json["issueDate"], "2024-03-01");
    }
}
