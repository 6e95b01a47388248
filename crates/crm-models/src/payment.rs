//! Payment model
//!
//! Table: payments

use chrono::NaiveDate;
use crm_core::{Audit, Entity, Totaled};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// Money received against an invoice
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: Uuid,
    pub invoice_id: Uuid,
    pub payment_method_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,

    /// Bank or check reference
    pub reference: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Payment);

impl Entity for Payment {
    const TABLE_NAME: &'static str = "payments";
    const TYPE_NAME: &'static str = "Payment";
}

impl Totaled for Payment {
    const GROUP_NAME: &'static str = "Invoice";

    fn group_id(&self) -> Uuid {
        self.invoice_id
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl Payment {
    pub fn new(invoice_id: Uuid, amount: Decimal, payment_date: NaiveDate) -> Self {
        Self {
            id: Uuid::new_v4(),
            invoice_id,
            payment_method_id: None,
            amount,
            payment_date,
            reference: None,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PaymentDto {
    pub id: Uuid,
    pub invoice_id: Uuid,
    #[serde(default)]
    pub payment_method_id: Option<Uuid>,
    pub amount: Decimal,
    pub payment_date: NaiveDate,
    #[serde(default)]
    pub reference: Option<String>,
}

pub type PaymentListDto = ListDto<PaymentDto>;
pub type PaymentDetailsDto = DetailsDto<PaymentDto>;

impl Profile for Payment {
    type Dto = PaymentDto;

    fn to_dto(&self) -> PaymentDto {
        PaymentDto {
            id: self.id,
            invoice_id: self.invoice_id,
            payment_method_id: self.payment_method_id,
            amount: self.amount,
            payment_date: self.payment_date,
            reference: self.reference.clone(),
        }
    }

    fn from_dto(dto: PaymentDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            invoice_id: dto.invoice_id,
            payment_method_id: dto.payment_method_id,
            amount: dto.amount,
            payment_date: dto.payment_date,
            reference: dto.reference,
            audit,
        }
    }

    fn dto_id(dto: &PaymentDto) -> Uuid {
        dto.id
    }
}

pub type GetAllPaymentsQuery = GetAllQuery<Payment>;
pub type GetPagedPaymentsQuery = GetPagedQuery<Payment>;
pub type GetPaymentByIdQuery = GetByIdQuery<Payment>;
pub type GetInvoicePaymentTotalQuery = GetTotalQuery<Payment>;
pub type CreatePaymentCommand = CreateCommand<Payment>;
pub type UpdatePaymentCommand = UpdateCommand<Payment>;
pub type DeletePaymentCommand = DeleteCommand<Payment>;
