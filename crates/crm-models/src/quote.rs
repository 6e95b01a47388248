//! Quote model
//!
//! Table: quotes

use chrono::NaiveDate;
use crm_core::{Audit, Entity};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Quote {
    pub id: Uuid,
    pub quote_number: String,
    pub company_id: Uuid,
    pub valid_until: NaiveDate,
    pub amount: Decimal,
    pub notes: Option<String>,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(Quote);

impl Entity for Quote {
    const TABLE_NAME: &'static str = "quotes";
    const TYPE_NAME: &'static str = "Quote";
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuoteDto {
    pub id: Uuid,
    pub quote_number: String,
    pub company_id: Uuid,
    pub valid_until: NaiveDate,
    pub amount: Decimal,
    #[serde(default)]
    pub notes: Option<String>,
}

pub type QuoteListDto = ListDto<QuoteDto>;
pub type QuoteDetailsDto = DetailsDto<QuoteDto>;

impl Profile for Quote {
    type Dto = QuoteDto;

    fn to_dto(&self) -> QuoteDto {
        QuoteDto {
            id: self.id,
            quote_number: self.quote_number.clone(),
            company_id: self.company_id,
            valid_until: self.valid_until,
            amount: self.amount,
            notes: self.notes.clone(),
        }
    }

    fn from_dto(dto: QuoteDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            quote_number: dto.quote_number,
            company_id: dto.company_id,
            valid_until: dto.valid_until,
            amount: dto.amount,
            notes: dto.notes,
            audit,
        }
    }

    fn dto_id(dto: &QuoteDto) -> Uuid {
        dto.id
    }
}

pub type GetAllQuotesQuery = GetAllQuery<Quote>;
pub type GetPagedQuotesQuery = GetPagedQuery<Quote>;
pub type GetQuoteByIdQuery = GetByIdQuery<Quote>;
pub type CreateQuoteCommand = CreateCommand<Quote>;
pub type UpdateQuoteCommand = UpdateCommand<Quote>;
pub type DeleteQuoteCommand = DeleteCommand<Quote>;
