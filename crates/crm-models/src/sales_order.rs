//! Sales order model
//!
//! Table: sales_orders

use chrono::NaiveDate;
use crm_core::{Audit, Entity, Totaled};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::profile::{DetailsDto, ListDto, Profile};
use crate::requests::*;

/// Confirmed order, optionally converted from a quote
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, sqlx::FromRow)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrder {
    pub id: Uuid,
    pub order_number: String,
    pub company_id: Uuid,
    pub quote_id: Option<Uuid>,
    pub order_date: NaiveDate,
    pub amount: Decimal,

    #[sqlx(flatten)]
    #[serde(flatten)]
    pub audit: Audit,
}

impl_audited!(SalesOrder);

impl Entity for SalesOrder {
    const TABLE_NAME: &'static str = "sales_orders";
    const TYPE_NAME: &'static str = "Sales Order";
}

impl Totaled for SalesOrder {
    const GROUP_NAME: &'static str = "Company";

    fn group_id(&self) -> Uuid {
        self.company_id
    }

    fn amount(&self) -> Decimal {
        self.amount
    }
}

impl SalesOrder {
    pub fn new(
        order_number: impl Into<String>,
        company_id: Uuid,
        order_date: NaiveDate,
        amount: Decimal,
    ) -> Self {
        Self {
            id: Uuid::new_v4(),
            order_number: order_number.into(),
            company_id,
            quote_id: None,
            order_date,
            amount,
            audit: Audit::default(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SalesOrderDto {
    pub id: Uuid,
    pub order_number: String,
    pub company_id: Uuid,
    #[serde(default)]
    pub quote_id: Option<Uuid>,
    pub order_date: NaiveDate,
    pub amount: Decimal,
}

pub type SalesOrderListDto = ListDto<SalesOrderDto>;
pub type SalesOrderDetailsDto = DetailsDto<SalesOrderDto>;

impl Profile for SalesOrder {
    type Dto = SalesOrderDto;

    fn to_dto(&self) -> SalesOrderDto {
        SalesOrderDto {
            id: self.id,
            order_number: self.order_number.clone(),
            company_id: self.company_id,
            quote_id: self.quote_id,
            order_date: self.order_date,
            amount: self.amount,
        }
    }

    fn from_dto(dto: SalesOrderDto, audit: Audit) -> Self {
        Self {
            id: dto.id,
            order_number: dto.order_number,
            company_id: dto.company_id,
            quote_id: dto.quote_id,
            order_date: dto.order_date,
            amount: dto.amount,
            audit,
        }
    }

    fn dto_id(dto: &SalesOrderDto) -> Uuid {
        dto.id
    }
}

pub type GetAllSalesOrdersQuery = GetAllQuery<SalesOrder>;
pub type GetPagedSalesOrdersQuery = GetPagedQuery<SalesOrder>;
pub type GetSalesOrderByIdQuery = GetByIdQuery<SalesOrder>;
pub type GetCompanySalesOrderTotalQuery = GetTotalQuery<SalesOrder>;
pub type CreateSalesOrderCommand = CreateCommand<SalesOrder>;
pub type UpdateSalesOrderCommand = UpdateCommand<SalesOrder>;
pub type DeleteSalesOrderCommand = DeleteCommand<SalesOrder>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_mapping_round_trip() {
        let mut order = SalesOrder::new(
            "SO-1001",
            Uuid::new_v4(),
            NaiveDate::from_ymd_opt(2024, 3, 15).unwrap(),
            Decimal::new(125_000, 2),
        );
        order.quote_id = Some(Uuid::new_v4());

        let back = SalesOrder::from_dto(order.to_dto(), order.audit.clone());
        assert_eq!(back, order);
    }
}
