//! Sales order table

use crm_models::SalesOrder;

use crate::record::{Record, SortKey, SqlValue, TotaledRecord};

impl Record for SalesOrder {
    const COLUMNS: &'static [&'static str] = &[
        "order_number",
        "company_id",
        "quote_id",
        "order_date",
        "amount",
    ];
    const ORDER_BY: &'static str = "order_number";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.order_number.clone().into(),
            self.company_id.into(),
            self.quote_id.into(),
            self.order_date.into(),
            self.amount.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.order_number.clone())
    }
}

impl TotaledRecord for SalesOrder {
    const GROUP_COLUMN: &'static str = "company_id";
}
