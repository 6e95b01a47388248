//! Payment table

use crm_models::Payment;

use crate::record::{Record, SortKey, SqlValue, TotaledRecord};

impl Record for Payment {
    const COLUMNS: &'static [&'static str] = &[
        "invoice_id",
        "payment_method_id",
        "amount",
        "payment_date",
        "reference",
    ];
    const ORDER_BY: &'static str = "payment_date";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.invoice_id.into(),
            self.payment_method_id.into(),
            self.amount.into(),
            self.payment_date.into(),
            self.reference.clone().into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        // ISO dates sort lexically
        (0, self.payment_date.to_string())
    }
}

impl TotaledRecord for Payment {
    const GROUP_COLUMN: &'static str = "invoice_id";
}
