//! Invoice table

use crm_models::Invoice;

use crate::record::{Record, SortKey, SqlValue, TotaledRecord};

impl Record for Invoice {
    const COLUMNS: &'static [&'static str] = &[
        "invoice_number",
        "company_id",
        "invoice_status_id",
        "issue_date",
        "due_date",
        "amount",
    ];
    const ORDER_BY: &'static str = "invoice_number";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.invoice_number.clone().into(),
            self.company_id.into(),
            self.invoice_status_id.into(),
            self.issue_date.into(),
            self.due_date.into(),
            self.amount.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.invoice_number.clone())
    }
}

impl TotaledRecord for Invoice {
    const GROUP_COLUMN: &'static str = "company_id";
}
