//! Quote table

use crm_models::Quote;

use crate::record::{Record, SortKey, SqlValue};

impl Record for Quote {
    const COLUMNS: &'static [&'static str] = &[
        "quote_number",
        "company_id",
        "valid_until",
        "amount",
        "notes",
    ];
    const ORDER_BY: &'static str = "quote_number";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.quote_number.clone().into(),
            self.company_id.into(),
            self.valid_until.into(),
            self.amount.into(),
            self.notes.clone().into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.quote_number.clone())
    }
}
