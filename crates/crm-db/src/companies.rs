//! Company table

use crm_models::Company;

use crate::record::{NamedRecord, Record, SortKey, SqlValue};

impl Record for Company {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "account_type_id",
        "email",
        "phone",
        "website",
        "annual_revenue",
    ];
    const ORDER_BY: &'static str = "name";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.account_type_id.into(),
            self.email.clone().into(),
            self.phone.clone().into(),
            self.website.clone().into(),
            self.annual_revenue.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.name.clone())
    }
}

impl NamedRecord for Company {
    const NAME_COLUMN: &'static str = "name";
}
