//! Role table

use crm_models::Role;

use crate::record::{NamedRecord, Record, SortKey, SqlValue};

impl Record for Role {
    const COLUMNS: &'static [&'static str] = &["name", "description"];
    const ORDER_BY: &'static str = "name";

    fn values(&self) -> Vec<SqlValue> {
        vec![self.name.clone().into(), self.description.clone().into()]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.name.clone())
    }
}

impl NamedRecord for Role {
    const NAME_COLUMN: &'static str = "name";
}
