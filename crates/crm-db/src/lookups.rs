//! Lookup tables
//!
//! One description serves account_types, activity_statuses, invoice_statuses,
//! payment_methods and service_types.

use crm_models::{Lookup, LookupKind};

use crate::record::{Record, SortKey, SqlValue};

impl<K: LookupKind> Record for Lookup<K> {
    const COLUMNS: &'static [&'static str] =
        &["name", "description", "ordinal_position", "is_default"];
    const ORDER_BY: &'static str = "ordinal_position, name";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.description.clone().into(),
            self.ordinal_position.into(),
            self.is_default.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (self.ordinal_position, self.name.clone())
    }
}
