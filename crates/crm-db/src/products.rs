//! Product table

use crm_models::Product;

use crate::record::{NamedRecord, Record, SortKey, SqlValue};

impl Record for Product {
    const COLUMNS: &'static [&'static str] = &[
        "name",
        "sku",
        "unit_price",
        "service_type_id",
        "description",
    ];
    const ORDER_BY: &'static str = "name";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.sku.clone().into(),
            self.unit_price.into(),
            self.service_type_id.into(),
            self.description.clone().into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.name.clone())
    }
}

impl NamedRecord for Product {
    const NAME_COLUMN: &'static str = "name";
}
