//! Team table

use crm_models::Team;

use crate::record::{NamedRecord, Record, SortKey, SqlValue};

impl Record for Team {
    const COLUMNS: &'static [&'static str] = &["name", "description", "lead_user_id"];
    const ORDER_BY: &'static str = "name";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.name.clone().into(),
            self.description.clone().into(),
            self.lead_user_id.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.name.clone())
    }
}

impl NamedRecord for Team {
    const NAME_COLUMN: &'static str = "name";
}
