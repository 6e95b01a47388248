//! User table

use crm_models::User;

use crate::record::{NamedRecord, Record, SortKey, SqlValue};

impl Record for User {
    const COLUMNS: &'static [&'static str] = &[
        "username",
        "email",
        "first_name",
        "last_name",
        "role_id",
        "team_id",
    ];
    const ORDER_BY: &'static str = "username";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.username.clone().into(),
            self.email.clone().into(),
            self.first_name.clone().into(),
            self.last_name.clone().into(),
            self.role_id.into(),
            self.team_id.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.username.clone())
    }
}

impl NamedRecord for User {
    const NAME_COLUMN: &'static str = "username";
}
