//! Activity table

use crm_models::Activity;

use crate::record::{Record, SortKey, SqlValue};

impl Record for Activity {
    const COLUMNS: &'static [&'static str] = &[
        "subject",
        "description",
        "activity_status_id",
        "company_id",
        "owner_id",
        "due_date",
    ];
    const ORDER_BY: &'static str = "subject";

    fn values(&self) -> Vec<SqlValue> {
        vec![
            self.subject.clone().into(),
            self.description.clone().into(),
            self.activity_status_id.into(),
            self.company_id.into(),
            self.owner_id.into(),
            self.due_date.into(),
        ]
    }

    fn sort_key(&self) -> SortKey {
        (0, self.subject.clone())
    }
}
