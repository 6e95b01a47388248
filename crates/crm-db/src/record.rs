//! Record descriptions and SQL generation
//!
//! A [`Record`] names an entity's business columns and ordering. The audit
//! columns (`created_by`, `created_date`, `modified_by`, `modified_date`,
//! `active`) and `id` are common to every table and handled here.

use chrono::{DateTime, NaiveDate, Utc};
use crm_core::{Defaultable, Entity, Named, Totaled};
use rust_decimal::Decimal;
use sqlx::postgres::{PgArguments, PgRow};
use sqlx::query::QueryAs;
use sqlx::{FromRow, Postgres};
use uuid::Uuid;

/// Ordering key for in-memory sorting; mirrors `ORDER_BY`
pub type SortKey = (i32, String);

/// Table description for an entity
pub trait Record: Entity + for<'r> FromRow<'r, PgRow> + Unpin {
    /// Business columns, in the order of [`Record::values`]
    const COLUMNS: &'static [&'static str];

    /// `ORDER BY` clause for list queries
    const ORDER_BY: &'static str;

    fn values(&self) -> Vec<SqlValue>;

    fn sort_key(&self) -> SortKey;
}

/// Records looked up by a unique name column
pub trait NamedRecord: Record + Named {
    const NAME_COLUMN: &'static str;
}

/// Records summed per parent
pub trait TotaledRecord: Record + Totaled {
    const GROUP_COLUMN: &'static str;
}

/// An owned bind parameter
#[derive(Debug, Clone, PartialEq)]
pub enum SqlValue {
    Uuid(Option<Uuid>),
    Text(Option<String>),
    Int(Option<i32>),
    Bool(bool),
    Decimal(Option<Decimal>),
    Date(Option<NaiveDate>),
    Timestamp(Option<DateTime<Utc>>),
}

impl SqlValue {
    pub fn bind_to<'q, O>(
        self,
        query: QueryAs<'q, Postgres, O, PgArguments>,
    ) -> QueryAs<'q, Postgres, O, PgArguments> {
        match self {
            SqlValue::Uuid(v) => query.bind(v),
            SqlValue::Text(v) => query.bind(v),
            SqlValue::Int(v) => query.bind(v),
            SqlValue::Bool(v) => query.bind(v),
            SqlValue::Decimal(v) => query.bind(v),
            SqlValue::Date(v) => query.bind(v),
            SqlValue::Timestamp(v) => query.bind(v),
        }
    }
}

macro_rules! sql_value_from {
    ($($ty:ty => $variant:ident),+ $(,)?) => {$(
        impl From<$ty> for SqlValue {
            fn from(value: $ty) -> Self {
                SqlValue::$variant(Some(value))
            }
        }

        impl From<Option<$ty>> for SqlValue {
            fn from(value: Option<$ty>) -> Self {
                SqlValue::$variant(value)
            }
        }
    )+};
}

sql_value_from! {
    Uuid => Uuid,
    String => Text,
    i32 => Int,
    Decimal => Decimal,
    NaiveDate => Date,
    DateTime<Utc> => Timestamp,
}

impl From<bool> for SqlValue {
    fn from(value: bool) -> Self {
        SqlValue::Bool(value)
    }
}

/// Pre-rendered statements for one table
#[derive(Debug, Clone)]
pub struct Statements {
    pub select_all: String,
    pub select_page: String,
    pub count: String,
    pub select_by_id: String,
    pub exists: String,
    pub insert: String,
    pub update: String,
    pub soft_delete: String,
}

impl Statements {
    pub fn for_record<T: Record>() -> Self {
        let table = T::TABLE_NAME;
        let columns = T::COLUMNS;
        let n = columns.len();

        // $1 is the id, business columns follow
        let insert_columns = columns.join(", ");
        let insert_params = (2..n + 2)
            .map(|i| format!("${i}"))
            .collect::<Vec<_>>()
            .join(", ");

        let assignments = columns
            .iter()
            .enumerate()
            .map(|(i, col)| format!("{col} = ${}", i + 2))
            .collect::<Vec<_>>()
            .join(", ");

        Self {
            select_all: format!(
                "SELECT * FROM {table} WHERE active = TRUE ORDER BY {}",
                T::ORDER_BY
            ),
            select_page: format!(
                "SELECT * FROM {table} WHERE active = TRUE ORDER BY {} LIMIT $1 OFFSET $2",
                T::ORDER_BY
            ),
            count: format!("SELECT COUNT(*) FROM {table} WHERE active = TRUE"),
            select_by_id: format!("SELECT * FROM {table} WHERE id = $1 AND active = TRUE"),
            exists: format!(
                "SELECT EXISTS(SELECT 1 FROM {table} WHERE id = $1 AND active = TRUE)"
            ),
            insert: format!(
                "INSERT INTO {table} (id, {insert_columns}, created_by, created_date, modified_by, modified_date, active) \
                 VALUES ($1, {insert_params}, ${a}, ${b}, ${c}, ${d}, TRUE) \
                 ON CONFLICT (id) DO NOTHING RETURNING *",
                a = n + 2,
                b = n + 3,
                c = n + 4,
                d = n + 5,
            ),
            update: format!(
                "UPDATE {table} SET {assignments}, modified_by = ${a}, \
                 modified_date = GREATEST(${b}, modified_date + INTERVAL '1 microsecond') \
                 WHERE id = $1 AND active = TRUE RETURNING *",
                a = n + 2,
                b = n + 3,
            ),
            soft_delete: format!(
                "UPDATE {table} SET active = FALSE, modified_by = $2, \
                 modified_date = GREATEST(NOW(), modified_date + INTERVAL '1 microsecond') \
                 WHERE id = $1 AND active = TRUE"
            ),
        }
    }
}

/// Default row of a lookup table; falls back to the lowest ordinal
pub fn select_default_sql<T: Record + Defaultable>() -> String {
    format!(
        "SELECT * FROM {} WHERE active = TRUE ORDER BY is_default DESC, ordinal_position ASC LIMIT 1",
        T::TABLE_NAME
    )
}

pub fn select_by_name_sql<T: NamedRecord>() -> String {
    format!(
        "SELECT * FROM {} WHERE LOWER({}) = LOWER($1) AND active = TRUE LIMIT 1",
        T::TABLE_NAME,
        T::NAME_COLUMN
    )
}

pub fn total_sql<T: TotaledRecord>() -> String {
    format!(
        "SELECT COALESCE(SUM(amount), 0) FROM {} WHERE {} = $1 AND active = TRUE",
        T::TABLE_NAME,
        T::GROUP_COLUMN
    )
}
