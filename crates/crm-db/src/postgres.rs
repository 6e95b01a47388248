//! Generic PostgreSQL repository
//!
//! One implementation serves every entity; the SQL comes from the entity's
//! [`Record`] description. Each operation is a single statement.

use std::marker::PhantomData;

use async_trait::async_trait;
use crm_core::{Defaultable, PagedResult, PaginationParams};
use rust_decimal::Decimal;
use sqlx::PgPool;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

use crate::pool::Database;
use crate::record::{
    select_by_name_sql, select_default_sql, total_sql, NamedRecord, Record, SqlValue,
    Statements, TotaledRecord,
};
use crate::repository::{
    cancellable, DefaultRepository, NamedRepository, Repository, RepositoryError,
    RepositoryResult, TotalRepository,
};

pub struct PgRepository<T> {
    pool: PgPool,
    sql: Statements,
    _entity: PhantomData<fn() -> T>,
}

impl<T: Record> PgRepository<T> {
    pub fn new(pool: PgPool) -> Self {
        Self {
            pool,
            sql: Statements::for_record::<T>(),
            _entity: PhantomData,
        }
    }

    pub fn from_database(database: &Database) -> Self {
        Self::new(database.pool().clone())
    }

    pub fn pool(&self) -> &PgPool {
        &self.pool
    }
}

#[async_trait]
impl<T: Record> Repository<T> for PgRepository<T> {
    async fn get_all(&self, token: &CancellationToken) -> RepositoryResult<Vec<T>> {
        cancellable(token, async {
            let rows = sqlx::query_as::<_, T>(&self.sql.select_all)
                .fetch_all(&self.pool)
                .await?;
            Ok(rows)
        })
        .await
    }

    async fn get_page(
        &self,
        pagination: PaginationParams,
        token: &CancellationToken,
    ) -> RepositoryResult<PagedResult<T>> {
        cancellable(token, async {
            let total = sqlx::query_scalar::<_, i64>(&self.sql.count)
                .fetch_one(&self.pool)
                .await?;

            let rows = sqlx::query_as::<_, T>(&self.sql.select_page)
                .bind(pagination.limit())
                .bind(pagination.offset())
                .fetch_all(&self.pool)
                .await?;

            Ok(PagedResult::new(rows, total, pagination))
        })
        .await
    }

    async fn get_by_id(&self, id: Uuid, token: &CancellationToken) -> RepositoryResult<Option<T>> {
        cancellable(token, async {
            let row = sqlx::query_as::<_, T>(&self.sql.select_by_id)
                .bind(id)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        })
        .await
    }

    async fn add(&self, mut entity: T, token: &CancellationToken) -> RepositoryResult<T> {
        if !entity.has_id() {
            entity.set_id(Uuid::new_v4());
        }
        let id = entity.id();
        let audit = entity.audit().clone();

        let mut query = sqlx::query_as::<_, T>(&self.sql.insert).bind(id);
        for value in entity.values() {
            query = value.bind_to(query);
        }
        let query = SqlValue::from(audit.created_by).bind_to(query);
        let query = SqlValue::from(audit.created_date).bind_to(query);
        let query = SqlValue::from(audit.modified_by).bind_to(query);
        let query = SqlValue::from(audit.modified_date).bind_to(query);

        let inserted = cancellable(token, async {
            Ok(query.fetch_optional(&self.pool).await?)
        })
        .await?;

        inserted.ok_or_else(|| {
            RepositoryError::Conflict(format!("{} with id {} already exists", T::TYPE_NAME, id))
        })
    }

    async fn update(&self, entity: T, token: &CancellationToken) -> RepositoryResult<Option<T>> {
        let audit = entity.audit().clone();

        let mut query = sqlx::query_as::<_, T>(&self.sql.update).bind(entity.id());
        for value in entity.values() {
            query = value.bind_to(query);
        }
        let query = SqlValue::from(audit.modified_by).bind_to(query);
        let query = SqlValue::from(audit.modified_date).bind_to(query);

        cancellable(token, async { Ok(query.fetch_optional(&self.pool).await?) }).await
    }

    async fn delete(
        &self,
        id: Uuid,
        modified_by: &str,
        token: &CancellationToken,
    ) -> RepositoryResult<bool> {
        cancellable(token, async {
            let result = sqlx::query(&self.sql.soft_delete)
                .bind(id)
                .bind(modified_by)
                .execute(&self.pool)
                .await?;
            Ok(result.rows_affected() > 0)
        })
        .await
    }

    async fn exists(&self, id: Uuid, token: &CancellationToken) -> RepositoryResult<bool> {
        cancellable(token, async {
            let exists = sqlx::query_scalar::<_, bool>(&self.sql.exists)
                .bind(id)
                .fetch_one(&self.pool)
                .await?;
            Ok(exists)
        })
        .await
    }
}

#[async_trait]
impl<T: Record + Defaultable> DefaultRepository<T> for PgRepository<T> {
    async fn get_default(&self, token: &CancellationToken) -> RepositoryResult<Option<T>> {
        let sql = select_default_sql::<T>();
        cancellable(token, async {
            let row = sqlx::query_as::<_, T>(&sql)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        })
        .await
    }
}

#[async_trait]
impl<T: NamedRecord> NamedRepository<T> for PgRepository<T> {
    async fn get_by_name(
        &self,
        name: &str,
        token: &CancellationToken,
    ) -> RepositoryResult<Option<T>> {
        let sql = select_by_name_sql::<T>();
        cancellable(token, async {
            let row = sqlx::query_as::<_, T>(&sql)
                .bind(name)
                .fetch_optional(&self.pool)
                .await?;
            Ok(row)
        })
        .await
    }
}

#[async_trait]
impl<T: TotaledRecord> TotalRepository<T> for PgRepository<T> {
    async fn get_total_for(
        &self,
        group_id: Uuid,
        token: &CancellationToken,
    ) -> RepositoryResult<Decimal> {
        let sql = total_sql::<T>();
        cancellable(token, async {
            let total = sqlx::query_scalar::<_, Decimal>(&sql)
                .bind(group_id)
                .fetch_one(&self.pool)
                .await?;
            Ok(total)
        })
        .await
    }
}
