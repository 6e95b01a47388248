//! Repository contract
//!
//! Every operation is async, takes the request's cancellation token, and
//! sees active rows only.

use std::future::Future;

use async_trait::async_trait;
use crm_core::{CrmError, Defaultable, Entity, Named, PagedResult, PaginationParams, Totaled};
use rust_decimal::Decimal;
use tokio_util::sync::CancellationToken;
use uuid::Uuid;

/// Error type for repository operations
#[derive(Debug, thiserror::Error)]
pub enum RepositoryError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Conflict: {0}")]
    Conflict(String),

    #[error("The operation was cancelled")]
    Cancelled,
}

/// Result type for repository operations
pub type RepositoryResult<T> = Result<T, RepositoryError>;

impl From<RepositoryError> for CrmError {
    fn from(err: RepositoryError) -> Self {
        match err {
            RepositoryError::Database(e) => CrmError::Database(e.to_string()),
            RepositoryError::Conflict(msg) => CrmError::BadRequest(msg),
            RepositoryError::Cancelled => CrmError::Cancelled,
        }
    }
}

/// Race a data-access future against the cancellation token
pub async fn cancellable<F, T>(token: &CancellationToken, operation: F) -> RepositoryResult<T>
where
    F: Future<Output = RepositoryResult<T>>,
{
    tokio::select! {
        biased;
        _ = token.cancelled() => Err(RepositoryError::Cancelled),
        result = operation => result,
    }
}

/// Base repository trait, one per entity
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// All active rows in display order
    async fn get_all(&self, token: &CancellationToken) -> RepositoryResult<Vec<T>>;

    /// One page of active rows in display order
    async fn get_page(
        &self,
        pagination: PaginationParams,
        token: &CancellationToken,
    ) -> RepositoryResult<PagedResult<T>>;

    /// `None` if the row is absent or inactive
    async fn get_by_id(&self, id: Uuid, token: &CancellationToken) -> RepositoryResult<Option<T>>;

    /// Insert a row. A nil id is replaced with a fresh one; an id that is
    /// already taken is a conflict.
    async fn add(&self, entity: T, token: &CancellationToken) -> RepositoryResult<T>;

    /// Write business fields and the modified stamp of an active row.
    /// The created stamp is never written.
    async fn update(&self, entity: T, token: &CancellationToken) -> RepositoryResult<Option<T>>;

    /// Soft delete. `false` when the row is absent or already inactive.
    async fn delete(
        &self,
        id: Uuid,
        modified_by: &str,
        token: &CancellationToken,
    ) -> RepositoryResult<bool>;

    /// Same visibility as `get_by_id`
    async fn exists(&self, id: Uuid, token: &CancellationToken) -> RepositoryResult<bool>;
}

/// Lookups with a default row
#[async_trait]
pub trait DefaultRepository<T: Defaultable>: Repository<T> {
    /// The active row flagged default, else the active row with the lowest ordinal
    async fn get_default(&self, token: &CancellationToken) -> RepositoryResult<Option<T>>;
}

#[async_trait]
pub trait NamedRepository<T: Named>: Repository<T> {
    /// Case-insensitive match on the entity's name
    async fn get_by_name(&self, name: &str, token: &CancellationToken)
        -> RepositoryResult<Option<T>>;
}

#[async_trait]
pub trait TotalRepository<T: Totaled>: Repository<T> {
    /// Sum of `amount` over active rows of one parent, zero when there are none
    async fn get_total_for(&self, group_id: Uuid, token: &CancellationToken)
        -> RepositoryResult<Decimal>;
}
