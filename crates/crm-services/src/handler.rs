//! Handler contract

use async_trait::async_trait;
use crm_core::{CrmError, CrmResult};
use crm_db::RepositoryResult;
use crm_models::Request;
use tokio_util::sync::CancellationToken;

/// Executes one request type end to end
#[async_trait]
pub trait RequestHandler<Q: Request>: Send + Sync {
    async fn handle(&self, request: Q, token: &CancellationToken) -> CrmResult<Q::Response>;
}

/// Convert a repository failure, logging it with the failing action
pub(crate) fn logged<T>(result: RepositoryResult<T>, entity: &str, action: &str) -> CrmResult<T> {
    result.map_err(|err| {
        tracing::error!(entity, action, error = %err, "Repository call failed");
        CrmError::from(err)
    })
}
