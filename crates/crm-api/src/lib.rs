//! # crm-api
//!
//! REST API for CRM RS.
//!
//! Every entity is served by the same generic handlers; a route only picks
//! the entity type. Responses use the `ApiResponse` envelope and failures are
//! translated to HTTP in one place ([`error::ApiError`]).

pub mod error;
pub mod extractors;
pub mod handlers;
pub mod routes;
pub mod state;

pub use error::{ApiError, ApiResult};
pub use routes::{app, router};
pub use state::AppState;
