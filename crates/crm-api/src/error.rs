//! API error handling
//!
//! The single place where failures become HTTP statuses. Every error body is
//! an `ApiResponse` envelope. Server-side failures never expose their detail
//! outside Development.

use std::any::Any;
use std::backtrace::Backtrace;

use axum::{
    extract::{Request, State},
    http::{header, StatusCode},
    middleware::{self, Next},
    response::{IntoResponse, Response},
    Json, Router,
};
use crm_core::config::Environment;
use crm_core::{ApiResponse, CrmError, ValidationErrors};
use tower_http::catch_panic::CatchPanicLayer;

pub const GENERIC_MESSAGE: &str = "An error occurred while processing your request.";
pub const GENERIC_ERROR: &str = "An unexpected error occurred. Please try again later.";

#[derive(Debug)]
pub enum ApiError {
    NotFound { resource: &'static str, id: String },
    Validation(ValidationErrors),
    Unauthorized(String),
    BadRequest(String),
    Internal(String),
}

impl ApiError {
    pub fn not_found(resource: &'static str, id: impl std::fmt::Display) -> Self {
        ApiError::NotFound {
            resource,
            id: id.to_string(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        ApiError::BadRequest(msg.into())
    }

    pub fn unauthorized(msg: impl Into<String>) -> Self {
        ApiError::Unauthorized(msg.into())
    }

    pub fn internal(msg: impl Into<String>) -> Self {
        ApiError::Internal(msg.into())
    }

    pub fn status_code(&self) -> StatusCode {
        match self {
            ApiError::NotFound { .. } => StatusCode::NOT_FOUND,
            ApiError::Validation(_) | ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::Internal(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<CrmError> for ApiError {
    fn from(err: CrmError) -> Self {
        match err {
            CrmError::Validation(errors) => ApiError::Validation(errors),
            CrmError::NotFound { entity, id } => ApiError::NotFound { resource: entity, id },
            CrmError::BadRequest(msg) => ApiError::BadRequest(msg),
            CrmError::Unauthorized(msg) => ApiError::Unauthorized(msg),
            other @ (CrmError::Database(_) | CrmError::Cancelled | CrmError::Internal(_)) => {
                ApiError::Internal(other.to_string())
            }
        }
    }
}

/// Detail and trace of a 500 response, kept out of the body unless Development
#[derive(Debug, Clone)]
pub struct ErrorDetail {
    pub message: String,
    pub trace: String,
}

fn envelope(status: StatusCode, message: impl Into<String>, errors: Vec<String>) -> Response {
    (status, Json(ApiResponse::<()>::failure(message, errors))).into_response()
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        match self {
            ApiError::Validation(errors) => envelope(status, "Validation failed", errors.messages()),
            ApiError::NotFound { resource, id } => {
                let message = format!("{resource} with id {id} was not found");
                envelope(status, message.clone(), vec![message])
            }
            ApiError::BadRequest(msg) => envelope(status, msg.clone(), vec![msg]),
            ApiError::Unauthorized(msg) => envelope(status, "Unauthorized access", vec![msg]),
            ApiError::Internal(detail) => {
                tracing::error!(error = %detail, "Unhandled error");
                let mut response = envelope(status, GENERIC_MESSAGE, vec![GENERIC_ERROR.to_string()]);
                response.extensions_mut().insert(ErrorDetail {
                    message: detail,
                    trace: Backtrace::force_capture().to_string(),
                });
                response
            }
        }
    }
}

pub type ApiResult<T> = Result<T, ApiError>;

/// Render a handler panic through the 500 path
pub fn panic_response(panic: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = panic.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = panic.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };

    ApiError::Internal(format!("Handler panicked: {detail}")).into_response()
}

/// Rewrite 500 bodies with their detail when running in Development
pub async fn expose_error_details(
    State(environment): State<Environment>,
    request: Request,
    next: Next,
) -> Response {
    let response = next.run(request).await;
    if !environment.is_development() {
        return response;
    }

    match response.extensions().get::<ErrorDetail>().cloned() {
        Some(ErrorDetail { message, trace }) => {
            envelope(response.status(), GENERIC_MESSAGE, vec![message, trace])
        }
        None => response,
    }
}

/// Wrap error responses produced outside the handlers (405, timeouts,
/// unmatched routes) in the envelope
pub async fn envelope_bare_errors(request: Request, next: Next) -> Response {
    let response = next.run(request).await;
    let status = response.status();
    if !(status.is_client_error() || status.is_server_error()) {
        return response;
    }

    let is_json = response
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .is_some_and(|value| value.starts_with("application/json"));
    if is_json {
        return response;
    }

    if status.is_server_error() {
        return envelope(status, GENERIC_MESSAGE, vec![GENERIC_ERROR.to_string()]);
    }
    let message = status.canonical_reason().unwrap_or("Request failed");
    envelope(status, message, vec![message.to_string()])
}

/// Panic capture and error detail disclosure for a router
pub fn handle_errors<S>(router: Router<S>, environment: Environment) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    router
        .layer(CatchPanicLayer::custom(panic_response))
        .layer(middleware::from_fn_with_state(environment, expose_error_details))
        .layer(middleware::from_fn(envelope_bare_errors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::{to_bytes, Body};
    use axum::http::Request as HttpRequest;
    use axum::routing::get;
    use serde_json::{json, Value};
    use tower::ServiceExt;

    async fn body_json(response: Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn boom() -> &'static str {
        panic!("boom")
    }

    async fn failing() -> ApiResult<&'static str> {
        Err(CrmError::Database("connection reset".into()).into())
    }

    fn app(environment: Environment) -> Router {
        handle_errors(
            Router::new().route("/boom", get(boom)).route("/failing", get(failing)),
            environment,
        )
    }

    #[tokio::test]
    async fn test_method_not_allowed_uses_envelope() {
        let request = HttpRequest::builder()
            .method("POST")
            .uri("/failing")
            .body(Body::empty())
            .unwrap();
        let response = app(Environment::Production).oneshot(request).await.unwrap();

        assert_eq!(response.status(), StatusCode::METHOD_NOT_ALLOWED);
        let body = body_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Method Not Allowed");
    }

    async fn call(app: Router, uri: &str) -> Response {
        app.oneshot(HttpRequest::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_validation_maps_to_400() {
        let mut errors = ValidationErrors::new();
        errors.add("id", "Activity ID is required");
        errors.add("subject", "Activity subject is required");

        let response = ApiError::from(CrmError::Validation(errors)).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": false,
                "message": "Validation failed",
                "data": null,
                "errors": ["Activity ID is required", "Activity subject is required"]
            })
        );
    }

    #[tokio::test]
    async fn test_unauthorized_uses_fixed_message() {
        let response = ApiError::unauthorized("Token expired").into_response();
        assert_eq!(response.status(), StatusCode::UNAUTHORIZED);
        assert_eq!(body_json(response).await["message"], "Unauthorized access");
    }

    #[tokio::test]
    async fn test_not_found_and_bad_request() {
        let response = ApiError::not_found("Company", "42").into_response();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["message"], "Company with id 42 was not found");

        let response = ApiError::from(CrmError::bad_request("Role with id 1 already exists")).into_response();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_panic_in_production_hides_detail() {
        let response = call(app(Environment::Production), "/boom").await;

        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(
            body_json(response).await,
            json!({
                "success": false,
                "message": GENERIC_MESSAGE,
                "data": null,
                "errors": [GENERIC_ERROR]
            })
        );
    }

    #[tokio::test]
    async fn test_development_exposes_detail() {
        let response = call(app(Environment::Development), "/boom").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        let body = body_json(response).await;
        assert!(body["errors"][0].as_str().unwrap().contains("boom"));
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
        assert!(!body["errors"][1].as_str().unwrap().is_empty());

        let response = call(app(Environment::Development), "/failing").await;
        let body = body_json(response).await;
        assert!(body["errors"][0].as_str().unwrap().contains("connection reset"));
        assert_eq!(body["errors"].as_array().unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_database_error_in_production_is_generic() {
        let response = call(app(Environment::Production), "/failing").await;
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
        assert_eq!(body_json(response).await["errors"], json!([GENERIC_ERROR]));
    }
}
