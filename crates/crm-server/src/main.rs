//! CRM RS Server
//!
//! Loads configuration, picks the storage backend, wires the request
//! pipeline and serves the API until shutdown.

use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio_util::sync::CancellationToken;
use tower::ServiceBuilder;
use tower_http::{
    compression::CompressionLayer,
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use crm_api::AppState;
use crm_core::config::{AppConfig, LoggingConfig};
use crm_db::{Database, DatabaseConfig, MemoryBackend, PgBackend};
use crm_services::{register_features, Mediator};

mod health;

use health::HealthChecker;

const DEFAULT_FILTER: &str = "info,crm_server=debug,crm_api=debug,tower_http=debug";

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::load()?;

    init_tracing(&config.logging);

    info!(
        version = env!("CARGO_PKG_VERSION"),
        environment = config.environment.as_str(),
        host = %config.server.host,
        port = config.server.port,
        "Starting CRM RS"
    );

    let mut mediator = Mediator::new();
    let mut health = HealthChecker::new(config.environment.as_str());

    let db_config = DatabaseConfig::from_app_config(&config);
    let database = if db_config.is_configured() {
        let database = Database::connect(&db_config).await?;
        info!("Connected to database");
        register_features(&mut mediator, &PgBackend::new(&database));
        health = health.with_database(database.clone());
        Some(database)
    } else {
        warn!("No default connection configured, using in-memory repositories");
        register_features(&mut mediator, &MemoryBackend::new());
        None
    };

    let shutdown = CancellationToken::new();
    let state = AppState::new(mediator, config.clone()).with_shutdown(shutdown.clone());
    let app = build_router(state, Arc::new(health), &config);

    let addr = config.server_addr();
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal(shutdown))
        .await?;

    if let Some(database) = database {
        database.close().await;
    }

    info!("Server shutdown complete");
    Ok(())
}

/// Initialize tracing/logging
fn init_tracing(logging: &LoggingConfig) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| {
        let directive = logging.filter.as_deref().unwrap_or(DEFAULT_FILTER);
        EnvFilter::try_new(directive).unwrap_or_else(|_| EnvFilter::new(DEFAULT_FILTER))
    });

    let json = logging.json.then(|| tracing_subscriber::fmt::layer().json().with_target(true));
    let text = (!logging.json).then(|| {
        tracing_subscriber::fmt::layer()
            .with_target(true)
            .with_thread_ids(true)
            .with_file(true)
            .with_line_number(true)
    });

    tracing_subscriber::registry()
        .with(filter)
        .with(json)
        .with(text)
        .init();
}

/// Build the application router
fn build_router(state: AppState, health: Arc<HealthChecker>, config: &AppConfig) -> Router {
    let health_routes = Router::new()
        .route("/health/live", get(health::liveness))
        .route("/health/ready", get(health::readiness))
        .with_state(health);

    Router::new()
        .merge(health_routes)
        .merge(crm_api::app(state))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(middleware::from_fn(crm_api::error::envelope_bare_errors))
                .layer(TimeoutLayer::new(Duration::from_secs(
                    config.server.request_timeout_seconds,
                )))
                .layer(CompressionLayer::new())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
}

/// Wait for Ctrl+C or SIGTERM, then cancel every in-flight request token
async fn shutdown_signal(shutdown: CancellationToken) {
    let ctrl_c = async {
        if let Err(e) = tokio::signal::ctrl_c().await {
            warn!(error = %e, "Failed to listen for Ctrl+C");
            std::future::pending::<()>().await;
        }
    };

    #[cfg(unix)]
    let terminate = async {
        match tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate()) {
            Ok(mut signal) => {
                signal.recv().await;
            }
            Err(e) => {
                warn!(error = %e, "Failed to install SIGTERM handler");
                std::future::pending::<()>().await;
            }
        }
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            info!("Received Ctrl+C, initiating graceful shutdown");
        }
        _ = terminate => {
            info!("Received SIGTERM, initiating graceful shutdown");
        }
    }

    shutdown.cancel();
}

#[cfg(test)]
mod tests {
    use super::*;
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use http_body_util::BodyExt;
    use tower::ServiceExt;

    fn test_app() -> Router {
        let mut config = AppConfig::default();
        config.auth.require_authentication = false;

        let mut mediator = Mediator::new();
        register_features(&mut mediator, &MemoryBackend::new());

        let state = AppState::new(mediator, config.clone());
        build_router(state, Arc::new(HealthChecker::new("Production")), &config)
    }

    async fn get(app: Router, uri: &str) -> axum::response::Response {
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    #[tokio::test]
    async fn test_liveness() {
        let response = get(test_app(), "/health/live").await;
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_readiness_reports_storage() {
        let response = get(test_app(), "/health/ready").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let report: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(report["status"], "healthy");
        assert_eq!(report["components"][0]["name"], "storage");
    }

    #[tokio::test]
    async fn test_api_is_mounted() {
        let response = get(test_app(), "/api/account-types").await;
        assert_eq!(response.status(), StatusCode::OK);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], true);
        assert_eq!(body["data"], serde_json::json!([]));
    }

    #[tokio::test]
    async fn test_unknown_route_is_404() {
        let response = get(test_app(), "/api/nothing-here").await;
        assert_eq!(response.status(), StatusCode::NOT_FOUND);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
    }

    #[tokio::test]
    async fn test_timeout_uses_envelope() {
        async fn slow() -> &'static str {
            tokio::time::sleep(Duration::from_secs(5)).await;
            "late"
        }

        let app = Router::new().route("/slow", axum::routing::get(slow)).layer(
            ServiceBuilder::new()
                .layer(middleware::from_fn(crm_api::error::envelope_bare_errors))
                .layer(TimeoutLayer::new(Duration::from_millis(20))),
        );

        let response = get(app, "/slow").await;
        assert_eq!(response.status(), StatusCode::REQUEST_TIMEOUT);

        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        let body: serde_json::Value = serde_json::from_slice(&bytes).unwrap();
        assert_eq!(body["success"], false);
        assert_eq!(body["message"], "Request Timeout");
    }
}
