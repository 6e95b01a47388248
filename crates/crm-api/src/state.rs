//! Shared application state

use std::sync::Arc;

use crm_auth::Authenticator;
use crm_core::config::AppConfig;
use crm_services::Mediator;
use tokio_util::sync::CancellationToken;

#[derive(Clone)]
pub struct AppState {
    pub mediator: Arc<Mediator>,
    pub config: Arc<AppConfig>,
    pub auth: Authenticator,
    /// Cancelled when the server shuts down; request tokens are its children
    pub shutdown: CancellationToken,
}

impl AppState {
    pub fn new(mediator: Mediator, config: AppConfig) -> Self {
        let auth = Authenticator::from_config(&config.auth);
        Self {
            mediator: Arc::new(mediator),
            config: Arc::new(config),
            auth,
            shutdown: CancellationToken::new(),
        }
    }

    pub fn with_shutdown(mut self, shutdown: CancellationToken) -> Self {
        self.shutdown = shutdown;
        self
    }
}
