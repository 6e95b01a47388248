//! Request authentication
//!
//! Turns the `Authorization` header of a request into a [`CurrentUser`].

use std::sync::Arc;

use crm_core::config::AuthConfig;
use crm_core::CrmError;
use thiserror::Error;

use crate::jwt::{extract_bearer_token, JwtError, TokenService};
use crate::principal::CurrentUser;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("Authentication required")]
    Required,
    #[error("Token expired")]
    TokenExpired,
    #[error("Invalid credentials: {0}")]
    InvalidCredentials(String),
}

impl From<JwtError> for AuthError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => AuthError::TokenExpired,
            JwtError::Missing => AuthError::Required,
            other => AuthError::InvalidCredentials(other.to_string()),
        }
    }
}

impl From<AuthError> for CrmError {
    fn from(err: AuthError) -> Self {
        CrmError::Unauthorized(err.to_string())
    }
}

#[derive(Clone)]
pub struct Authenticator {
    tokens: Arc<TokenService>,
    require_authentication: bool,
}

impl Authenticator {
    pub fn new(tokens: Arc<TokenService>, require_authentication: bool) -> Self {
        Self {
            tokens,
            require_authentication,
        }
    }

    pub fn from_config(config: &AuthConfig) -> Self {
        Self::new(
            Arc::new(TokenService::from_config(config)),
            config.require_authentication,
        )
    }

    pub fn tokens(&self) -> &TokenService {
        &self.tokens
    }

    /// Authenticate from the raw `Authorization` header value.
    ///
    /// A present header is always checked. A missing one yields the system
    /// principal unless authentication is required.
    pub fn authenticate(&self, authorization: Option<&str>) -> Result<CurrentUser, AuthError> {
        let Some(header) = authorization else {
            if self.require_authentication {
                return Err(AuthError::Required);
            }
            return Ok(CurrentUser::system());
        };

        let token = extract_bearer_token(header)
            .ok_or_else(|| AuthError::InvalidCredentials("Expected a bearer token".to_string()))?;

        let claims = self.tokens.validate_token(token).map_err(|err| {
            tracing::debug!(error = %err, "Token rejected");
            AuthError::from(err)
        })?;

        Ok(CurrentUser::from_claims(claims)?)
    }
}
