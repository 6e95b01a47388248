//! JWT tokens
//!
//! HS256 tokens carrying the user's id and login. Issuer and audience are
//! checked on every validation.

use chrono::{DateTime, Duration, Utc};
use crm_core::config::{AuthConfig, MAX_TOKEN_EXPIRATION_SECONDS};
use crm_models::User;
use jsonwebtoken::errors::ErrorKind;
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use thiserror::Error;
use uuid::Uuid;

/// JWT claims
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Subject (user ID)
    pub sub: String,
    /// Expiration time (Unix timestamp)
    pub exp: i64,
    /// Issued at (Unix timestamp)
    pub iat: i64,
    pub iss: String,
    pub aud: String,
    /// JWT ID
    pub jti: String,
    pub username: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl Claims {
    pub fn user_id(&self) -> Result<Uuid, JwtError> {
        Uuid::parse_str(&self.sub).map_err(|_| JwtError::Invalid("Invalid user ID in token".to_string()))
    }
}

#[derive(Debug, Error)]
pub enum JwtError {
    #[error("Token is expired")]
    Expired,
    #[error("Invalid token: {0}")]
    Invalid(String),
    #[error("Missing token")]
    Missing,
    #[error("Token encoding failed: {0}")]
    EncodingFailed(String),
}

/// Issues and checks bearer tokens
pub struct TokenService {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    issuer: String,
    audience: String,
    lifetime: Duration,
}

impl TokenService {
    pub fn new(secret: &[u8], issuer: impl Into<String>, audience: impl Into<String>) -> Self {
        Self {
            encoding_key: EncodingKey::from_secret(secret),
            decoding_key: DecodingKey::from_secret(secret),
            issuer: issuer.into(),
            audience: audience.into(),
            lifetime: Duration::hours(1),
        }
    }

    /// Lifetimes past the configuration bound are clamped to it
    pub fn from_config(config: &AuthConfig) -> Self {
        let seconds = config.token_expiration_seconds.min(MAX_TOKEN_EXPIRATION_SECONDS);
        let lifetime = i64::try_from(seconds)
            .ok()
            .and_then(Duration::try_seconds)
            .unwrap_or_else(|| Duration::hours(1));
        Self::new(config.jwt_secret.as_bytes(), &config.issuer, &config.audience)
            .with_lifetime(lifetime)
    }

    pub fn with_lifetime(mut self, lifetime: Duration) -> Self {
        self.lifetime = lifetime;
        self
    }

    /// Issue a token for `user`
    pub fn generate_token(&self, user: &User) -> Result<String, JwtError> {
        let now = Utc::now();
        let expires = now
            .checked_add_signed(self.lifetime)
            .ok_or_else(|| JwtError::EncodingFailed("Token lifetime out of range".to_string()))?;
        let claims = Claims {
            sub: user.id.to_string(),
            exp: expires.timestamp(),
            iat: now.timestamp(),
            iss: self.issuer.clone(),
            aud: self.audience.clone(),
            jti: Uuid::new_v4().to_string(),
            username: user.username.clone(),
            email: (!user.email.is_empty()).then(|| user.email.clone()),
        };

        self.encode(&claims)
    }

    fn encode(&self, claims: &Claims) -> Result<String, JwtError> {
        encode(&Header::new(Algorithm::HS256), claims, &self.encoding_key)
            .map_err(|e| JwtError::EncodingFailed(e.to_string()))
    }

    fn validation(&self, check_expiry: bool) -> Validation {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_issuer(&[self.issuer.as_str()]);
        validation.set_audience(&[self.audience.as_str()]);
        validation.validate_exp = check_expiry;
        validation.leeway = 0;
        validation
    }

    fn decode(&self, token: &str, check_expiry: bool) -> Result<Claims, JwtError> {
        decode::<Claims>(token, &self.decoding_key, &self.validation(check_expiry))
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => JwtError::Expired,
                _ => JwtError::Invalid(e.to_string()),
            })
    }

    /// Verify signature, issuer, audience and expiry
    pub fn validate_token(&self, token: &str) -> Result<Claims, JwtError> {
        self.decode(token, true)
    }

    /// Expiry of a correctly signed token, expired or not
    pub fn get_token_expiry(&self, token: &str) -> Result<DateTime<Utc>, JwtError> {
        let claims = self.decode(token, false)?;
        DateTime::<Utc>::from_timestamp(claims.exp, 0)
            .ok_or_else(|| JwtError::Invalid("Expiry out of range".to_string()))
    }

    /// Unreadable tokens count as expired
    pub fn is_token_expired(&self, token: &str) -> bool {
        self.get_token_expiry(token)
            .map(|expiry| expiry <= Utc::now())
            .unwrap_or(true)
    }
}

/// Extract bearer token from Authorization header
pub fn extract_bearer_token(authorization: &str) -> Option<&str> {
    let (scheme, token) = authorization.split_once(' ')?;
    let token = token.trim();
    (scheme.eq_ignore_ascii_case("bearer") && !token.is_empty()).then_some(token)
}
