//! # crm-auth
//!
//! Authentication for CRM RS.
//!
//! ## Features
//!
//! - JWT bearer tokens (HS256, issuer and audience checked)
//! - The current-user principal used as the audit actor
//! - An authenticator that turns an `Authorization` header into a principal

pub mod authenticator;
pub mod jwt;
pub mod principal;

pub use authenticator::{AuthError, Authenticator};
pub use jwt::{extract_bearer_token, Claims, JwtError, TokenService};
pub use principal::CurrentUser;
