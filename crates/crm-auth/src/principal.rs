//! Current-user principal

use crm_core::SYSTEM_ACTOR;
use uuid::Uuid;

use crate::jwt::{Claims, JwtError};

/// The caller of a request
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrentUser {
    /// `None` for the system principal
    pub id: Option<Uuid>,
    pub username: String,
    pub email: Option<String>,
}

impl CurrentUser {
    /// Principal used when authentication is switched off
    pub fn system() -> Self {
        Self {
            id: None,
            username: SYSTEM_ACTOR.to_string(),
            email: None,
        }
    }

    pub fn from_claims(claims: Claims) -> Result<Self, JwtError> {
        Ok(Self {
            id: Some(claims.user_id()?),
            username: claims.username,
            email: claims.email,
        })
    }

    pub fn is_system(&self) -> bool {
        self.id.is_none()
    }

    /// Name written to `created_by` / `modified_by`
    pub fn actor(&self) -> &str {
        &self.username
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_system_principal() {
        let user = CurrentUser::system();
        assert!(user.is_system());
        assert_eq!(user.actor(), "system");
    }

    #[test]
    fn test_from_claims_rejects_bad_subject() {
        let claims = Claims {
            sub: "42".into(),
            exp: 0,
            iat: 0,
            iss: "crm-rs".into(),
            aud: "crm-rs-clients".into(),
            jti: "x".into(),
            username: "jdoe".into(),
            email: None,
        };
        assert!(CurrentUser::from_claims(claims).is_err());
    }
}
