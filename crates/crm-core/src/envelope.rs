//! Uniform response envelope
//!
//! Every API response, success or failure, is wrapped in [`ApiResponse`]:
//! `{ "success", "message", "data", "errors" }`.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ApiResponse<T> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
    pub errors: Option<Vec<String>>,
}

impl<T> ApiResponse<T> {
    pub fn ok(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            errors: None,
        }
    }

    pub fn failure(message: impl Into<String>, errors: Vec<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            errors: Some(errors),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_success_envelope() {
        let body = ApiResponse::ok(true, "Role deleted successfully");
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": true,
                "message": "Role deleted successfully",
                "data": true,
                "errors": null
            })
        );
    }

    #[test]
    fn test_failure_envelope() {
        let body: ApiResponse<()> =
            ApiResponse::failure("Validation failed", vec!["Activity ID is required".into()]);
        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            json!({
                "success": false,
                "message": "Validation failed",
                "data": null,
                "errors": ["Activity ID is required"]
            })
        );
    }
}
