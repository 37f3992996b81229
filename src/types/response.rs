use axum::{response::IntoResponse, Json};
use serde::Serialize;

use super::Paginated;

/// Standard API response envelope: `{success, message, data}`
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub message: String,
    pub data: Option<T>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn with_message(data: T, message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
        }
    }
}

impl ApiResponse<()> {
    /// Message-only envelope; `data` is serialized as `null`.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

impl<T: Serialize> IntoResponse for Paginated<T> {
    fn into_response(self) -> axum::response::Response {
        Json(self).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_message_only_keeps_null_data() {
        let body = serde_json::to_value(ApiResponse::message("User deleted successfully")).unwrap();
        assert_eq!(
            body,
            json!({"success": true, "message": "User deleted successfully", "data": null})
        );
    }
}
