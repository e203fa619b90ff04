/// Response envelope
///
/// Every successful response (and most errors) share one JSON shape:
///
/// ```json
/// { "success": true, "message": "Projects are retrieved successfully!", "data": [...] }
/// ```
///
/// `data` is omitted when there is nothing to return. Login additionally puts
/// the token at the top level (see [`crate::routes::auth::LoginResponse`]).

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Uniform `{success, message, data?}` body
#[derive(Debug, Serialize, Deserialize)]
pub struct Envelope<T> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
}

/// An envelope paired with its status code
#[derive(Debug)]
pub struct ApiResponse<T> {
    status: StatusCode,
    body: Envelope<T>,
}

impl<T> ApiResponse<T> {
    /// 200 with data
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::OK, message, Some(data))
    }

    /// 201 with data
    pub fn created(message: impl Into<String>, data: T) -> Self {
        Self::with_status(StatusCode::CREATED, message, Some(data))
    }

    pub fn with_status(status: StatusCode, message: impl Into<String>, data: Option<T>) -> Self {
        Self {
            status,
            body: Envelope {
                success: status.is_success(),
                message: message.into(),
                data,
            },
        }
    }

    pub fn status(&self) -> StatusCode {
        self.status
    }
}

impl ApiResponse<()> {
    /// Envelope without `data`
    pub fn message(status: StatusCode, message: impl Into<String>) -> Self {
        Self::with_status(status, message, None)
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (self.status, Json(self.body)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_envelope_omits_missing_data() {
        let response = ApiResponse::message(StatusCode::CREATED, "User registered successfully");
        assert_eq!(response.status(), StatusCode::CREATED);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({ "success": true, "message": "User registered successfully" })
        );
    }

    #[test]
    fn test_error_status_is_unsuccessful() {
        let response = ApiResponse::message(StatusCode::NOT_FOUND, "Project not found");
        assert!(!response.body.success);
    }

    #[test]
    fn test_ok_includes_data() {
        let response = ApiResponse::ok("done", vec![1, 2]);
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            serde_json::to_value(&response.body).unwrap(),
            json!({ "success": true, "message": "done", "data": [1, 2] })
        );
    }
}
