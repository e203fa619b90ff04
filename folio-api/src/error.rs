/// Error handling for the API server
///
/// Handlers return `ApiResult<T>`; every failure becomes a JSON body at the
/// request boundary. Most errors use the response envelope
/// (`{success: false, message}`); credential failures return a bare
/// `{message}` to match what existing clients expect from the auth routes.
///
/// | Variant | Status |
/// |---|---|
/// | `BadRequest`, `DuplicateUser` | 400 |
/// | `InvalidCredentials`, `Unauthorized` | 401 |
/// | `NotFound` | 404 |
/// | `InternalError` | 500 |
/// | `ServiceUnavailable` | 503 |

use crate::response::ApiResponse;
use axum::{
    extract::rejection::JsonRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use folio_shared::auth::{jwt::JwtError, service::AuthServiceError};
use folio_shared::store::StoreError;
use serde::{Deserialize, Serialize};

/// Message shared by both login failure modes
pub const INVALID_CREDENTIALS: &str = "Invalid email or password";

/// API result type alias
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    /// Malformed request body (400)
    #[error("Bad request: {0}")]
    BadRequest(String),

    /// Registration with a known email (400)
    #[error("User already exists")]
    DuplicateUser,

    /// Unknown email or wrong password (401)
    #[error("{}", INVALID_CREDENTIALS)]
    InvalidCredentials,

    /// Missing or invalid bearer token (401)
    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    /// Resource id absent or malformed (404)
    #[error("{0} not found")]
    NotFound(&'static str),

    /// Internal server error (500); details are logged, not returned
    #[error("Internal error: {0}")]
    InternalError(String),

    /// Storage backend unreachable (503)
    #[error("Service unavailable: {0}")]
    ServiceUnavailable(String),
}

/// Body for credential failures: message only, no `success` field
#[derive(Debug, Serialize, Deserialize)]
pub struct AuthErrorBody {
    pub message: String,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::BadRequest(_) | ApiError::DuplicateUser => StatusCode::BAD_REQUEST,
            ApiError::InvalidCredentials | ApiError::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::InternalError(_) => StatusCode::INTERNAL_SERVER_ERROR,
            ApiError::ServiceUnavailable(_) => StatusCode::SERVICE_UNAVAILABLE,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();

        match self {
            ApiError::InvalidCredentials => (
                status,
                Json(AuthErrorBody {
                    message: INVALID_CREDENTIALS.to_string(),
                }),
            )
                .into_response(),
            ApiError::Unauthorized(msg) => {
                (status, Json(AuthErrorBody { message: msg })).into_response()
            }
            ApiError::InternalError(msg) => {
                // Log internal errors but don't expose details to clients
                tracing::error!("Internal error: {}", msg);
                ApiResponse::message(status, "An internal error occurred").into_response()
            }
            ApiError::ServiceUnavailable(msg) => {
                tracing::error!("Storage unavailable: {}", msg);
                ApiResponse::message(status, "Service temporarily unavailable").into_response()
            }
            ApiError::BadRequest(msg) => ApiResponse::message(status, msg).into_response(),
            other => ApiResponse::message(status, other.to_string()).into_response(),
        }
    }
}

impl From<StoreError> for ApiError {
    fn from(err: StoreError) -> Self {
        match err {
            StoreError::Unavailable(msg) => ApiError::ServiceUnavailable(msg),
            StoreError::Conflict(msg) => ApiError::InternalError(format!("Unexpected conflict: {}", msg)),
            StoreError::Database(err) => ApiError::InternalError(format!("Database error: {}", err)),
        }
    }
}

impl From<AuthServiceError> for ApiError {
    fn from(err: AuthServiceError) -> Self {
        match err {
            AuthServiceError::DuplicateUser => ApiError::DuplicateUser,
            AuthServiceError::InvalidCredentials => ApiError::InvalidCredentials,
            AuthServiceError::Store(err) => err.into(),
            other => ApiError::InternalError(other.to_string()),
        }
    }
}

impl From<JwtError> for ApiError {
    fn from(err: JwtError) -> Self {
        match err {
            JwtError::Expired => ApiError::Unauthorized("Token expired".to_string()),
            JwtError::InvalidIssuer => ApiError::Unauthorized("Invalid token issuer".to_string()),
            JwtError::CreateError(msg) => ApiError::InternalError(msg),
            JwtError::ValidationError(_) => ApiError::Unauthorized("Invalid token".to_string()),
        }
    }
}

impl From<JsonRejection> for ApiError {
    fn from(rejection: JsonRejection) -> Self {
        ApiError::BadRequest(rejection.body_text())
    }
}
