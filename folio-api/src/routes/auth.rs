/// Authentication endpoints
///
/// # Endpoints
///
/// - `POST /api/register` - Register new user
/// - `POST /api/login` - Login and get a session token

use crate::{app::AppState, error::ApiResult, response::ApiResponse};
use axum::{extract::rejection::JsonRejection, extract::State, http::StatusCode, Json};
use serde::{Deserialize, Serialize};

/// Register request
#[derive(Debug, Deserialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
}

/// Login request
#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Login response
///
/// The envelope fields plus the token at the top level.
#[derive(Debug, Serialize, Deserialize)]
pub struct LoginResponse {
    pub success: bool,
    pub message: String,

    /// Signed session token carrying the `email` claim
    pub token: String,
}

/// Register a new user
///
/// # Endpoint
///
/// ```text
/// POST /api/register
/// Content-Type: application/json
///
/// { "name": "Ada", "email": "ada@example.com", "password": "hunter22" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "message": "User registered successfully" }
/// ```
///
/// # Errors
///
/// - `400 Bad Request`: Malformed body or email already registered
/// - `503 Service Unavailable`: Store unreachable
pub async fn register(
    State(state): State<AppState>,
    payload: Result<Json<RegisterRequest>, JsonRejection>,
) -> ApiResult<ApiResponse<()>> {
    let Json(req) = payload?;

    state
        .auth
        .register(&req.name, &req.email, &req.password)
        .await?;

    Ok(ApiResponse::message(
        StatusCode::CREATED,
        "User registered successfully",
    ))
}

/// Login and get a session token
///
/// # Endpoint
///
/// ```text
/// POST /api/login
/// Content-Type: application/json
///
/// { "email": "ada@example.com", "password": "hunter22" }
/// ```
///
/// # Response
///
/// ```json
/// { "success": true, "message": "Login successful", "token": "eyJ..." }
/// ```
///
/// # Errors
///
/// - `401 Unauthorized`: Unknown email or wrong password, `{message}` only
pub async fn login(
    State(state): State<AppState>,
    payload: Result<Json<LoginRequest>, JsonRejection>,
) -> ApiResult<Json<LoginResponse>> {
    let Json(req) = payload?;

    let token = state.auth.login(&req.email, &req.password).await?;

    Ok(Json(LoginResponse {
        success: true,
        message: "Login successful".to_string(),
        token,
    }))
}
