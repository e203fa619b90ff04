/// Bearer-token guard for resource writes
///
/// Tokens are issued by `POST /api/login`. Whether resource routes require
/// one is a deployment choice (`REQUIRE_AUTH_FOR_WRITES`); when the flag is
/// off this layer is a pass-through. When it is on, POST/PUT/DELETE requests
/// must carry `Authorization: Bearer <token>` and reads stay public.
///
/// On success the validated identity is stored in request extensions as
/// [`AuthContext`].

use crate::{app::AppState, error::ApiError};
use axum::{
    extract::{Request, State},
    http::{header, Method},
    middleware::Next,
    response::Response,
};
use folio_shared::auth::jwt::Claims;

/// Identity of a caller that presented a valid token
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AuthContext {
    pub email: String,
}

impl From<Claims> for AuthContext {
    fn from(claims: Claims) -> Self {
        Self {
            email: claims.email,
        }
    }
}

fn is_read(method: &Method) -> bool {
    matches!(*method, Method::GET | Method::HEAD | Method::OPTIONS)
}

/// Extracts the token from an `Authorization` header value
pub fn bearer_token(value: &str) -> Option<&str> {
    value
        .strip_prefix("Bearer ")
        .map(str::trim)
        .filter(|token| !token.is_empty())
}

pub async fn write_guard(
    State(state): State<AppState>,
    mut req: Request,
    next: Next,
) -> Result<Response, ApiError> {
    if !state.config.api.require_auth_for_writes || is_read(req.method()) {
        return Ok(next.run(req).await);
    }

    let header_value = req
        .headers()
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| ApiError::Unauthorized("Missing authorization header".to_string()))?;

    let token = bearer_token(header_value)
        .ok_or_else(|| ApiError::Unauthorized("Expected Bearer token".to_string()))?;

    let claims = state.auth.verify_token(token)?;
    req.extensions_mut().insert(AuthContext::from(claims));

    Ok(next.run(req).await)
}
