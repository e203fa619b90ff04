/// Liveness and health endpoints
///
/// # Endpoints
///
/// ```text
/// GET /         liveness, never touches storage
/// GET /health   storage probe
/// ```
///
/// # Response (`/health`)
///
/// ```json
/// {
///   "status": "healthy",
///   "version": "0.1.0",
///   "store": "postgres",
///   "database": "connected"
/// }
/// ```

use crate::{app::AppState, error::ApiResult};
use axum::{extract::State, Json};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Liveness response
#[derive(Debug, Serialize, Deserialize)]
pub struct LivenessResponse {
    pub message: String,
    pub timestamp: DateTime<Utc>,
}

/// Health check response
#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    /// Service status
    pub status: String,

    /// Application version
    pub version: String,

    /// Storage backend name
    pub store: String,

    /// Storage status
    pub database: String,
}

pub async fn liveness() -> Json<LivenessResponse> {
    Json(LivenessResponse {
        message: "Server is running !!!".to_string(),
        timestamp: Utc::now(),
    })
}

/// Health check handler
///
/// Always 200; a failed probe is reported as `degraded`.
pub async fn health_check(State(state): State<AppState>) -> ApiResult<Json<HealthResponse>> {
    let database_status = match state.store.health_check().await {
        Ok(()) => "connected",
        Err(err) => {
            tracing::warn!(error = %err, "Store health check failed");
            "disconnected"
        }
    };

    Ok(Json(HealthResponse {
        status: if database_status == "connected" {
            "healthy".to_string()
        } else {
            "degraded".to_string()
        },
        version: folio_shared::VERSION.to_string(),
        store: state.store.backend_name().to_string(),
        database: database_status.to_string(),
    }))
}
