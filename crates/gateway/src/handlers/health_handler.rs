//! Health check handlers.

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Json, Response},
    routing::get,
    Router,
};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::state::AppState;

/// Health check response.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct HealthResponse {
    pub status: String,
    pub storage: StorageHealth,
}

/// Storage health with optional error message.
#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct StorageHealth {
    /// `database` or `memory`
    pub backend: String,
    pub status: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

/// Create health routes.
pub fn health_routes() -> Router<AppState> {
    Router::new().route("/", get(health_check))
}

/// Service banner.
pub async fn index() -> Json<serde_json::Value> {
    Json(serde_json::json!({ "message": "ReliefConnect API running" }))
}

/// Health check endpoint - pings the person store.
#[utoipa::path(
    get,
    path = "/health",
    tag = "Health",
    responses(
        (status = 200, description = "Storage reachable", body = HealthResponse),
        (status = 503, description = "Storage unreachable", body = HealthResponse)
    )
)]
pub async fn health_check(State(state): State<AppState>) -> Response {
    let storage = match &state.database {
        Some(db) => match db.ping().await {
            Ok(()) => StorageHealth {
                backend: "database".to_string(),
                status: "healthy".to_string(),
                error: None,
            },
            Err(e) => {
                tracing::error!("Health check failed: {}", e);
                StorageHealth {
                    backend: "database".to_string(),
                    status: "unhealthy".to_string(),
                    error: Some("database unreachable".to_string()),
                }
            }
        },
        None => StorageHealth {
            backend: "memory".to_string(),
            status: "healthy".to_string(),
            error: None,
        },
    };

    let healthy = storage.status == "healthy";

    let response = HealthResponse {
        status: if healthy { "healthy" } else { "degraded" }.to_string(),
        storage,
    };

    if healthy {
        (StatusCode::OK, Json(response)).into_response()
    } else {
        (StatusCode::SERVICE_UNAVAILABLE, Json(response)).into_response()
    }
}
