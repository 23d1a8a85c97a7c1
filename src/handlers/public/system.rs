use axum::{extract::State, http::StatusCode, response::IntoResponse, Json};
use serde_json::{json, Value};
use tracing::error;

use crate::state::AppState;

/// GET / - service description and route overview
pub async fn root() -> Json<Value> {
    Json(json!({
        "success": true,
        "data": {
            "name": env!("CARGO_PKG_NAME"),
            "version": env!("CARGO_PKG_VERSION"),
            "description": env!("CARGO_PKG_DESCRIPTION"),
            "endpoints": {
                "login": "POST /users/login (public)",
                "users": "/users[/:id], /users/:id/requests, /users/role/:id (protected)",
                "requests": "/requests[/:id], /requests/:id/request-stages, /requests/:id/files (protected)",
                "request_stages": "/request-stages (protected)",
                "health": "/health (public)",
            }
        }
    }))
}

/// GET /health - 200 when the store answers, 503 otherwise
pub async fn health(State(state): State<AppState>) -> impl IntoResponse {
    let now = chrono::Utc::now();

    match state.health.health_check().await {
        Ok(()) => (
            StatusCode::OK,
            Json(json!({
                "success": true,
                "data": { "status": "ok", "timestamp": now, "storage": "ok" }
            })),
        ),
        Err(e) => {
            error!("Health check failed: {}", e);
            (
                StatusCode::SERVICE_UNAVAILABLE,
                Json(json!({
                    "success": false,
                    "error": "Storage unavailable",
                    "code": "SERVICE_UNAVAILABLE"
                })),
            )
        }
    }
}
