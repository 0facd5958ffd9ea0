//! Health endpoint

use std::sync::Arc;

use axum::{extract::State, Json};
use serde::Serialize;

use crate::AppState;

/// Response for the health endpoint
#[derive(Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub uptime_seconds: i64,
}

/// GET /api/health
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok".to_string(),
        uptime_seconds: state.uptime_seconds(),
    })
}
