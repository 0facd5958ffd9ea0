//! Stream accounting endpoints

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::AppState;

use super::accounting_error_response;

/// Body for POST /api/streams
#[derive(Debug, Deserialize)]
pub struct RecordStreamsRequest {
    pub listener_token: String,
    pub wallet_address: String,
    #[serde(default)]
    pub referral_code: Option<String>,
}

/// Query params for GET /api/streams
#[derive(Debug, Deserialize)]
pub struct StreamCountQuery {
    #[serde(default)]
    pub listener_token: String,
}

#[derive(Serialize)]
struct StreamCountResponse {
    total_plays: u64,
}

/// POST /api/streams
pub async fn record_streams(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RecordStreamsRequest>,
) -> impl IntoResponse {
    let result = state
        .accounting
        .record_stream_activity(
            &request.listener_token,
            &request.wallet_address,
            request.referral_code.as_deref(),
        )
        .await;

    match result {
        Ok(summary) => Json(summary).into_response(),
        Err(e) => {
            tracing::debug!(error = %e, "stream accounting update failed");
            let (status, body) = accounting_error_response(e);
            (status, Json(body)).into_response()
        }
    }
}

/// GET /api/streams?listener_token=
pub async fn stream_count(
    State(state): State<Arc<AppState>>,
    Query(query): Query<StreamCountQuery>,
) -> impl IntoResponse {
    match state.accounting.stream_count(&query.listener_token).await {
        Ok(total_plays) => Json(StreamCountResponse { total_plays }).into_response(),
        Err(e) => {
            let (status, body) = accounting_error_response(e);
            (status, Json(body)).into_response()
        }
    }
}
