//! Leaderboard endpoint

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use encore_core::{LeaderboardEntry, LeaderboardQuery, RankMode, Window};
use serde::{Deserialize, Serialize};

use crate::AppState;

use super::ErrorResponse;

/// Query params for GET /api/leaderboard
#[derive(Debug, Deserialize)]
pub struct LeaderboardParams {
    pub limit: Option<u32>,
    pub window: Option<String>,
    pub mode: Option<String>,
}

impl From<LeaderboardParams> for LeaderboardQuery {
    fn from(params: LeaderboardParams) -> Self {
        Self {
            limit: params.limit,
            window: params.window.as_deref().map(Window::parse).unwrap_or_default(),
            mode: params.mode.as_deref().map(RankMode::parse).unwrap_or_default(),
        }
    }
}

#[derive(Serialize)]
struct LeaderboardResponse {
    entries: Vec<LeaderboardEntry>,
}

/// GET /api/leaderboard
pub async fn leaderboard(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LeaderboardParams>,
) -> impl IntoResponse {
    match state.leaderboard.leaderboard(&params.into()).await {
        Ok(entries) => Json(LeaderboardResponse { entries }).into_response(),
        Err(e) => (
            StatusCode::INTERNAL_SERVER_ERROR,
            Json(ErrorResponse {
                error: e.to_string(),
                code: "STORE".into(),
            }),
        )
            .into_response(),
    }
}
