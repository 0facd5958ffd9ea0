//! Referral link endpoint

use std::sync::Arc;

use axum::{extract::State, response::IntoResponse, Json};
use serde::{Deserialize, Serialize};

use crate::AppState;

use super::accounting_error_response;

/// Body for POST /api/referral-link
#[derive(Debug, Deserialize)]
pub struct ReferralLinkRequest {
    pub listener_token: String,
    pub base_url: String,
}

#[derive(Serialize)]
struct ReferralLinkResponse {
    referral_link: String,
}

/// POST /api/referral-link
pub async fn referral_link(
    State(state): State<Arc<AppState>>,
    Json(request): Json<ReferralLinkRequest>,
) -> impl IntoResponse {
    let result = state
        .accounting
        .referral_link(&request.listener_token, &request.base_url)
        .await;

    match result {
        Ok(referral_link) => Json(ReferralLinkResponse { referral_link }).into_response(),
        Err(e) => {
            let (status, body) = accounting_error_response(e);
            (status, Json(body)).into_response()
        }
    }
}
