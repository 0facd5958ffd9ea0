//! HTTP API module

mod api;
mod leaderboard;
mod migrate;
mod referral;
mod streams;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    routing::{get, post},
    Router,
};
use encore_core::{AccountingError, ProviderError};
use serde::Serialize;
use tower_http::cors::CorsLayer;

use crate::AppState;

pub use api::HealthResponse;
pub use migrate::MigrateQuery;
pub use referral::ReferralLinkRequest;
pub use streams::{RecordStreamsRequest, StreamCountQuery};

/// Create the HTTP router with all routes configured
pub fn create_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/api/health", get(api::health))
        .route(
            "/api/streams",
            post(streams::record_streams).get(streams::stream_count),
        )
        .route("/api/leaderboard", get(leaderboard::leaderboard))
        .route("/api/referral-link", post(referral::referral_link))
        .route("/api/migrate", post(migrate::migrate))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

/// JSON error body shared by all endpoints
#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Map an accounting failure to its HTTP status and error body
///
/// Auth failures get a dedicated 401 so clients can prompt a reconnect
/// instead of a generic retry.
pub(crate) fn accounting_error_response(err: AccountingError) -> (StatusCode, ErrorResponse) {
    let (status, code) = match &err {
        AccountingError::Provider(ProviderError::Auth(_)) => (StatusCode::UNAUTHORIZED, "AUTH"),
        AccountingError::Provider(ProviderError::Upstream(_)) => (StatusCode::BAD_GATEWAY, "UPSTREAM"),
        AccountingError::MissingInput(_) => (StatusCode::BAD_REQUEST, "MISSING_INPUT"),
        AccountingError::ReferralNotEligible { .. } => (StatusCode::FORBIDDEN, "NOT_ELIGIBLE"),
        AccountingError::Store(_) => (StatusCode::INTERNAL_SERVER_ERROR, "STORE"),
    };

    (
        status,
        ErrorResponse {
            error: err.to_string(),
            code: code.to_string(),
        },
    )
}
