//! Migration endpoint

use std::sync::Arc;

use axum::http::StatusCode;
use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use encore_core::PlayRecordMigration;
use serde::Deserialize;

use crate::AppState;

use super::ErrorResponse;

/// Query params for POST /api/migrate
#[derive(Debug, Deserialize)]
pub struct MigrateQuery {
    pub batch_size: Option<usize>,
}

/// POST /api/migrate
pub async fn migrate(
    State(state): State<Arc<AppState>>,
    Query(query): Query<MigrateQuery>,
) -> impl IntoResponse {
    let mut migration = PlayRecordMigration::new(state.listeners.clone());
    if let Some(batch_size) = query.batch_size {
        migration = migration.with_batch_size(batch_size);
    }

    match migration.run().await {
        Ok(report) => Json(report).into_response(),
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
