//! Snapshot API endpoints: the manual backup/restore pair.

use axum::{extract::State, Json};

use super::{ApiResponse, ApiResult};
use crate::models::Snapshot;
use crate::AppState;

/// GET /api/snapshot - Export the current gift list as a backup document.
pub async fn export_snapshot(State(state): State<AppState>) -> ApiResult<Snapshot> {
    let snapshot = state
        .manager
        .export_snapshot(&state.config.couple_names)
        .await;
    Ok(ApiResponse::new(snapshot))
}

/// POST /api/snapshot - Restore the gift list from a backup document.
pub async fn import_snapshot(
    State(state): State<AppState>,
    Json(document): Json<serde_json::Value>,
) -> ApiResult<()> {
    let notice = state.manager.import_snapshot(document).await?;
    Ok(ApiResponse::with_notice((), notice))
}
