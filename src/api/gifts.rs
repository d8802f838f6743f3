//! Gift API endpoints.

use axum::{
    extract::{Path, Query, State},
    Json,
};
use serde::Deserialize;

use super::{ApiResponse, ApiResult};
use crate::errors::AppError;
use crate::models::{AddGiftRequest, ClearRequest, Filter, Gift, ReserveRequest};
use crate::AppState;

/// Query parameters for the list endpoint.
#[derive(Debug, Deserialize)]
pub struct ListQuery {
    #[serde(default)]
    pub filter: Option<String>,
}

/// GET /api/gifts - List gifts, optionally switching the active filter.
pub async fn list_gifts(
    State(state): State<AppState>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Vec<Gift>> {
    if let Some(raw) = query.filter {
        let filter = Filter::from_str(&raw)
            .ok_or_else(|| AppError::Validation(format!("Unknown filter: {}", raw)))?;
        state.manager.set_filter(filter).await;
    }

    Ok(ApiResponse::new(state.manager.view().await))
}

/// POST /api/gifts - Add a new gift.
pub async fn add_gift(
    State(state): State<AppState>,
    Json(request): Json<AddGiftRequest>,
) -> ApiResult<Gift> {
    let (gift, notice) = state.manager.add_gift(&request.name).await?;
    Ok(ApiResponse::with_notice(gift, notice))
}

/// POST /api/gifts/:id/reserve - Reserve a gift for a named guest.
pub async fn reserve_gift(
    State(state): State<AppState>,
    Path(id): Path<String>,
    Json(request): Json<ReserveRequest>,
) -> ApiResult<Gift> {
    let (gift, notice) = state.manager.reserve(&id, &request.guest_name).await?;
    Ok(ApiResponse::with_notice(gift, notice))
}

/// DELETE /api/gifts/:id - Remove a gift.
pub async fn remove_gift(State(state): State<AppState>, Path(id): Path<String>) -> ApiResult<()> {
    let notice = state.manager.remove(&id).await?;
    Ok(ApiResponse::with_notice((), notice))
}

/// POST /api/gifts/clear - Clear the entire list. Irreversible; the request
/// must carry `confirm: true`.
pub async fn clear_gifts(
    State(state): State<AppState>,
    Json(request): Json<ClearRequest>,
) -> ApiResult<()> {
    if !request.confirm {
        return Err(AppError::Validation(
            "Clearing all data is irreversible; set confirm to true".to_string(),
        ));
    }

    let notice = state.manager.clear_all().await?;
    Ok(ApiResponse::with_notice((), notice))
}
