//! REST API module.
//!
//! Handlers forward user actions into the manager and render its state and
//! notices as JSON.

mod gifts;
mod snapshot;

pub use gifts::*;
pub use snapshot::*;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::Serialize;

use crate::manager::Notice;

/// Success response envelope. `notice` carries the toast the frontend shows.
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize> {
    pub success: bool,
    pub data: T,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notice: Option<Notice>,
}

impl<T: Serialize> ApiResponse<T> {
    pub fn new(data: T) -> Self {
        Self {
            success: true,
            data,
            notice: None,
        }
    }

    pub fn with_notice(data: T, notice: Notice) -> Self {
        Self {
            success: true,
            data,
            notice: Some(notice),
        }
    }
}

impl<T: Serialize> IntoResponse for ApiResponse<T> {
    fn into_response(self) -> Response {
        (StatusCode::OK, Json(self)).into_response()
    }
}

/// Response type that can be either success or error.
pub type ApiResult<T> = Result<ApiResponse<T>, crate::errors::AppError>;
