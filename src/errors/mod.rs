//! Error handling module for the gifts backend.
//!
//! Provides centralized error types with mapping to HTTP status codes and the
//! notification severity the frontend renders as a toast.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

/// Error codes as constants to avoid stringly-typed errors.
pub mod codes {
    pub const NOT_FOUND: &str = "NOT_FOUND";
    pub const VALIDATION_ERROR: &str = "VALIDATION_ERROR";
    pub const CONFLICT: &str = "CONFLICT";
    pub const STORE_ERROR: &str = "STORE_ERROR";
}

/// Application error type.
#[derive(Debug)]
pub enum AppError {
    /// Bad or missing user input
    Validation(String),
    /// Referenced gift not found
    NotFound(String),
    /// Gift was reserved between read and write
    Conflict(String),
    /// Storage backend unavailable or rejected the call
    Store(String),
}

impl AppError {
    /// Get the HTTP status code for this error.
    pub fn status_code(&self) -> StatusCode {
        match self {
            AppError::Validation(_) => StatusCode::BAD_REQUEST,
            AppError::NotFound(_) => StatusCode::NOT_FOUND,
            AppError::Conflict(_) => StatusCode::CONFLICT,
            AppError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }

    /// Get the error code for this error.
    pub fn error_code(&self) -> &'static str {
        match self {
            AppError::Validation(_) => codes::VALIDATION_ERROR,
            AppError::NotFound(_) => codes::NOT_FOUND,
            AppError::Conflict(_) => codes::CONFLICT,
            AppError::Store(_) => codes::STORE_ERROR,
        }
    }

    /// Toast severity for this error. Bad input is a warning; everything
    /// else failed an operation the user meant to succeed.
    pub fn severity(&self) -> &'static str {
        match self {
            AppError::Validation(_) => "warning",
            _ => "error",
        }
    }

    /// Get the error message.
    pub fn message(&self) -> String {
        match self {
            AppError::Validation(msg)
            | AppError::NotFound(msg)
            | AppError::Conflict(msg)
            | AppError::Store(msg) => msg.clone(),
        }
    }
}

impl std::fmt::Display for AppError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.error_code(), self.message())
    }
}

impl std::error::Error for AppError {}

impl From<sqlx::Error> for AppError {
    fn from(err: sqlx::Error) -> Self {
        tracing::error!("Store error: {:?}", err);
        AppError::Store(format!("Store error: {}", err))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        tracing::error!("JSON error: {:?}", err);
        AppError::Validation(format!("Invalid document: {}", err))
    }
}

impl From<std::io::Error> for AppError {
    fn from(err: std::io::Error) -> Self {
        tracing::error!("I/O error: {:?}", err);
        AppError::Store(format!("Store error: {}", err))
    }
}

/// Error details in the response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorDetails {
    pub code: String,
    pub message: String,
    pub severity: String,
}

/// Error response envelope.
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: ErrorDetails,
}

impl ErrorResponse {
    pub fn new(error: &AppError) -> Self {
        Self {
            success: false,
            error: ErrorDetails {
                code: error.error_code().to_string(),
                message: error.message(),
                severity: error.severity().to_string(),
            },
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        let body = ErrorResponse::new(&self);
        (status, Json(body)).into_response()
    }
}
