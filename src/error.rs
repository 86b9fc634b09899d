//! Error types and error handling for the application
//!
//! This module defines custom error types that can be converted to HTTP responses.
//! All errors implement `IntoResponse` to provide consistent error formatting.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Application-level error types
///
/// Lookups on unknown ids are not errors: the store returns `None`/empty and
/// deletes no-op, so only validation failures, provider failures and internal
/// faults surface here.
#[derive(Error, Debug)]
pub enum AppError {
    /// Request payload failed validation; nothing was mutated
    #[error("Invalid request: {0}")]
    InvalidInput(String),

    /// The completion provider call failed (transport, auth, rate limit)
    #[error("Completion provider error: {0}")]
    ProviderFailure(String),

    /// Internal server error (catch-all for unexpected errors)
    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, error_message) = match &self {
            AppError::InvalidInput(_) => (StatusCode::BAD_REQUEST, self.to_string()),
            AppError::ProviderFailure(cause) => {
                // The cause stays in the log; the caller gets a generic message
                tracing::error!(error = %cause, "Completion provider call failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "Failed to process chat message. Please try again.".to_string(),
                )
            }
            AppError::Internal(_) => (StatusCode::INTERNAL_SERVER_ERROR, self.to_string()),
        };

        let body = Json(json!({
            "error": error_message,
            "status": status.as_u16(),
        }));

        (status, body).into_response()
    }
}
