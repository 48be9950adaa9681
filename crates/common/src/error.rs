use axum::Json;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use serde_json::json;
use thiserror::Error;

/// Message returned to clients whenever email dispatch fails.
pub const DELIVERY_FAILED_MESSAGE: &str = "Failed to send email";

/// Common error types used across the application.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Method not allowed")]
    MethodNotAllowed,

    #[error("Validation error: {0}")]
    Validation(String),

    /// Email dispatch failed. The detail is logged, never returned.
    #[error("Delivery error: {0}")]
    Delivery(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            AppError::MethodNotAllowed => (StatusCode::METHOD_NOT_ALLOWED, self.to_string()),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, msg.clone()),
            AppError::Delivery(detail) => {
                tracing::error!(error = %detail, "Email dispatch failed");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    DELIVERY_FAILED_MESSAGE.to_string(),
                )
            }
        };

        let body = json!({ "error": message });
        (status, Json(body)).into_response()
    }
}
