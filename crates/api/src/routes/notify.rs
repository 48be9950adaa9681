//! Acceptance notification route.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::HeaderMap;
use axum::routing::post;
use axum::{Json, Router};
use chrono::Utc;
use serde_json::json;

use valentine_common::error::AppError;
use valentine_common::types::{Acceptance, NotifyRequest, RequestMetadata};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/notify", post(notify).fallback(method_not_allowed))
}

/// POST /api/notify: Email the card owner that the visitor accepted.
///
/// Missing fields get defaults; an empty body is the same as `{}`.
async fn notify(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<serde_json::Value>, AppError> {
    let request = parse_body(&body)?;
    let acceptance = Acceptance::from_request(
        request,
        RequestMetadata::from_headers(&headers),
        Utc::now(),
    );

    tracing::info!(
        valentine = %acceptance.valentine,
        no_count = acceptance.no_count,
        ip = %acceptance.metadata.ip,
        "Valentine accepted"
    );

    state.dispatcher.deliver(&acceptance).await?;
    Ok(Json(json!({ "ok": true })))
}

async fn method_not_allowed() -> AppError {
    AppError::MethodNotAllowed
}

fn parse_body(body: &[u8]) -> Result<NotifyRequest, AppError> {
    if body.iter().all(u8::is_ascii_whitespace) {
        return Ok(NotifyRequest::default());
    }
    serde_json::from_slice(body).map_err(|e| AppError::Validation(format!("Invalid JSON body: {}", e)))
}
