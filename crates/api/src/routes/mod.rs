pub mod card;
pub mod evade;
pub mod health;
pub mod notify;

use axum::Router;
use tower_http::limit::RequestBodyLimitLayer;

use crate::state::AppState;

/// Build the complete router with all routes.
pub fn create_router(state: AppState) -> Router {
    let body_limit = state.config.body_limit_bytes;
    Router::new()
        .merge(health::router())
        .merge(card::router())
        .merge(notify::router())
        .merge(evade::router())
        .layer(RequestBodyLimitLayer::new(body_limit))
        .with_state(state)
}
