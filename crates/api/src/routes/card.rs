//! Card page route.

use axum::Router;
use axum::extract::State;
use axum::response::Html;
use axum::routing::get;
use axum_extra::extract::CookieJar;

use valentine_engine::card::CardState;

use crate::cookies::FlagCookies;
use crate::page;
use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/", get(show_card))
}

/// GET /: Render the card from the flag cookies and write them back
/// normalized.
async fn show_card(State(state): State<AppState>, jar: CookieJar) -> (CookieJar, Html<String>) {
    let mut flags = FlagCookies::new(jar);
    let card = CardState::load(&flags);
    card.save(&mut flags);
    tracing::debug!(accepted = card.accepted, no_count = card.no_count, "Rendering card");

    let html = page::render(&card, state.config.my_valentine.as_deref());
    (flags.into_jar(), Html(html))
}
