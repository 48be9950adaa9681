//! "No" button relocation route.

use axum::Json;
use axum::Router;
use axum::routing::post;
use serde::{Deserialize, Serialize};

use valentine_common::error::AppError;
use valentine_engine::geometry::{
    ButtonScales, Point, Rect, evade, random_fractions, should_evade, teleport,
};

use crate::state::AppState;

pub fn router() -> Router<AppState> {
    Router::new().route("/api/evade", post(relocate))
}

/// Current layout as measured by the page.
#[derive(Debug, Clone, Deserialize)]
pub struct EvadeRequest {
    /// Pointer position; absent for touch, pen and clicks, which teleport.
    #[serde(default)]
    pub pointer: Option<Point>,
    pub button: Rect,
    pub zone: Rect,
    #[serde(default)]
    pub scales: ButtonScales,
}

/// New zone-relative offset of the button.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct EvadeResponse {
    pub left: f64,
    pub top: f64,
    pub moved: bool,
    pub scales: ButtonScales,
}

/// POST /api/evade: Where the "No" button goes next.
async fn relocate(Json(req): Json<EvadeRequest>) -> Result<Json<EvadeResponse>, AppError> {
    validate(&req)?;
    Ok(Json(plan(&req, random_fractions())))
}

fn validate(req: &EvadeRequest) -> Result<(), AppError> {
    for (what, rect) in [("button", &req.button), ("zone", &req.zone)] {
        if rect.width < 0.0 || rect.height < 0.0 {
            return Err(AppError::Validation(format!(
                "{} must have a non-negative size",
                what
            )));
        }
    }
    Ok(())
}

/// Relocation for `req`, using `fractions` when the button teleports.
pub fn plan(req: &EvadeRequest, fractions: (f64, f64)) -> EvadeResponse {
    let target = match req.pointer {
        Some(pointer) if should_evade(pointer, &req.button) => {
            Some(evade(pointer, &req.button, &req.zone))
        }
        Some(_) => None,
        None => Some(teleport(&req.button, &req.zone, fractions.0, fractions.1)),
    };

    match target {
        Some(offset) => EvadeResponse {
            left: offset.x,
            top: offset.y,
            moved: true,
            scales: req.scales.advance(),
        },
        None => {
            let offset = req.button.offset_in(&req.zone);
            EvadeResponse {
                left: offset.x,
                top: offset.y,
                moved: false,
                scales: req.scales,
            }
        }
    }
}
