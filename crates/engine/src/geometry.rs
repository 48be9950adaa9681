//! Evade-the-cursor geometry for the "No" button.
//!
//! All coordinates are viewport pixels as reported by `getBoundingClientRect`.
//! Returned positions are offsets relative to the zone's top-left corner,
//! ready to be written to the button's `left` / `top` style.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// How far the button jumps away from the pointer.
pub const EVADE_DISTANCE: f64 = 150.0;

/// Pointer distance from the button centre that triggers an evade.
pub const PROXIMITY_RADIUS: f64 = 140.0;

const YES_SCALE_STEP: f64 = 0.1;
const YES_SCALE_MAX: f64 = 2.2;
const NO_SCALE_STEP: f64 = 0.06;
const NO_SCALE_MIN: f64 = 0.55;

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Axis-aligned bounding box.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    pub fn right(&self) -> f64 {
        self.left + self.width
    }

    pub fn bottom(&self) -> f64 {
        self.top + self.height
    }

    /// Whether `inner` lies entirely within `self`.
    pub fn contains(&self, inner: &Rect) -> bool {
        inner.left >= self.left
            && inner.top >= self.top
            && inner.right() <= self.right()
            && inner.bottom() <= self.bottom()
    }

    /// Offset of `self` relative to `zone`'s top-left corner.
    pub fn offset_in(&self, zone: &Rect) -> Point {
        Point::new(self.left - zone.left, self.top - zone.top)
    }
}

/// Largest offset that keeps `button` inside `zone`, never negative.
fn max_offset(button: &Rect, zone: &Rect) -> Point {
    Point::new(
        (zone.width - button.width).max(0.0),
        (zone.height - button.height).max(0.0),
    )
}

fn clamp_offset(offset: Point, button: &Rect, zone: &Rect) -> Point {
    let max = max_offset(button, zone);
    Point::new(offset.x.clamp(0.0, max.x), offset.y.clamp(0.0, max.y))
}

/// Whether the pointer is close enough to the button to make it flee.
pub fn should_evade(pointer: Point, button: &Rect) -> bool {
    let c = button.center();
    (c.x - pointer.x).hypot(c.y - pointer.y) < PROXIMITY_RADIUS
}

/// Push the button [`EVADE_DISTANCE`] pixels directly away from the pointer,
/// clamped inside the zone.
///
/// When the pointer sits exactly on the button centre there is no direction
/// to flee in and the button keeps its (clamped) position.
pub fn evade(pointer: Point, button: &Rect, zone: &Rect) -> Point {
    let c = button.center();
    let dx = c.x - pointer.x;
    let dy = c.y - pointer.y;

    let mut mag = dx.hypot(dy);
    if mag == 0.0 || !mag.is_finite() {
        mag = 1.0;
    }
    let (ux, uy) = if dx.is_finite() && dy.is_finite() {
        (dx / mag, dy / mag)
    } else {
        (0.0, 0.0)
    };

    let current = button.offset_in(zone);
    let moved = Point::new(
        current.x + ux * EVADE_DISTANCE,
        current.y + uy * EVADE_DISTANCE,
    );
    clamp_offset(moved, button, zone)
}

/// Place the button at a random spot in the zone.
///
/// `fx` and `fy` are fractions in `[0, 1]` of the free space along each axis.
pub fn teleport(button: &Rect, zone: &Rect, fx: f64, fy: f64) -> Point {
    let max = max_offset(button, zone);
    Point::new(unit(fx) * max.x, unit(fy) * max.y)
}

fn unit(f: f64) -> f64 {
    if f.is_nan() { 0.0 } else { f.clamp(0.0, 1.0) }
}

/// Two independent fractions in `[0, 1)` drawn from a v4 UUID.
pub fn random_fractions() -> (f64, f64) {
    let bits = Uuid::new_v4().as_u128();
    let hi = (bits >> 64) as u64;
    let lo = bits as u64;
    // 53 bits of mantissa per value.
    let scale = (1u64 << 53) as f64;
    ((hi >> 11) as f64 / scale, (lo >> 11) as f64 / scale)
}

/// Current scale factors of the two buttons.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ButtonScales {
    pub yes: f64,
    pub no: f64,
}

impl Default for ButtonScales {
    fn default() -> Self {
        Self { yes: 1.0, no: 1.0 }
    }
}

impl ButtonScales {
    /// Every relocation of "No" makes "Yes" bigger and "No" smaller.
    pub fn advance(self) -> Self {
        Self {
            yes: (self.yes + YES_SCALE_STEP).min(YES_SCALE_MAX),
            no: (self.no - NO_SCALE_STEP).max(NO_SCALE_MIN),
        }
    }
}
