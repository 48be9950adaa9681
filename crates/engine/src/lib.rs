//! Pure card logic: button geometry, persisted flags and card state.

pub mod card;
pub mod flags;
pub mod geometry;
