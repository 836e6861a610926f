//! The one piece of presentation logic with invariants worth testing:
//! severity classification of a frame-rate number and the capped meter
//! fraction used for progress bars.

use serde::Serialize;

/// Reference ceiling for the FPS meter; anything at or above renders full.
pub const METER_CEILING_FPS: f64 = 120.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FpsRating {
    Good,
    Warning,
    Poor,
}

impl FpsRating {
    pub fn classify(fps: f64) -> Self {
        if fps >= 60.0 {
            Self::Good
        } else if fps >= 30.0 {
            Self::Warning
        } else {
            Self::Poor
        }
    }
}

/// Meter fill fraction in `0.0..=1.0`, capped at the 120 FPS ceiling.
pub fn meter_fraction(fps: f64) -> f64 {
    (fps / METER_CEILING_FPS).clamp(0.0, 1.0)
}
