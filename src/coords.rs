//! Coordinate spaces: raw robot telemetry and map percentages.
//!
//! Telemetry arrives in robot units (nominally 0–640 × 0–480). Sites are
//! authored directly as percentages of the background image. The live robot
//! marker and the path trace are converted with the band mapping below, which
//! squeezes the physical play-field into the sub-region of the map image it
//! occupies. No clamping happens here; callers that need hard limits clamp
//! before or after converting.

#[cfg(test)]
#[path = "coords_test.rs"]
mod coords_test;

use std::ops::Add;

use serde::{Deserialize, Serialize};

use crate::consts::{
    FIELD_BOTTOM_PCT, FIELD_HEIGHT_PCT, FIELD_LEFT_PCT, FIELD_WIDTH_PCT, TELEMETRY_HEIGHT, TELEMETRY_WIDTH,
};

/// A raw robot coordinate as reported by the hub.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct TelemetryPoint {
    pub x: f64,
    pub y: f64,
}

impl TelemetryPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Both axes rounded to one decimal place.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self { x: round_to_tenth(self.x), y: round_to_tenth(self.y) }
    }
}

impl Add for TelemetryPoint {
    type Output = Self;

    fn add(self, rhs: Self) -> Self {
        Self { x: self.x + rhs.x, y: self.y + rhs.y }
    }
}

/// A position inside the background image, 0–100 on each axis.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct PercentPoint {
    pub x: f64,
    pub y: f64,
}

impl PercentPoint {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Clamp both axes into `[0, 100]`.
    #[must_use]
    pub fn clamped(self) -> Self {
        Self { x: self.x.clamp(0.0, 100.0), y: self.y.clamp(0.0, 100.0) }
    }

    /// Both axes rounded to one decimal place.
    #[must_use]
    pub fn rounded(self) -> Self {
        Self { x: round_to_tenth(self.x), y: round_to_tenth(self.y) }
    }
}

/// Map telemetry x into the `[45, 65]` band of the image width.
#[must_use]
pub fn telemetry_to_percent_x(x: f64) -> f64 {
    FIELD_LEFT_PCT + (x / TELEMETRY_WIDTH) * FIELD_WIDTH_PCT
}

/// Map telemetry y into the `[12, 82]` band, inverted so larger y sits higher.
#[must_use]
pub fn telemetry_to_percent_y(y: f64) -> f64 {
    FIELD_BOTTOM_PCT - (y / TELEMETRY_HEIGHT) * FIELD_HEIGHT_PCT
}

/// Inverse of [`telemetry_to_percent_x`].
#[must_use]
pub fn percent_to_raw_x(pct: f64) -> f64 {
    (pct - FIELD_LEFT_PCT) / FIELD_WIDTH_PCT * TELEMETRY_WIDTH
}

/// Inverse of [`telemetry_to_percent_y`].
#[must_use]
pub fn percent_to_raw_y(pct: f64) -> f64 {
    (FIELD_BOTTOM_PCT - pct) / FIELD_HEIGHT_PCT * TELEMETRY_HEIGHT
}

#[must_use]
pub fn telemetry_to_percent(p: TelemetryPoint) -> PercentPoint {
    PercentPoint { x: telemetry_to_percent_x(p.x), y: telemetry_to_percent_y(p.y) }
}

#[must_use]
pub fn percent_to_telemetry(p: PercentPoint) -> TelemetryPoint {
    TelemetryPoint { x: percent_to_raw_x(p.x), y: percent_to_raw_y(p.y) }
}

/// Where the robot marker belongs for a telemetry sample, given the
/// calibration anchor. Both inputs are in telemetry units; the sum is taken
/// before converting.
#[must_use]
pub fn robot_display_position(telemetry: TelemetryPoint, home: TelemetryPoint) -> PercentPoint {
    telemetry_to_percent(home + telemetry)
}

/// Round to one decimal place, half away from zero.
#[must_use]
pub fn round_to_tenth(v: f64) -> f64 {
    (v * 10.0).round() / 10.0
}
