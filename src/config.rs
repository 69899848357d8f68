//! Tunable arena settings.
//!
//! Every field has a default matching the stock dashboard, so hosts only
//! supply what they want to change. Configs are JSON with camelCase keys and
//! are validated before the engine accepts them.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

use serde::{Deserialize, Serialize};

use crate::consts::{
    DRAG_THRESHOLD_PX, FOCUS_PAN_MULTIPLIER, FOCUS_ZOOM, PATH_CAPACITY, ROBOT_HIT_RADIUS_PX, SITE_HIT_RADIUS_PX,
    WHEEL_SENSITIVITY, ZOOM_MAX, ZOOM_MIN, ZOOM_STEP,
};
use crate::spring::SpringConfig;

/// Background used when the host supplies none.
pub const DEFAULT_BACKGROUND_URL: &str = "/images/heritage-map.png";

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid config json: {0}")]
    Parse(#[from] serde_json::Error),
    #[error("zoom range is empty: min {min} >= max {max}")]
    ZoomRange { min: f64, max: f64 },
    #[error("{field} must be positive, got {value}")]
    NotPositive { field: &'static str, value: f64 },
    #[error("spring damping must not be negative, got {0}")]
    NegativeDamping(f64),
    #[error("focus zoom {zoom} lies outside [{min}, {max}]")]
    FocusZoomOutOfRange { zoom: f64, min: f64, max: f64 },
    #[error("path capacity must be at least 1")]
    EmptyPath,
    #[error("{field} must be finite, got {value}")]
    NotFinite { field: &'static str, value: f64 },
}

/// How `focus_on_site` derives the pan that centres a site.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FocusStrategy {
    /// Exact pan from the measured image bounds; falls back to
    /// [`FocusStrategy::Empirical`] while bounds are unknown.
    #[default]
    Geometric,
    /// `(50 - pos) * zoom * multiplier`, the dashboard's calibrated
    /// approximation. Only roughly centred for other container sizes.
    Empirical,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArenaConfig {
    pub zoom_min: f64,
    pub zoom_max: f64,
    pub zoom_step: f64,
    pub wheel_sensitivity: f64,
    pub focus_zoom: f64,
    pub focus_strategy: FocusStrategy,
    pub focus_pan_multiplier: f64,
    pub spring: SpringConfig,
    pub path_capacity: usize,
    pub drag_threshold_px: f64,
    pub site_hit_radius_px: f64,
    pub robot_hit_radius_px: f64,
    /// Perspective tilt of the map plane for DOM hosts, in degrees.
    pub tilt_deg: f64,
    pub default_background_url: String,
}

impl Default for ArenaConfig {
    fn default() -> Self {
        Self {
            zoom_min: ZOOM_MIN,
            zoom_max: ZOOM_MAX,
            zoom_step: ZOOM_STEP,
            wheel_sensitivity: WHEEL_SENSITIVITY,
            focus_zoom: FOCUS_ZOOM,
            focus_strategy: FocusStrategy::default(),
            focus_pan_multiplier: FOCUS_PAN_MULTIPLIER,
            spring: SpringConfig::default(),
            path_capacity: PATH_CAPACITY,
            drag_threshold_px: DRAG_THRESHOLD_PX,
            site_hit_radius_px: SITE_HIT_RADIUS_PX,
            robot_hit_radius_px: ROBOT_HIT_RADIUS_PX,
            tilt_deg: 0.0,
            default_background_url: DEFAULT_BACKGROUND_URL.to_owned(),
        }
    }
}

impl ArenaConfig {
    /// Parse and validate a JSON config.
    ///
    /// # Errors
    ///
    /// Returns [`ConfigError::Parse`] for malformed JSON and the matching
    /// variant for any value [`ArenaConfig::validate`] rejects.
    pub fn from_json(raw: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(raw)?;
        config.validate()?;
        Ok(config)
    }

    /// Check every numeric setting.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        positive("zoomMin", self.zoom_min)?;
        if self.zoom_min >= self.zoom_max {
            return Err(ConfigError::ZoomRange { min: self.zoom_min, max: self.zoom_max });
        }
        positive("zoomStep", self.zoom_step)?;
        positive("wheelSensitivity", self.wheel_sensitivity)?;
        positive("focusPanMultiplier", self.focus_pan_multiplier)?;
        positive("spring.stiffness", self.spring.stiffness)?;
        if self.spring.damping < 0.0 || self.spring.damping.is_nan() {
            return Err(ConfigError::NegativeDamping(self.spring.damping));
        }
        positive("siteHitRadiusPx", self.site_hit_radius_px)?;
        positive("robotHitRadiusPx", self.robot_hit_radius_px)?;
        if self.drag_threshold_px < 0.0 || self.drag_threshold_px.is_nan() {
            return Err(ConfigError::NotPositive { field: "dragThresholdPx", value: self.drag_threshold_px });
        }
        if !(self.zoom_min..=self.zoom_max).contains(&self.focus_zoom) {
            return Err(ConfigError::FocusZoomOutOfRange {
                zoom: self.focus_zoom,
                min: self.zoom_min,
                max: self.zoom_max,
            });
        }
        if self.path_capacity == 0 {
            return Err(ConfigError::EmptyPath);
        }
        if !self.tilt_deg.is_finite() {
            return Err(ConfigError::NotFinite { field: "tiltDeg", value: self.tilt_deg });
        }
        Ok(())
    }

    /// Clamp a zoom factor into the configured range.
    #[must_use]
    pub fn clamp_zoom(&self, zoom: f64) -> f64 {
        zoom.clamp(self.zoom_min, self.zoom_max)
    }
}

fn positive(field: &'static str, value: f64) -> Result<(), ConfigError> {
    if value > 0.0 && value.is_finite() {
        Ok(())
    } else {
        Err(ConfigError::NotPositive { field, value })
    }
}
