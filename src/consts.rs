//! Shared numeric constants for the arena crate.

// ── Telemetry ───────────────────────────────────────────────────

/// Nominal telemetry extent on the x axis (raw robot units).
pub const TELEMETRY_WIDTH: f64 = 640.0;

/// Nominal telemetry extent on the y axis (raw robot units).
pub const TELEMETRY_HEIGHT: f64 = 480.0;

/// Left edge of the play-field band on the map image, in percent.
pub const FIELD_LEFT_PCT: f64 = 45.0;

/// Width of the play-field band on the map image, in percent.
pub const FIELD_WIDTH_PCT: f64 = 20.0;

/// Bottom edge of the play-field band (telemetry y = 0), in percent.
pub const FIELD_BOTTOM_PCT: f64 = 82.0;

/// Height of the play-field band on the map image, in percent.
pub const FIELD_HEIGHT_PCT: f64 = 70.0;

// ── View ────────────────────────────────────────────────────────

/// Lowest allowed zoom factor.
pub const ZOOM_MIN: f64 = 0.5;

/// Highest allowed zoom factor.
pub const ZOOM_MAX: f64 = 6.0;

/// Zoom change for one zoom-in / zoom-out button press.
pub const ZOOM_STEP: f64 = 0.5;

/// Zoom change per pixel of wheel delta.
pub const WHEEL_SENSITIVITY: f64 = 0.002;

/// Zoom factor used when focusing a site.
pub const FOCUS_ZOOM: f64 = 2.5;

/// Half-size of the box pan drags are confined to, in CSS pixels.
pub const PAN_LIMIT_PX: f64 = 4000.0;

/// Empirical pan multiplier for percent offsets when focusing a site.
pub const FOCUS_PAN_MULTIPLIER: f64 = 10.0;

// ── Animation ───────────────────────────────────────────────────

/// Spring stiffness; sqrt(170) ≈ 13 rad/s settles a jump in roughly 0.45 s.
pub const SPRING_STIFFNESS: f64 = 170.0;

/// Damping ratio; 1.0 is critically damped.
pub const SPRING_DAMPING: f64 = 1.0;

/// Largest integration step for the spring, in seconds.
pub const SPRING_MAX_STEP_S: f64 = 1.0 / 240.0;

/// Longest frame delta the spring will integrate, in seconds.
pub const SPRING_MAX_DT_S: f64 = 0.25;

/// Distance and speed below which a spring snaps onto its target.
pub const SPRING_REST_EPSILON: f64 = 1e-3;

// ── Data ────────────────────────────────────────────────────────

/// Number of telemetry points retained in the path history.
pub const PATH_CAPACITY: usize = 50;

// ── Hit-testing ─────────────────────────────────────────────────

/// Pointer travel in screen pixels before a press becomes a drag.
pub const DRAG_THRESHOLD_PX: f64 = 3.0;

/// Screen-space pick radius of a site marker.
pub const SITE_HIT_RADIUS_PX: f64 = 32.0;

/// Screen-space pick radius of the robot marker.
pub const ROBOT_HIT_RADIUS_PX: f64 = 24.0;
