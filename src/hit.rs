//! Pointer inversion and marker picking.
//!
//! [`Projection`] bundles everything a screen↔percent conversion needs for one
//! frame. It can only be built once both the container rect and the image
//! bounds are known, so code that holds one never converts against missing
//! bounds. Pointer handlers build a fresh projection for every event; drops
//! therefore use the transform and bounds current at release time.

#[cfg(test)]
#[path = "hit_test.rs"]
mod hit_test;

use crate::camera::{Camera, Point};
use crate::coords::{PercentPoint, TelemetryPoint, percent_to_telemetry};
use crate::input::DragTarget;
use crate::layout::{ContainerRect, ImageBounds};
use crate::site::SiteList;

/// The camera plus the measured geometry it projects through.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Projection {
    pub camera: Camera,
    pub container: ContainerRect,
    pub bounds: ImageBounds,
}

impl Projection {
    /// `None` until the container and image bounds are both measured.
    #[must_use]
    pub fn new(camera: Camera, container: Option<ContainerRect>, bounds: Option<ImageBounds>) -> Option<Self> {
        Some(Self { camera, container: container?, bounds: bounds? })
    }

    /// Percentage of the image to a viewport pixel.
    #[must_use]
    pub fn to_screen(&self, pct: PercentPoint) -> Point {
        self.camera.percent_to_screen(pct, &self.container, &self.bounds)
    }

    /// Viewport pixel to a percentage of the image, unclamped.
    #[must_use]
    pub fn to_percent(&self, screen: Point) -> PercentPoint {
        self.camera.screen_to_percent(screen, &self.container, &self.bounds)
    }
}

/// Invert a pointer position, or `None` while bounds are unknown.
#[must_use]
pub fn invert_pointer(
    screen: Point,
    camera: Camera,
    container: Option<ContainerRect>,
    bounds: Option<ImageBounds>,
) -> Option<PercentPoint> {
    Projection::new(camera, container, bounds).map(|p| p.to_percent(screen))
}

/// Stored position for a dropped site: kept inside the image, one decimal.
#[must_use]
pub fn drop_site_position(pct: PercentPoint) -> PercentPoint {
    pct.clamped().rounded()
}

/// Stored position for the dropped robot marker, in telemetry units with one
/// decimal. The marker is kept inside the image before converting back.
#[must_use]
pub fn drop_robot_position(pct: PercentPoint) -> TelemetryPoint {
    percent_to_telemetry(pct.clamped()).rounded()
}

/// Pick radii in screen pixels.
#[derive(Debug, Clone, Copy)]
pub struct PickRadii {
    pub site: f64,
    pub robot: f64,
}

/// Find the marker under `screen`.
///
/// The robot is drawn on top and is tested first. Among sites the nearest
/// centre within the radius wins. Radii are in screen pixels so markers stay
/// equally easy to grab at every zoom level.
#[must_use]
pub fn pick_marker(
    screen: Point,
    projection: &Projection,
    sites: &SiteList,
    robot: Option<PercentPoint>,
    radii: PickRadii,
) -> Option<DragTarget> {
    if let Some(robot) = robot {
        if projection.to_screen(robot.clamped()).distance(screen) <= radii.robot {
            return Some(DragTarget::Robot);
        }
    }

    sites
        .iter()
        .map(|site| (site, projection.to_screen(site.position().clamped()).distance(screen)))
        .filter(|(_, d)| *d <= radii.site)
        .min_by(|(_, a), (_, b)| a.total_cmp(b))
        .map(|(site, _)| DragTarget::Site(site.id.clone()))
}
