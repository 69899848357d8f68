#[cfg(test)]
#[path = "camera_test.rs"]
mod camera_test;

use crate::coords::PercentPoint;
use crate::layout::{ContainerRect, ImageBounds};

/// A point in screen space (CSS pixels, viewport-relative).
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    #[must_use]
    pub fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }

    /// Euclidean distance to `other`.
    #[must_use]
    pub fn distance(self, other: Point) -> f64 {
        (self.x - other.x).hypot(self.y - other.y)
    }
}

/// Snapshot of the view transform for one frame.
///
/// The map layer is centred in its container and then transformed by
/// `translate(pan_x, pan_y) scale(zoom)` about the container centre.
/// `pan_x` / `pan_y` are in CSS pixels; `zoom` is a scale factor.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Camera {
    pub pan_x: f64,
    pub pan_y: f64,
    pub zoom: f64,
}

impl Default for Camera {
    fn default() -> Self {
        Self { pan_x: 0.0, pan_y: 0.0, zoom: 1.0 }
    }
}

impl Camera {
    /// Screen point to map coordinates relative to the container centre,
    /// with pan and zoom removed.
    #[must_use]
    pub fn screen_to_map(&self, screen: Point, container: &ContainerRect) -> Point {
        let center = container.center();
        Point {
            x: (screen.x - center.x - self.pan_x) / self.zoom,
            y: (screen.y - center.y - self.pan_y) / self.zoom,
        }
    }

    /// Inverse of [`Camera::screen_to_map`].
    #[must_use]
    pub fn map_to_screen(&self, map: Point, container: &ContainerRect) -> Point {
        let center = container.center();
        Point {
            x: center.x + map.x * self.zoom + self.pan_x,
            y: center.y + map.y * self.zoom + self.pan_y,
        }
    }

    /// Screen point to a percentage of the background image.
    ///
    /// This is the drag inverter: container-centre offset, undo pan/zoom,
    /// shift to the image's top-left corner, normalise by image size.
    #[must_use]
    pub fn screen_to_percent(&self, screen: Point, container: &ContainerRect, bounds: &ImageBounds) -> PercentPoint {
        let map = self.screen_to_map(screen, container);
        let img_rel_x = map.x + (container.width / 2.0 - bounds.left);
        let img_rel_y = map.y + (container.height / 2.0 - bounds.top);
        PercentPoint {
            x: img_rel_x / bounds.width * 100.0,
            y: img_rel_y / bounds.height * 100.0,
        }
    }

    /// Percentage of the background image to a screen point. Exact inverse of
    /// [`Camera::screen_to_percent`]; every marker is placed through here.
    #[must_use]
    pub fn percent_to_screen(&self, pct: PercentPoint, container: &ContainerRect, bounds: &ImageBounds) -> Point {
        self.map_to_screen(percent_to_map(pct, container, bounds), container)
    }

    /// Convert a screen-space distance (pixels) to map-space distance.
    #[must_use]
    pub fn screen_dist_to_map(&self, screen_dist: f64) -> f64 {
        screen_dist / self.zoom
    }

    /// CSS transform for a DOM map layer matching this camera. A non-zero
    /// `tilt_deg` prepends a perspective tilt, which the pointer inverter does
    /// not model.
    #[must_use]
    pub fn css_transform(&self, tilt_deg: f64) -> String {
        let base = format!("translate({}px, {}px) scale({})", self.pan_x, self.pan_y, self.zoom);
        if tilt_deg == 0.0 {
            base
        } else {
            format!("perspective(1200px) rotateX({tilt_deg}deg) {base}")
        }
    }
}

/// Percentage of the image to map coordinates relative to the container centre.
#[must_use]
pub fn percent_to_map(pct: PercentPoint, container: &ContainerRect, bounds: &ImageBounds) -> Point {
    let img_rel_x = pct.x / 100.0 * bounds.width;
    let img_rel_y = pct.y / 100.0 * bounds.height;
    Point {
        x: img_rel_x - (container.width / 2.0 - bounds.left),
        y: img_rel_y - (container.height / 2.0 - bounds.top),
    }
}
