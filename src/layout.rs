//! Container geometry and the letterboxed background image rectangle.
//!
//! Every percentage-to-pixel conversion depends on [`ImageBounds`] being
//! fresh. [`BoundsTracker`] recomputes them whenever the container is resized
//! or the image finishes loading; recomputation is idempotent and may run as
//! often as the host's resize observer fires. Until both a container size and
//! a natural image size are known, there are no bounds, and anything that
//! would convert against them must stand down.

#[cfg(test)]
#[path = "layout_test.rs"]
mod layout_test;

use tracing::{debug, warn};

use crate::camera::Point;

/// The container's rectangle in viewport CSS pixels.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct ContainerRect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl ContainerRect {
    #[must_use]
    pub fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self { left, top, width, height }
    }

    /// Visual centre in viewport coordinates.
    #[must_use]
    pub fn center(&self) -> Point {
        Point::new(self.left + self.width / 2.0, self.top + self.height / 2.0)
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.width <= 0.0 || self.height <= 0.0
    }
}

/// Rendered rectangle of the background image, relative to the container's
/// top-left corner.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImageBounds {
    pub width: f64,
    pub height: f64,
    pub left: f64,
    pub top: f64,
}

/// Fit an image of natural size `natural_w × natural_h` inside the container,
/// preserving aspect ratio and centring the leftover space.
///
/// Returns `None` for degenerate sizes.
#[must_use]
pub fn fit_image(container_w: f64, container_h: f64, natural_w: f64, natural_h: f64) -> Option<ImageBounds> {
    if container_w <= 0.0 || container_h <= 0.0 || natural_w <= 0.0 || natural_h <= 0.0 {
        return None;
    }
    let container_aspect = container_w / container_h;
    let image_aspect = natural_w / natural_h;

    let bounds = if image_aspect > container_aspect {
        // Wider than the container: full width, bars above and below.
        let height = container_w / image_aspect;
        ImageBounds { width: container_w, height, left: 0.0, top: (container_h - height) / 2.0 }
    } else {
        let width = container_h * image_aspect;
        ImageBounds { width, height: container_h, left: (container_w - width) / 2.0, top: 0.0 }
    };
    Some(bounds)
}

/// Load state of the background image.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum ImageState {
    Loading,
    Loaded { natural_w: f64, natural_h: f64 },
    Failed,
}

/// Keeps the container rect and image bounds in sync with host events.
#[derive(Debug, Clone)]
pub struct BoundsTracker {
    container: Option<ContainerRect>,
    image: ImageState,
    bounds: Option<ImageBounds>,
}

impl Default for BoundsTracker {
    fn default() -> Self {
        Self { container: None, image: ImageState::Loading, bounds: None }
    }
}

impl BoundsTracker {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a new container rect. Returns whether the bounds changed.
    pub fn on_resize(&mut self, rect: ContainerRect) -> bool {
        self.container = if rect.is_empty() { None } else { Some(rect) };
        self.recompute()
    }

    /// Record the natural size of a freshly loaded background image.
    pub fn on_image_load(&mut self, natural_w: f64, natural_h: f64) -> bool {
        if natural_w <= 0.0 || natural_h <= 0.0 {
            warn!(natural_w, natural_h, "background image reported an empty size");
            self.image = ImageState::Failed;
        } else {
            self.image = ImageState::Loaded { natural_w, natural_h };
        }
        self.recompute()
    }

    /// The background image failed to load; bounds stay empty until a new
    /// image resolves.
    pub fn on_image_error(&mut self) -> bool {
        warn!("background image failed to load");
        self.image = ImageState::Failed;
        self.recompute()
    }

    /// A new image source is being fetched.
    pub fn on_image_reset(&mut self) -> bool {
        self.image = ImageState::Loading;
        self.recompute()
    }

    #[must_use]
    pub fn container(&self) -> Option<ContainerRect> {
        self.container
    }

    #[must_use]
    pub fn bounds(&self) -> Option<ImageBounds> {
        self.bounds
    }

    #[must_use]
    pub fn image_state(&self) -> ImageState {
        self.image
    }

    fn recompute(&mut self) -> bool {
        let next = match (self.container, self.image) {
            (Some(c), ImageState::Loaded { natural_w, natural_h }) => fit_image(c.width, c.height, natural_w, natural_h),
            _ => None,
        };
        let changed = next != self.bounds;
        if changed {
            debug!(?next, "image bounds recomputed");
        }
        self.bounds = next;
        changed
    }
}
