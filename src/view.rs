//! View transform controller: zoom, pan, focus and navigation mode.
//!
//! Zoom and both pan axes are each backed by a [`Spring`], so programmatic
//! changes (buttons, focus, reset) animate instead of jumping. Every operation
//! moves *targets*; the rendered camera is whatever the springs have reached
//! at the last [`ViewController::tick`]. Retargeting before a spring settles
//! simply replaces the target, so the most recent request always wins.
//!
//! Two orthogonal state machines live here:
//!
//! - [`FocusState`]: `Idle` until a site is focused, back to `Idle` on reset.
//! - [`NavigationMode`]: `Locked`, `PanEnabled` or `MarkerDragEnabled`, one at
//!   a time. Pan only applies outside editor mode; marker drag only inside it.

#[cfg(test)]
#[path = "view_test.rs"]
mod view_test;

use tracing::debug;

use crate::camera::{Camera, percent_to_map};
use crate::config::{ArenaConfig, FocusStrategy};
use crate::consts::PAN_LIMIT_PX;
use crate::layout::{ContainerRect, ImageBounds};
use crate::site::{Site, SiteId};
use crate::spring::Spring;

/// Whether the view is framing a particular site.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum FocusState {
    #[default]
    Idle,
    Focused(SiteId),
}

/// What a freehand drag on the map does.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum NavigationMode {
    /// Drags do nothing; markers are click-only.
    #[default]
    Locked,
    /// Dragging anywhere pans the view (normal mode only).
    PanEnabled,
    /// Dragging a marker repositions it (editor mode only).
    MarkerDragEnabled,
}

pub struct ViewController {
    zoom: Spring,
    pan_x: Spring,
    pan_y: Spring,
    focus: FocusState,
    mode: NavigationMode,
    editor_mode: bool,
    config: ArenaConfig,
}

impl ViewController {
    #[must_use]
    pub fn new(config: &ArenaConfig) -> Self {
        Self {
            zoom: Spring::new(1.0, config.spring),
            pan_x: Spring::new(0.0, config.spring),
            pan_y: Spring::new(0.0, config.spring),
            focus: FocusState::Idle,
            mode: NavigationMode::Locked,
            editor_mode: false,
            config: config.clone(),
        }
    }

    // --- Zoom ---

    /// Step the zoom target up. Returns whether the target moved.
    pub fn zoom_in(&mut self) -> bool {
        self.set_zoom_target(self.zoom.target() + self.config.zoom_step)
    }

    /// Step the zoom target down. Returns whether the target moved.
    pub fn zoom_out(&mut self) -> bool {
        self.set_zoom_target(self.zoom.target() - self.config.zoom_step)
    }

    /// Continuous zoom from a wheel delta (positive = scroll down = zoom out).
    /// Ignored in editor mode.
    pub fn wheel(&mut self, delta_y: f64) -> bool {
        if self.editor_mode {
            return false;
        }
        self.set_zoom_target(self.zoom.target() - delta_y * self.config.wheel_sensitivity)
    }

    fn set_zoom_target(&mut self, zoom: f64) -> bool {
        let clamped = self.config.clamp_zoom(zoom);
        if clamped == self.zoom.target() {
            return false;
        }
        self.zoom.set_target(clamped);
        true
    }

    // --- Reset / focus ---

    /// Animate back to `zoom = 1, pan = (0, 0)` and drop any focus.
    pub fn reset_view(&mut self) {
        debug!("view reset");
        self.focus = FocusState::Idle;
        self.zoom.set_target(1.0);
        self.pan_x.set_target(0.0);
        self.pan_y.set_target(0.0);
    }

    /// Frame `site`: zoom to the focus level and pan it to the container
    /// centre. `layout` is the measured container and image, when known.
    pub fn focus_on_site(&mut self, site: &Site, layout: Option<(ContainerRect, ImageBounds)>) {
        let zoom = self.config.clamp_zoom(self.config.focus_zoom);
        let (pan_x, pan_y) = self.focus_pan(site, zoom, layout);
        debug!(site = %site.id, zoom, pan_x, pan_y, "focusing site");
        self.focus = FocusState::Focused(site.id.clone());
        self.zoom.set_target(zoom);
        self.pan_x.set_target(pan_x);
        self.pan_y.set_target(pan_y);
    }

    /// Pan that brings `site` to the container centre at `zoom`.
    #[must_use]
    pub fn focus_pan(&self, site: &Site, zoom: f64, layout: Option<(ContainerRect, ImageBounds)>) -> (f64, f64) {
        let pos = site.position().clamped();
        match (self.config.focus_strategy, layout) {
            (FocusStrategy::Geometric, Some((container, bounds))) => {
                let map = percent_to_map(pos, &container, &bounds);
                (-map.x * zoom, -map.y * zoom)
            }
            _ => {
                let k = zoom * self.config.focus_pan_multiplier;
                ((50.0 - pos.x) * k, (50.0 - pos.y) * k)
            }
        }
    }

    #[must_use]
    pub fn focus(&self) -> &FocusState {
        &self.focus
    }

    // --- Pan ---

    /// Shift the view by a screen-space delta without animation, as a pan
    /// drag must track the pointer exactly.
    pub fn pan_by(&mut self, dx: f64, dy: f64) {
        let x = (self.pan_x.value() + dx).clamp(-PAN_LIMIT_PX, PAN_LIMIT_PX);
        let y = (self.pan_y.value() + dy).clamp(-PAN_LIMIT_PX, PAN_LIMIT_PX);
        self.pan_x.set_immediate(x);
        self.pan_y.set_immediate(y);
    }

    // --- Modes ---

    /// Turn freehand panning on or off. Turning it on leaves marker-drag mode.
    pub fn set_pan_mode(&mut self, enabled: bool) {
        if enabled {
            self.mode = NavigationMode::PanEnabled;
        } else if self.mode == NavigationMode::PanEnabled {
            self.mode = NavigationMode::Locked;
        }
    }

    /// Turn marker dragging on or off. Turning it on leaves pan mode.
    pub fn set_marker_drag_mode(&mut self, enabled: bool) {
        if enabled {
            self.mode = NavigationMode::MarkerDragEnabled;
        } else if self.mode == NavigationMode::MarkerDragEnabled {
            self.mode = NavigationMode::Locked;
        }
    }

    pub fn set_editor_mode(&mut self, editor: bool) {
        self.editor_mode = editor;
    }

    #[must_use]
    pub fn mode(&self) -> NavigationMode {
        self.mode
    }

    #[must_use]
    pub fn is_pan_mode(&self) -> bool {
        self.mode == NavigationMode::PanEnabled
    }

    #[must_use]
    pub fn is_marker_drag_mode(&self) -> bool {
        self.mode == NavigationMode::MarkerDragEnabled
    }

    #[must_use]
    pub fn editor_mode(&self) -> bool {
        self.editor_mode
    }

    /// Freehand drags pan the view.
    #[must_use]
    pub fn can_pan(&self) -> bool {
        self.is_pan_mode() && !self.editor_mode
    }

    /// Markers may be dragged to new positions.
    #[must_use]
    pub fn can_drag_markers(&self) -> bool {
        self.is_marker_drag_mode() && self.editor_mode
    }

    // --- Animation ---

    /// Advance all springs. Returns whether anything is still moving.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.zoom.tick(dt);
        self.pan_x.tick(dt);
        self.pan_y.tick(dt);
        self.is_animating()
    }

    #[must_use]
    pub fn is_animating(&self) -> bool {
        self.zoom.is_animating() || self.pan_x.is_animating() || self.pan_y.is_animating()
    }

    /// The camera for this frame.
    #[must_use]
    pub fn camera(&self) -> Camera {
        Camera { pan_x: self.pan_x.value(), pan_y: self.pan_y.value(), zoom: self.zoom.value() }
    }

    /// Where the springs are heading.
    #[must_use]
    pub fn target_camera(&self) -> Camera {
        Camera { pan_x: self.pan_x.target(), pan_y: self.pan_y.target(), zoom: self.zoom.target() }
    }
}
