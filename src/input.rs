//! Input model: pointer buttons, wheel deltas, and the drag gesture state machine.
//!
//! A gesture runs `Idle → Pressing → (Panning | Dragging) → Idle`. A press
//! only becomes a drag after the pointer travels past the drag threshold;
//! releasing before that is a click. Keeping the whole gesture in one enum
//! means every pointer handler is a transition function over [`InputState`],
//! testable without a DOM.

#[cfg(test)]
#[path = "input_test.rs"]
mod input_test;

use crate::camera::Point;
use crate::coords::PercentPoint;
use crate::site::SiteId;

/// Mouse button identifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Button {
    /// Left mouse button (or single-finger tap).
    Primary,
    /// Middle mouse button (scroll wheel click).
    Middle,
    /// Right mouse button (or two-finger tap).
    Secondary,
}

/// Wheel / trackpad scroll delta.
#[derive(Debug, Clone, Copy)]
pub struct WheelDelta {
    /// Horizontal scroll amount in pixels.
    pub dx: f64,
    /// Vertical scroll amount in pixels (positive = down).
    pub dy: f64,
}

/// A marker the pointer can grab.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DragTarget {
    Site(SiteId),
    Robot,
}

/// Pointer cursor shown over the arena.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Cursor {
    #[default]
    Default,
    Pointer,
    Grab,
    Grabbing,
    Move,
}

impl Cursor {
    /// CSS `cursor` keyword.
    #[must_use]
    pub fn as_css(self) -> &'static str {
        match self {
            Self::Default => "default",
            Self::Pointer => "pointer",
            Self::Grab => "grab",
            Self::Grabbing => "grabbing",
            Self::Move => "move",
        }
    }
}

/// Gesture in progress between pointer-down and pointer-up.
#[derive(Debug, Clone, PartialEq, Default)]
pub enum InputState {
    /// No gesture in progress; waiting for the next pointer-down.
    #[default]
    Idle,
    /// Primary button is down but the pointer has not moved far enough to
    /// count as a drag.
    Pressing {
        /// Marker under the pointer at press time, if any.
        target: Option<DragTarget>,
        /// Screen-space press position.
        origin: Point,
    },
    /// The view follows the pointer.
    Panning {
        /// Screen-space position of the previous pointer event, used to compute pan delta.
        last_screen: Point,
    },
    /// A marker follows the pointer.
    Dragging {
        target: DragTarget,
        /// Screen-space press position.
        origin: Point,
        /// Latest inverted pointer position, for the live marker preview.
        /// `None` while image bounds are unknown.
        preview: Option<PercentPoint>,
    },
}

impl InputState {
    #[must_use]
    pub fn is_idle(&self) -> bool {
        matches!(self, Self::Idle)
    }

    /// The marker currently being dragged, if any.
    #[must_use]
    pub fn dragged(&self) -> Option<&DragTarget> {
        match self {
            Self::Dragging { target, .. } => Some(target),
            _ => None,
        }
    }

    /// Preview position of the dragged marker, if one is known.
    #[must_use]
    pub fn preview_for(&self, target: &DragTarget) -> Option<PercentPoint> {
        match self {
            Self::Dragging { target: t, preview, .. } if t == target => *preview,
            _ => None,
        }
    }
}
