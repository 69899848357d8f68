//! Display list for one frame.
//!
//! [`build`] turns engine state into positioned, already-projected drawing
//! items; [`crate::render`] only walks the list. All points are in canvas
//! pixels, relative to the container's top-left corner. Keeping projection
//! here rather than in the painter lets the composition be tested without a
//! browser.

#[cfg(test)]
#[path = "scene_test.rs"]
mod scene_test;

use crate::camera::Point;
use crate::coords::{PercentPoint, TelemetryPoint, percent_to_telemetry, telemetry_to_percent};
use crate::hit::Projection;
use crate::input::{DragTarget, InputState};
use crate::layout::ContainerRect;
use crate::site::{Icon, PathHistory, SiteId, SiteList, StationStatuses};

/// Stroke of a route segment whose destination sets no `path_color`.
pub const DEFAULT_ROUTE_COLOR: &str = "rgba(255, 255, 255, 0.35)";

/// Axis-aligned rectangle in canvas pixels.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x: f64,
    pub y: f64,
    pub width: f64,
    pub height: f64,
}

/// Straight route line between two consecutive sites.
#[derive(Debug, Clone, PartialEq)]
pub struct RouteSegment {
    pub from: Point,
    pub to: Point,
    pub color: String,
}

#[allow(clippy::struct_excessive_bools)]
#[derive(Debug, Clone, PartialEq)]
pub struct SiteMarker {
    pub id: SiteId,
    pub name: String,
    pub icon: Icon,
    pub color: String,
    /// Map position actually drawn: clamped into the image, or the live drag preview.
    pub position: PercentPoint,
    pub center: Point,
    /// Name label is shown.
    pub hovered: bool,
    pub selected: bool,
    pub focused: bool,
    /// Station spinner is shown.
    pub busy: bool,
    pub draggable: bool,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RobotMarker {
    pub position: PercentPoint,
    pub center: Point,
    /// `ACTIVE SYNC: x, y` in whole telemetry units.
    pub label: String,
    pub draggable: bool,
}

/// Everything the painter draws for one frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Scene {
    pub width: f64,
    pub height: f64,
    pub zoom: f64,
    /// Where the background image lands; `None` until bounds are measured.
    pub background: Option<Rect>,
    pub route: Vec<RouteSegment>,
    pub path: Vec<Point>,
    pub sites: Vec<SiteMarker>,
    pub robot: Option<RobotMarker>,
}

impl Scene {
    /// Whether anything positioned is drawn.
    #[must_use]
    pub fn is_blank(&self) -> bool {
        self.background.is_none() && self.route.is_empty() && self.path.is_empty() && self.sites.is_empty()
            && self.robot.is_none()
    }
}

/// Borrowed engine state the scene is built from.
pub struct SceneSource<'a> {
    pub container: Option<ContainerRect>,
    pub projection: Option<Projection>,
    pub sites: &'a SiteList,
    pub path: &'a PathHistory,
    pub robot: Option<PercentPoint>,
    pub statuses: &'a StationStatuses,
    pub input: &'a InputState,
    pub hovered: Option<&'a str>,
    pub selected: Option<&'a str>,
    pub focused: Option<&'a str>,
    /// Markers may be dragged (editor mode and marker-drag mode together).
    pub draggable: bool,
}

/// Compose the frame. With no projection only the canvas size is set.
#[must_use]
pub fn build(src: &SceneSource<'_>) -> Scene {
    let (width, height) = src.container.map_or((0.0, 0.0), |c| (c.width, c.height));
    let Some(projection) = src.projection else {
        return Scene { width, height, zoom: 1.0, ..Scene::default() };
    };
    let origin = Point::new(projection.container.left, projection.container.top);
    let local = |pct: PercentPoint| {
        let p = projection.to_screen(pct);
        Point::new(p.x - origin.x, p.y - origin.y)
    };

    let site_position = |id: &str, authored: PercentPoint| {
        src.input.preview_for(&DragTarget::Site(id.to_owned())).unwrap_or(authored).clamped()
    };

    let top_left = local(PercentPoint::new(0.0, 0.0));
    let bottom_right = local(PercentPoint::new(100.0, 100.0));
    let background = Rect {
        x: top_left.x,
        y: top_left.y,
        width: bottom_right.x - top_left.x,
        height: bottom_right.y - top_left.y,
    };

    let route = src
        .sites
        .route_segments()
        .map(|(a, b)| RouteSegment {
            from: local(site_position(&a.id, a.position())),
            to: local(site_position(&b.id, b.position())),
            color: b.path_color.clone().unwrap_or_else(|| DEFAULT_ROUTE_COLOR.to_owned()),
        })
        .collect();

    let path = src.path.iter().map(|p| local(telemetry_to_percent(*p))).collect();

    let sites = src
        .sites
        .iter()
        .map(|site| {
            let position = site_position(&site.id, site.position());
            SiteMarker {
                id: site.id.clone(),
                name: site.name.clone(),
                icon: site.icon.clone(),
                color: site.color.clone(),
                position,
                center: local(position),
                hovered: src.hovered == Some(site.id.as_str()),
                selected: src.selected == Some(site.id.as_str()),
                focused: src.focused == Some(site.id.as_str()),
                busy: src.statuses.get(&site.id).is_some_and(|s| s.is_busy()),
                draggable: src.draggable,
            }
        })
        .collect();

    let robot = src.robot.map(|authored| {
        let position = src.input.preview_for(&DragTarget::Robot).unwrap_or(authored).clamped();
        RobotMarker {
            position,
            center: local(position),
            label: sync_label(percent_to_telemetry(position)),
            draggable: src.draggable,
        }
    });

    Scene { width, height, zoom: projection.camera.zoom, background: Some(background), route, path, sites, robot }
}

/// Robot position label in whole telemetry units.
#[must_use]
pub fn sync_label(t: TelemetryPoint) -> String {
    // `+ 0.0` folds -0 into 0.
    format!("ACTIVE SYNC: {}, {}", t.x.round() + 0.0, t.y.round() + 0.0)
}
