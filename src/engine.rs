use tracing::{debug, warn};
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{CanvasRenderingContext2d, HtmlCanvasElement, HtmlImageElement};

use crate::camera::{Camera, Point};
use crate::config::{ArenaConfig, ConfigError};
use crate::coords::{PercentPoint, TelemetryPoint, robot_display_position};
use crate::hit::{self, PickRadii, Projection};
use crate::input::{Button, Cursor, DragTarget, InputState, WheelDelta};
use crate::layout::{BoundsTracker, ContainerRect, ImageBounds};
use crate::render;
use crate::scene::{self, Scene, SceneSource};
use crate::site::{PathHistory, Site, SiteError, SiteId, SiteList, StationStatuses};
use crate::view::{FocusState, ViewController};

#[cfg(test)]
#[path = "engine_test.rs"]
mod engine_test;

/// Actions returned from input handlers for the host to process.
#[derive(Debug, Clone, PartialEq)]
pub enum Action {
    /// The user chose to start the selected site's quiz.
    SiteDiscover(SiteId),
    /// A site marker was clicked in normal mode.
    SiteClick(Site),
    /// A site was dropped at a new position (percent, one decimal).
    PosUpdate { id: SiteId, x: f64, y: f64 },
    /// The robot marker was dropped (telemetry units, one decimal).
    RobotPosUpdate { x: f64, y: f64 },
    /// A site marker was clicked in editor mode outside marker-drag mode.
    EditSite(Site),
    SetCursor(String),
    RenderNeeded,
}

/// Core arena state: all logic that doesn't depend on the canvas element.
///
/// Separated from `Engine` so it can be tested without WASM/browser dependencies.
/// Sites, robot position, path and statuses are owned by the host and only
/// replaced wholesale through the setters; moves made here go back out as
/// [`Action`]s.
pub struct ArenaCore {
    config: ArenaConfig,
    pub view: ViewController,
    pub layout: BoundsTracker,
    pub input: InputState,
    sites: SiteList,
    robot_pos: Option<PercentPoint>,
    path: PathHistory,
    statuses: StationStatuses,
    hovered: Option<SiteId>,
    selected: Option<SiteId>,
    /// The host's focus request, kept until cleared so the framing follows
    /// later site lists.
    focus_request: Option<SiteId>,
    background_url: Option<String>,
    cursor: Cursor,
}

impl Default for ArenaCore {
    fn default() -> Self {
        Self::from_valid_config(ArenaConfig::default())
    }
}

impl ArenaCore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] found by [`ArenaConfig::validate`].
    pub fn with_config(config: ArenaConfig) -> Result<Self, ConfigError> {
        if let Err(e) = config.validate() {
            warn!(error = %e, "arena config rejected");
            return Err(e);
        }
        Ok(Self::from_valid_config(config))
    }

    fn from_valid_config(config: ArenaConfig) -> Self {
        Self {
            view: ViewController::new(&config),
            layout: BoundsTracker::new(),
            input: InputState::Idle,
            sites: SiteList::default(),
            robot_pos: None,
            path: PathHistory::with_capacity(config.path_capacity),
            statuses: StationStatuses::new(),
            hovered: None,
            selected: None,
            focus_request: None,
            background_url: None,
            cursor: Cursor::Default,
            config,
        }
    }

    // --- Data inputs ---

    /// Replace the site list.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::DuplicateId`] and keeps the previous list.
    pub fn set_sites(&mut self, sites: Vec<Site>) -> Result<Vec<Action>, SiteError> {
        let sites = SiteList::new(sites)?;
        let previous = self.focus_request.as_deref().and_then(|id| self.sites.get(id)).map(Site::position);
        self.sites = sites;
        let known = |id: &Option<SiteId>| id.as_deref().is_some_and(|id| self.sites.get(id).is_some());
        if !known(&self.hovered) {
            self.hovered = None;
        }
        if !known(&self.selected) {
            self.selected = None;
        }
        if let Some(DragTarget::Site(id)) = self.input.dragged() {
            if self.sites.get(id).is_none() {
                self.input = InputState::Idle;
            }
        }
        self.refresh_focus(previous);
        Ok(vec![Action::RenderNeeded])
    }

    /// Reconcile the view with the requested focus after a new site list:
    /// follow a moved site, pick up a site that just arrived, and reset when
    /// the focused site is gone.
    fn refresh_focus(&mut self, previous: Option<PercentPoint>) {
        let Some(id) = self.focus_request.clone() else {
            return;
        };
        let focused = matches!(self.view.focus(), FocusState::Focused(f) if *f == id);
        match self.sites.get(&id) {
            Some(site) if !focused || previous != Some(site.position()) => {
                let layout = self.measured_layout();
                self.view.focus_on_site(site, layout);
            }
            None if focused => {
                debug!(site = %id, "focused site removed");
                self.view.reset_view();
            }
            _ => {}
        }
    }

    /// Replace the site list from JSON.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError`] for malformed JSON or duplicate ids.
    pub fn set_sites_json(&mut self, raw: &str) -> Result<Vec<Action>, SiteError> {
        let sites: Vec<Site> = serde_json::from_str(raw)?;
        self.set_sites(sites)
    }

    /// Robot display position in percent, already offset by the home anchor.
    pub fn set_robot_pos(&mut self, pos: Option<PercentPoint>) -> Vec<Action> {
        self.robot_pos = pos;
        vec![Action::RenderNeeded]
    }

    /// Place the robot from a raw telemetry sample and its home anchor.
    pub fn set_robot_telemetry(&mut self, telemetry: TelemetryPoint, home: TelemetryPoint) -> Vec<Action> {
        self.set_robot_pos(Some(robot_display_position(telemetry, home)))
    }

    pub fn push_path_point(&mut self, point: TelemetryPoint) -> Vec<Action> {
        self.path.push(point);
        vec![Action::RenderNeeded]
    }

    pub fn set_path(&mut self, points: &[TelemetryPoint]) -> Vec<Action> {
        self.path.replace(points);
        vec![Action::RenderNeeded]
    }

    pub fn set_statuses(&mut self, statuses: StationStatuses) -> Vec<Action> {
        self.statuses = statuses;
        vec![Action::RenderNeeded]
    }

    /// Focus a site by id, or reset the view when `None`.
    ///
    /// An id not in the current list is remembered and applied once a site
    /// list containing it arrives.
    pub fn set_focused_site(&mut self, id: Option<&str>) -> Vec<Action> {
        let Some(id) = id else {
            self.focus_request = None;
            self.view.reset_view();
            return vec![Action::RenderNeeded];
        };
        self.focus_request = Some(id.to_owned());
        let layout = self.measured_layout();
        let Some(site) = self.sites.get(id) else {
            warn!(site = id, "focus requested for unknown site");
            return Vec::new();
        };
        self.view.focus_on_site(site, layout);
        vec![Action::RenderNeeded]
    }

    pub fn set_editor_mode(&mut self, editor: bool) -> Vec<Action> {
        if self.view.editor_mode() == editor {
            return Vec::new();
        }
        self.view.set_editor_mode(editor);
        // A gesture started under the other mode's rules is abandoned.
        self.input = InputState::Idle;
        if editor {
            self.selected = None;
        }
        let mut actions = vec![Action::RenderNeeded];
        self.sync_cursor(&mut actions);
        actions
    }

    // --- Background / layout ---

    /// Switch the background image. The host reports the new image's size
    /// through [`ArenaCore::on_image_load`] once it resolves.
    pub fn set_background_url(&mut self, url: Option<String>) -> Vec<Action> {
        self.background_url = url.filter(|u| !u.is_empty());
        self.layout.on_image_reset();
        vec![Action::RenderNeeded]
    }

    /// The image source to load: the host's, or the default asset.
    #[must_use]
    pub fn background_url(&self) -> &str {
        self.background_url.as_deref().unwrap_or(&self.config.default_background_url)
    }

    pub fn on_resize(&mut self, rect: ContainerRect) -> Vec<Action> {
        let changed = self.layout.on_resize(rect);
        self.after_layout_change(changed)
    }

    pub fn on_image_load(&mut self, natural_w: f64, natural_h: f64) -> Vec<Action> {
        let changed = self.layout.on_image_load(natural_w, natural_h);
        self.after_layout_change(changed)
    }

    pub fn on_image_error(&mut self) -> Vec<Action> {
        let changed = self.layout.on_image_error();
        self.after_layout_change(changed)
    }

    /// New bounds move the centre a focused site was framed against, so the
    /// focus pan is recomputed. Losing the bounds keeps the current framing.
    fn after_layout_change(&mut self, changed: bool) -> Vec<Action> {
        if !changed {
            return Vec::new();
        }
        let Some(layout) = self.measured_layout() else {
            return vec![Action::RenderNeeded];
        };
        if let FocusState::Focused(id) = self.view.focus().clone() {
            if let Some(site) = self.sites.get(&id) {
                self.view.focus_on_site(site, Some(layout));
            }
        }
        vec![Action::RenderNeeded]
    }

    fn measured_layout(&self) -> Option<(ContainerRect, ImageBounds)> {
        Some((self.layout.container()?, self.layout.bounds()?))
    }

    fn projection(&self) -> Option<Projection> {
        Projection::new(self.view.camera(), self.layout.container(), self.layout.bounds())
    }

    // --- View commands ---

    pub fn zoom_in(&mut self) -> Vec<Action> {
        if self.view.zoom_in() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn zoom_out(&mut self) -> Vec<Action> {
        if self.view.zoom_out() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    pub fn reset_view(&mut self) -> Vec<Action> {
        self.focus_request = None;
        self.view.reset_view();
        vec![Action::RenderNeeded]
    }

    pub fn set_pan_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.view.set_pan_mode(enabled);
        let mut actions = Vec::new();
        self.sync_cursor(&mut actions);
        actions
    }

    pub fn set_marker_drag_mode(&mut self, enabled: bool) -> Vec<Action> {
        self.view.set_marker_drag_mode(enabled);
        let mut actions = vec![Action::RenderNeeded];
        self.sync_cursor(&mut actions);
        actions
    }

    // --- Site detail ---

    /// Start the selected site's quiz and close its detail view.
    pub fn discover_selected(&mut self) -> Vec<Action> {
        match self.selected.take() {
            Some(id) => vec![Action::SiteDiscover(id), Action::RenderNeeded],
            None => Vec::new(),
        }
    }

    /// Close the detail view without discovering.
    pub fn close_detail(&mut self) -> Vec<Action> {
        if self.selected.take().is_some() { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    // --- Input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let target = self.pick(screen_pt);
        self.input = if target.is_none() && self.view.can_pan() {
            InputState::Panning { last_screen: screen_pt }
        } else {
            InputState::Pressing { target, origin: screen_pt }
        };
        let mut actions = Vec::new();
        self.sync_cursor(&mut actions);
        actions
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle => {
                let hovered = match self.pick(screen_pt) {
                    Some(DragTarget::Site(id)) => Some(id),
                    _ => None,
                };
                if hovered != self.hovered {
                    self.hovered = hovered;
                    actions.push(Action::RenderNeeded);
                }
            }
            InputState::Pressing { target, origin } => {
                self.input = self.promote_press(target, origin, screen_pt, &mut actions);
            }
            InputState::Panning { last_screen } => {
                self.view.pan_by(screen_pt.x - last_screen.x, screen_pt.y - last_screen.y);
                self.input = InputState::Panning { last_screen: screen_pt };
                actions.push(Action::RenderNeeded);
            }
            InputState::Dragging { target, origin, .. } => {
                let preview = self.invert(screen_pt);
                self.input = InputState::Dragging { target, origin, preview };
                actions.push(Action::RenderNeeded);
            }
        }
        self.sync_cursor(&mut actions);
        actions
    }

    /// A press turns into a marker drag or a pan once it travels past the
    /// threshold; otherwise it stays a pending click.
    fn promote_press(
        &mut self,
        target: Option<DragTarget>,
        origin: Point,
        screen_pt: Point,
        actions: &mut Vec<Action>,
    ) -> InputState {
        if origin.distance(screen_pt) <= self.config.drag_threshold_px {
            return InputState::Pressing { target, origin };
        }
        match target {
            Some(target) if self.view.can_drag_markers() => {
                actions.push(Action::RenderNeeded);
                InputState::Dragging { target, origin, preview: self.invert(screen_pt) }
            }
            _ if self.view.can_pan() => {
                self.view.pan_by(screen_pt.x - origin.x, screen_pt.y - origin.y);
                actions.push(Action::RenderNeeded);
                InputState::Panning { last_screen: screen_pt }
            }
            target => InputState::Pressing { target, origin },
        }
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        if button != Button::Primary {
            return Vec::new();
        }
        let mut actions = Vec::new();
        match std::mem::take(&mut self.input) {
            InputState::Idle | InputState::Panning { .. } => {}
            InputState::Pressing { target, origin } => {
                let moved = origin.distance(screen_pt) > self.config.drag_threshold_px;
                match target {
                    // Released past the threshold with no move in between.
                    Some(target) if moved && self.view.can_drag_markers() => {
                        self.drop_marker(&target, screen_pt, &mut actions);
                        actions.push(Action::RenderNeeded);
                    }
                    Some(target) if !moved => self.click(&target, &mut actions),
                    _ => {}
                }
            }
            InputState::Dragging { target, .. } => {
                self.drop_marker(&target, screen_pt, &mut actions);
                actions.push(Action::RenderNeeded);
            }
        }
        self.sync_cursor(&mut actions);
        actions
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        if self.view.wheel(delta.dy) { vec![Action::RenderNeeded] } else { Vec::new() }
    }

    fn click(&mut self, target: &DragTarget, actions: &mut Vec<Action>) {
        let DragTarget::Site(id) = target else {
            return;
        };
        let Some(site) = self.sites.get(id) else {
            return;
        };
        if !self.view.editor_mode() {
            self.selected = Some(site.id.clone());
            actions.push(Action::SiteClick(site.clone()));
            actions.push(Action::RenderNeeded);
        } else if !self.view.is_marker_drag_mode() {
            actions.push(Action::EditSite(site.clone()));
        }
    }

    /// Bounds and transform are read now, at release, not from drag start.
    fn drop_marker(&self, target: &DragTarget, screen_pt: Point, actions: &mut Vec<Action>) {
        let Some(pct) = self.invert(screen_pt) else {
            debug!(?target, "drop ignored: image bounds unknown");
            return;
        };
        match target {
            DragTarget::Site(id) => {
                let p = hit::drop_site_position(pct);
                debug!(site = %id, x = p.x, y = p.y, "site moved");
                actions.push(Action::PosUpdate { id: id.clone(), x: p.x, y: p.y });
            }
            DragTarget::Robot => {
                let t = hit::drop_robot_position(pct);
                debug!(x = t.x, y = t.y, "robot moved");
                actions.push(Action::RobotPosUpdate { x: t.x, y: t.y });
            }
        }
    }

    fn pick(&self, screen_pt: Point) -> Option<DragTarget> {
        let projection = self.projection()?;
        let radii = PickRadii { site: self.config.site_hit_radius_px, robot: self.config.robot_hit_radius_px };
        hit::pick_marker(screen_pt, &projection, &self.sites, self.robot_pos, radii)
    }

    fn invert(&self, screen_pt: Point) -> Option<PercentPoint> {
        hit::invert_pointer(screen_pt, self.view.camera(), self.layout.container(), self.layout.bounds())
    }

    // --- Cursor ---

    /// Cursor for the current gesture and hover state.
    #[must_use]
    pub fn cursor(&self) -> Cursor {
        match &self.input {
            InputState::Panning { .. } => Cursor::Grabbing,
            InputState::Dragging { .. } => Cursor::Move,
            InputState::Pressing { target: Some(_), .. } => self.marker_cursor(),
            InputState::Idle if self.hovered.is_some() => self.marker_cursor(),
            _ if self.view.can_pan() => Cursor::Grab,
            _ => Cursor::Default,
        }
    }

    fn marker_cursor(&self) -> Cursor {
        if self.view.can_drag_markers() { Cursor::Move } else { Cursor::Pointer }
    }

    fn sync_cursor(&mut self, actions: &mut Vec<Action>) {
        let cursor = self.cursor();
        if cursor != self.cursor {
            self.cursor = cursor;
            actions.push(Action::SetCursor(cursor.as_css().to_owned()));
        }
    }

    // --- Animation ---

    /// Advance view animation by `dt` seconds. Returns whether another frame
    /// is needed.
    pub fn tick(&mut self, dt: f64) -> bool {
        self.view.tick(dt)
    }

    // --- Queries ---

    /// The current camera state.
    #[must_use]
    pub fn camera(&self) -> Camera {
        self.view.camera()
    }

    #[must_use]
    pub fn config(&self) -> &ArenaConfig {
        &self.config
    }

    #[must_use]
    pub fn sites(&self) -> &SiteList {
        &self.sites
    }

    #[must_use]
    pub fn robot_pos(&self) -> Option<PercentPoint> {
        self.robot_pos
    }

    #[must_use]
    pub fn path(&self) -> &PathHistory {
        &self.path
    }

    #[must_use]
    pub fn editor_mode(&self) -> bool {
        self.view.editor_mode()
    }

    /// The site whose detail view is open.
    #[must_use]
    pub fn selected_site(&self) -> Option<&Site> {
        self.selected.as_deref().and_then(|id| self.sites.get(id))
    }

    #[must_use]
    pub fn hovered_site(&self) -> Option<&Site> {
        self.hovered.as_deref().and_then(|id| self.sites.get(id))
    }

    #[must_use]
    pub fn focused_site_id(&self) -> Option<&str> {
        match self.view.focus() {
            FocusState::Focused(id) => Some(id),
            FocusState::Idle => None,
        }
    }

    /// CSS transform for DOM hosts that position their own map layer.
    #[must_use]
    pub fn css_transform(&self) -> String {
        self.view.camera().css_transform(self.config.tilt_deg)
    }

    /// The display list for the current frame.
    #[must_use]
    pub fn scene(&self) -> Scene {
        scene::build(&SceneSource {
            container: self.layout.container(),
            projection: self.projection(),
            sites: &self.sites,
            path: &self.path,
            robot: self.robot_pos,
            statuses: &self.statuses,
            input: &self.input,
            hovered: self.hovered.as_deref(),
            selected: self.selected.as_deref(),
            focused: self.focused_site_id(),
            draggable: self.view.can_drag_markers(),
        })
    }
}

/// The full arena engine. Wraps `ArenaCore` and owns the browser canvas element.
pub struct Engine {
    canvas: HtmlCanvasElement,
    image: Option<HtmlImageElement>,
    dpr: f64,
    pub core: ArenaCore,
}

impl Engine {
    /// Create a new engine bound to the given canvas element.
    #[must_use]
    pub fn new(canvas: HtmlCanvasElement) -> Self {
        Self { canvas, image: None, dpr: 1.0, core: ArenaCore::new() }
    }

    /// # Errors
    ///
    /// Returns the first [`ConfigError`] in `config`.
    pub fn with_config(canvas: HtmlCanvasElement, config: ArenaConfig) -> Result<Self, ConfigError> {
        Ok(Self { canvas, image: None, dpr: 1.0, core: ArenaCore::with_config(config)? })
    }

    /// Attach the decoded background image and record its natural size.
    pub fn set_image(&mut self, image: HtmlImageElement) -> Vec<Action> {
        let (w, h) = (f64::from(image.natural_width()), f64::from(image.natural_height()));
        self.image = Some(image);
        self.core.on_image_load(w, h)
    }

    /// The background image failed to load.
    pub fn clear_image(&mut self) -> Vec<Action> {
        self.image = None;
        self.core.on_image_error()
    }

    /// Update container geometry and device pixel ratio.
    pub fn set_viewport(&mut self, rect: ContainerRect, dpr: f64) -> Vec<Action> {
        self.dpr = if dpr > 0.0 { dpr } else { 1.0 };
        self.core.on_resize(rect)
    }

    // --- Delegated input events ---

    pub fn on_pointer_down(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_down(screen_pt, button)
    }

    pub fn on_pointer_move(&mut self, screen_pt: Point) -> Vec<Action> {
        self.core.on_pointer_move(screen_pt)
    }

    pub fn on_pointer_up(&mut self, screen_pt: Point, button: Button) -> Vec<Action> {
        self.core.on_pointer_up(screen_pt, button)
    }

    pub fn on_wheel(&mut self, delta: WheelDelta) -> Vec<Action> {
        self.core.on_wheel(delta)
    }

    pub fn tick(&mut self, dt: f64) -> bool {
        self.core.tick(dt)
    }

    // --- Render ---

    /// Draw the current state to the canvas.
    ///
    /// # Errors
    ///
    /// Returns `Err` if the 2D context is unavailable or a `Canvas2D` call fails.
    pub fn render(&self) -> Result<(), JsValue> {
        let Some(ctx) = self.canvas.get_context("2d")? else {
            return Err(JsValue::from_str("canvas has no 2d context"));
        };
        let ctx = ctx.dyn_into::<CanvasRenderingContext2d>()?;
        render::draw(&ctx, &self.core.scene(), self.image.as_ref(), self.dpr)
    }
}
