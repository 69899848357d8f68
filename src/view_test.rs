#![allow(clippy::float_cmp)]

use super::*;
use crate::camera::Point;
use crate::site::Icon;

const FRAME: f64 = 1.0 / 60.0;

fn controller() -> ViewController {
    ViewController::new(&ArenaConfig::default())
}

fn settle(view: &mut ViewController) {
    for _ in 0..600 {
        if !view.tick(FRAME) {
            return;
        }
    }
}

fn site(id: &str, x: f64, y: f64) -> Site {
    Site {
        id: id.to_owned(),
        name: id.to_owned(),
        description: String::new(),
        icon: Icon::default(),
        badge: String::new(),
        pos_x: x,
        pos_y: y,
        color: String::new(),
        path_color: None,
    }
}

fn layout() -> (ContainerRect, ImageBounds) {
    (
        ContainerRect::new(20.0, 40.0, 1000.0, 800.0),
        ImageBounds { width: 800.0, height: 600.0, left: 100.0, top: 100.0 },
    )
}

// --- Zoom ---

#[test]
fn zoom_in_saturates_at_max() {
    let mut v = controller();
    for _ in 0..20 {
        v.zoom_in();
    }
    assert_eq!(v.target_camera().zoom, 6.0);
    assert!(!v.zoom_in());
    settle(&mut v);
    assert_eq!(v.camera().zoom, 6.0);
}

#[test]
fn zoom_out_saturates_at_min() {
    let mut v = controller();
    for _ in 0..20 {
        v.zoom_out();
    }
    assert_eq!(v.target_camera().zoom, 0.5);
    assert!(!v.zoom_out());
}

#[test]
fn zoom_in_steps_by_half() {
    let mut v = controller();
    assert!(v.zoom_in());
    assert_eq!(v.target_camera().zoom, 1.5);
    // Animated: the live camera has not moved yet.
    assert_eq!(v.camera().zoom, 1.0);
}

#[test]
fn wheel_down_zooms_out() {
    let mut v = controller();
    v.wheel(100.0);
    assert!((v.target_camera().zoom - 0.8).abs() < 1e-12);
    v.wheel(-1000.0);
    assert!((v.target_camera().zoom - 2.8).abs() < 1e-12);
}

#[test]
fn wheel_is_clamped() {
    let mut v = controller();
    v.wheel(-100_000.0);
    assert_eq!(v.target_camera().zoom, 6.0);
    v.wheel(100_000.0);
    assert_eq!(v.target_camera().zoom, 0.5);
}

#[test]
fn wheel_ignored_in_editor_mode() {
    let mut v = controller();
    v.set_editor_mode(true);
    assert!(!v.wheel(-500.0));
    assert_eq!(v.target_camera().zoom, 1.0);
}

// --- Focus ---

#[test]
fn focus_sets_state_and_zoom_target() {
    let mut v = controller();
    v.focus_on_site(&site("a", 30.0, 40.0), None);
    assert_eq!(v.focus(), &FocusState::Focused("a".to_owned()));
    assert_eq!(v.target_camera().zoom, 2.5);
}

#[test]
fn empirical_focus_without_bounds() {
    let mut v = controller();
    v.focus_on_site(&site("a", 30.0, 40.0), None);
    let t = v.target_camera();
    // (50 - 30) * 2.5 * 10, (50 - 40) * 2.5 * 10
    assert!((t.pan_x - 500.0).abs() < 1e-9);
    assert!((t.pan_y - 250.0).abs() < 1e-9);
}

#[test]
fn empirical_strategy_ignores_bounds() {
    let config = ArenaConfig { focus_strategy: FocusStrategy::Empirical, ..ArenaConfig::default() };
    let mut v = ViewController::new(&config);
    v.focus_on_site(&site("a", 60.0, 50.0), Some(layout()));
    let t = v.target_camera();
    assert!((t.pan_x + 250.0).abs() < 1e-9);
    assert!(t.pan_y.abs() < 1e-9);
}

#[test]
fn geometric_focus_centres_site() {
    let mut v = controller();
    let (container, bounds) = layout();
    let s = site("a", 22.0, 71.0);
    v.focus_on_site(&s, Some((container, bounds)));
    settle(&mut v);
    let on_screen = v.camera().percent_to_screen(s.position(), &container, &bounds);
    let center = container.center();
    assert!(on_screen.distance(center) < 0.5, "{on_screen:?} vs {center:?}");
}

#[test]
fn focus_clamps_out_of_range_positions() {
    let mut v = controller();
    v.focus_on_site(&site("a", -20.0, 130.0), None);
    let t = v.target_camera();
    assert!((t.pan_x - 1250.0).abs() < 1e-9);
    assert!((t.pan_y + 1250.0).abs() < 1e-9);
}

#[test]
fn latest_focus_wins() {
    let mut v = controller();
    let (container, bounds) = layout();
    let a = site("a", 10.0, 10.0);
    let b = site("b", 80.0, 60.0);
    v.focus_on_site(&a, Some((container, bounds)));
    v.tick(FRAME);
    v.focus_on_site(&b, Some((container, bounds)));
    settle(&mut v);

    let (bx, by) = v.focus_pan(&b, 2.5, Some((container, bounds)));
    let cam = v.camera();
    assert_eq!(v.focus(), &FocusState::Focused("b".to_owned()));
    assert!((cam.zoom - 2.5).abs() < 1e-2);
    assert!((cam.pan_x - bx).abs() < 1.0);
    assert!((cam.pan_y - by).abs() < 1.0);
}

#[test]
fn reset_returns_to_identity_and_idle() {
    let mut v = controller();
    v.focus_on_site(&site("a", 30.0, 40.0), None);
    settle(&mut v);
    v.reset_view();
    assert_eq!(v.focus(), &FocusState::Idle);
    settle(&mut v);
    let cam = v.camera();
    assert_eq!(cam.zoom, 1.0);
    assert_eq!(cam.pan_x, 0.0);
    assert_eq!(cam.pan_y, 0.0);
}

// --- Pan ---

#[test]
fn pan_by_is_immediate() {
    let mut v = controller();
    v.pan_by(15.0, -7.0);
    let cam = v.camera();
    assert_eq!(cam.pan_x, 15.0);
    assert_eq!(cam.pan_y, -7.0);
    assert!(!v.is_animating());
}

#[test]
fn pan_by_is_bounded() {
    let mut v = controller();
    v.pan_by(1e9, -1e9);
    let cam = v.camera();
    assert_eq!(cam.pan_x, PAN_LIMIT_PX);
    assert_eq!(cam.pan_y, -PAN_LIMIT_PX);
}

#[test]
fn pan_keeps_point_under_cursor() {
    let mut v = controller();
    let (container, bounds) = layout();
    let grab = Point::new(300.0, 200.0);
    let before = v.camera().screen_to_percent(grab, &container, &bounds);
    v.pan_by(40.0, 25.0);
    let moved = Point::new(grab.x + 40.0, grab.y + 25.0);
    let after = v.camera().screen_to_percent(moved, &container, &bounds);
    assert!((before.x - after.x).abs() < 1e-9);
    assert!((before.y - after.y).abs() < 1e-9);
}

// --- Modes ---

#[test]
fn modes_start_locked() {
    let v = controller();
    assert_eq!(v.mode(), NavigationMode::Locked);
    assert!(!v.can_pan());
    assert!(!v.can_drag_markers());
}

#[test]
fn enabling_one_mode_disables_the_other() {
    let mut v = controller();
    v.set_pan_mode(true);
    assert!(v.is_pan_mode());
    v.set_marker_drag_mode(true);
    assert!(v.is_marker_drag_mode());
    assert!(!v.is_pan_mode());
    v.set_pan_mode(true);
    assert!(v.is_pan_mode());
    assert!(!v.is_marker_drag_mode());
}

#[test]
fn disabling_inactive_mode_is_noop() {
    let mut v = controller();
    v.set_pan_mode(true);
    v.set_marker_drag_mode(false);
    assert!(v.is_pan_mode());
    v.set_pan_mode(false);
    assert_eq!(v.mode(), NavigationMode::Locked);
}

#[test]
fn effective_modes_respect_editor_flag() {
    let mut v = controller();
    v.set_pan_mode(true);
    assert!(v.can_pan());
    v.set_editor_mode(true);
    assert!(!v.can_pan());

    v.set_marker_drag_mode(true);
    assert!(v.can_drag_markers());
    v.set_editor_mode(false);
    assert!(!v.can_drag_markers());
}
