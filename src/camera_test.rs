#![allow(clippy::float_cmp)]

use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

fn point_approx_eq(a: Point, b: Point) -> bool {
    approx_eq(a.x, b.x) && approx_eq(a.y, b.y)
}

fn container() -> ContainerRect {
    ContainerRect::new(0.0, 0.0, 1000.0, 800.0)
}

fn bounds() -> ImageBounds {
    ImageBounds { width: 800.0, height: 600.0, left: 100.0, top: 50.0 }
}

fn cam(zoom: f64, pan_x: f64, pan_y: f64) -> Camera {
    Camera { pan_x, pan_y, zoom }
}

// --- Point ---

#[test]
fn point_distance() {
    assert!(approx_eq(Point::new(0.0, 0.0).distance(Point::new(3.0, 4.0)), 5.0));
}

// --- Defaults ---

#[test]
fn camera_default_is_identity() {
    let c = Camera::default();
    assert_eq!(c.zoom, 1.0);
    assert_eq!(c.pan_x, 0.0);
    assert_eq!(c.pan_y, 0.0);
}

// --- screen_to_map / map_to_screen ---

#[test]
fn container_center_maps_to_map_origin_at_identity() {
    let m = Camera::default().screen_to_map(Point::new(500.0, 400.0), &container());
    assert!(point_approx_eq(m, Point::new(0.0, 0.0)));
}

#[test]
fn screen_to_map_undoes_pan_then_zoom() {
    let m = cam(2.0, 50.0, -30.0).screen_to_map(Point::new(600.0, 400.0), &container());
    // rel = (100, 0); minus pan = (50, 30); / zoom = (25, 15)
    assert!(point_approx_eq(m, Point::new(25.0, 15.0)));
}

#[test]
fn screen_to_map_respects_container_offset() {
    let c = ContainerRect::new(200.0, 100.0, 1000.0, 800.0);
    let m = Camera::default().screen_to_map(Point::new(700.0, 500.0), &c);
    assert!(point_approx_eq(m, Point::new(0.0, 0.0)));
}

#[test]
fn map_to_screen_inverts_screen_to_map() {
    let c = cam(3.5, -120.0, 42.0);
    let s = Point::new(317.0, 611.0);
    let back = c.map_to_screen(c.screen_to_map(s, &container()), &container());
    assert!(point_approx_eq(back, s));
}

// --- percent projection ---

#[test]
fn forward_then_inverse_recovers_percent_point() {
    let c = cam(2.0, 50.0, -30.0);
    let screen = c.percent_to_screen(PercentPoint::new(30.0, 70.0), &container(), &bounds());
    assert!(point_approx_eq(screen, Point::new(230.0, 510.0)));
    let pct = c.screen_to_percent(screen, &container(), &bounds());
    assert!((pct.x - 30.0).abs() < 0.1);
    assert!((pct.y - 70.0).abs() < 0.1);
}

#[test]
fn image_corners_at_identity_land_on_bounds() {
    let c = Camera::default();
    let tl = c.percent_to_screen(PercentPoint::new(0.0, 0.0), &container(), &bounds());
    let br = c.percent_to_screen(PercentPoint::new(100.0, 100.0), &container(), &bounds());
    assert!(point_approx_eq(tl, Point::new(100.0, 50.0)));
    assert!(point_approx_eq(br, Point::new(900.0, 650.0)));
}

#[test]
fn inverse_is_exact_across_a_grid() {
    let c = cam(4.25, -310.0, 77.0);
    let cont = ContainerRect::new(37.0, 12.0, 1280.0, 720.0);
    let b = ImageBounds { width: 960.0, height: 720.0, left: 160.0, top: 0.0 };
    for xi in 0..=10 {
        for yi in 0..=10 {
            let p = PercentPoint::new(f64::from(xi) * 10.0, f64::from(yi) * 10.0);
            let back = c.screen_to_percent(c.percent_to_screen(p, &cont, &b), &cont, &b);
            assert!((back.x - p.x).abs() < 1e-9 && (back.y - p.y).abs() < 1e-9, "{p:?} -> {back:?}");
        }
    }
}

#[test]
fn percent_to_map_center_of_centered_image_is_origin() {
    let centered = ImageBounds { width: 800.0, height: 600.0, left: 100.0, top: 100.0 };
    let m = percent_to_map(PercentPoint::new(50.0, 50.0), &container(), &centered);
    assert!(point_approx_eq(m, Point::new(0.0, 0.0)));
}

// --- helpers ---

#[test]
fn screen_dist_to_map_divides_by_zoom() {
    assert!(approx_eq(cam(4.0, 0.0, 0.0).screen_dist_to_map(32.0), 8.0));
}

#[test]
fn css_transform_without_tilt() {
    assert_eq!(cam(2.0, 10.0, -5.0).css_transform(0.0), "translate(10px, -5px) scale(2)");
}

#[test]
fn css_transform_with_tilt_prepends_perspective() {
    let css = cam(1.0, 0.0, 0.0).css_transform(20.0);
    assert!(css.starts_with("perspective(1200px) rotateX(20deg)"));
    assert!(css.ends_with("scale(1)"));
}
