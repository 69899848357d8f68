//! Rendering: paints a [`Scene`] onto a 2D canvas context.
//!
//! This module is the only place that touches [`web_sys::CanvasRenderingContext2d`].
//! Everything it draws is already projected by [`crate::scene::build`]; the
//! painter only chooses colours, strokes and glyphs.
//!
//! All fallible `Canvas2D` calls propagate errors via `Result<(), JsValue>`.
//! The top-level caller ([`crate::engine::Engine::render`]) handles the result.

use std::f64::consts::PI;

use wasm_bindgen::JsValue;
use web_sys::{CanvasRenderingContext2d, HtmlImageElement};

use crate::camera::Point;
use crate::scene::{Rect, RobotMarker, RouteSegment, Scene, SiteMarker};
use crate::site::Icon;

/// Site marker radius in screen pixels.
const SITE_RADIUS_PX: f64 = 24.0;

/// Robot marker radius in screen pixels.
const ROBOT_RADIUS_PX: f64 = 18.0;

const PATH_START_COLOR: &str = "rgba(99, 102, 241, 0.15)";
const PATH_END_COLOR: &str = "rgba(168, 85, 247, 0.6)";
const PATH_WIDTH_PX: f64 = 4.0;
const DASH_PX: f64 = 8.0;

const ROBOT_COLOR: &str = "#2563eb";
const BUSY_COLOR: &str = "#facc15";
const FALLBACK_MARKER_COLOR: &str = "#6366f1";

/// Draw the full scene.
///
/// `image` is the background; it is skipped until it has decoded. `dpr` is the
/// device pixel ratio.
///
/// # Errors
///
/// Returns `Err` if any `Canvas2D` call fails (e.g. invalid context state).
pub fn draw(
    ctx: &CanvasRenderingContext2d,
    scene: &Scene,
    image: Option<&HtmlImageElement>,
    dpr: f64,
) -> Result<(), JsValue> {
    // Layer 1: clear.
    ctx.set_transform(dpr, 0.0, 0.0, dpr, 0.0, 0.0)?;
    ctx.clear_rect(0.0, 0.0, scene.width, scene.height);

    // Layer 2: background map.
    if let (Some(rect), Some(img)) = (scene.background, image) {
        draw_background(ctx, img, rect)?;
    }

    // Layer 3: route and robot trail.
    for seg in &scene.route {
        draw_route_segment(ctx, seg)?;
    }
    draw_path(ctx, &scene.path)?;

    // Layer 4: markers, robot on top.
    for marker in &scene.sites {
        draw_site(ctx, marker)?;
    }
    if let Some(robot) = &scene.robot {
        draw_robot(ctx, robot)?;
    }

    Ok(())
}

// =============================================================
// Background / lines
// =============================================================

fn draw_background(ctx: &CanvasRenderingContext2d, img: &HtmlImageElement, rect: Rect) -> Result<(), JsValue> {
    if !img.complete() || img.natural_width() == 0 {
        return Ok(());
    }
    ctx.draw_image_with_html_image_element_and_dw_and_dh(img, rect.x, rect.y, rect.width, rect.height)
}

fn draw_route_segment(ctx: &CanvasRenderingContext2d, seg: &RouteSegment) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_stroke_style_str(&seg.color);
    ctx.set_line_width(2.0);
    set_dash(ctx, DASH_PX / 2.0)?;
    ctx.begin_path();
    ctx.move_to(seg.from.x, seg.from.y);
    ctx.line_to(seg.to.x, seg.to.y);
    ctx.stroke();
    ctx.restore();
    Ok(())
}

/// The trail fades from old to new by stroking each half in its own colour.
fn draw_path(ctx: &CanvasRenderingContext2d, points: &[Point]) -> Result<(), JsValue> {
    if points.len() < 2 {
        return Ok(());
    }
    ctx.save();
    ctx.set_line_width(PATH_WIDTH_PX);
    ctx.set_line_cap("round");
    ctx.set_line_join("round");
    set_dash(ctx, DASH_PX)?;

    let mid = points.len() / 2;
    stroke_polyline(ctx, &points[..=mid], PATH_START_COLOR);
    stroke_polyline(ctx, &points[mid..], PATH_END_COLOR);

    ctx.restore();
    Ok(())
}

fn stroke_polyline(ctx: &CanvasRenderingContext2d, points: &[Point], color: &str) {
    let Some((first, rest)) = points.split_first() else {
        return;
    };
    ctx.set_stroke_style_str(color);
    ctx.begin_path();
    ctx.move_to(first.x, first.y);
    for p in rest {
        ctx.line_to(p.x, p.y);
    }
    ctx.stroke();
}

// =============================================================
// Markers
// =============================================================

fn draw_site(ctx: &CanvasRenderingContext2d, m: &SiteMarker) -> Result<(), JsValue> {
    let (fill, ring) = gradient_colors(&m.color);
    let radius = if m.hovered { SITE_RADIUS_PX * 1.15 } else { SITE_RADIUS_PX };

    ctx.save();
    ctx.begin_path();
    ctx.arc(m.center.x, m.center.y, radius, 0.0, 2.0 * PI)?;
    ctx.set_fill_style_str(fill);
    ctx.fill();
    ctx.set_line_width(if m.selected || m.focused { 4.0 } else { 2.0 });
    ctx.set_stroke_style_str(if m.selected || m.focused { "#ffffff" } else { ring });
    ctx.stroke();

    if m.draggable {
        ctx.set_stroke_style_str("rgba(255, 255, 255, 0.8)");
        ctx.set_line_width(1.0);
        set_dash(ctx, 3.0)?;
        ctx.begin_path();
        ctx.arc(m.center.x, m.center.y, radius + 6.0, 0.0, 2.0 * PI)?;
        ctx.stroke();
        set_dash(ctx, 0.0)?;
    }

    if m.busy {
        ctx.set_stroke_style_str(BUSY_COLOR);
        ctx.set_line_width(3.0);
        ctx.begin_path();
        ctx.arc(m.center.x, m.center.y, radius + 4.0, -PI / 2.0, PI)?;
        ctx.stroke();
    }

    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font(&format!("{radius:.0}px sans-serif"));
    ctx.fill_text(icon_text(&m.icon), m.center.x, m.center.y)?;

    if m.hovered {
        draw_label(ctx, &m.name.to_uppercase(), Point::new(m.center.x, m.center.y + radius + 16.0), "rgba(0, 0, 0, 0.8)")?;
    }

    ctx.restore();
    Ok(())
}

fn draw_robot(ctx: &CanvasRenderingContext2d, r: &RobotMarker) -> Result<(), JsValue> {
    ctx.save();
    ctx.set_fill_style_str("rgba(59, 130, 246, 0.35)");
    ctx.begin_path();
    ctx.arc(r.center.x, r.center.y, ROBOT_RADIUS_PX * 1.6, 0.0, 2.0 * PI)?;
    ctx.fill();

    ctx.set_fill_style_str("#ffffff");
    ctx.begin_path();
    ctx.arc(r.center.x, r.center.y, ROBOT_RADIUS_PX, 0.0, 2.0 * PI)?;
    ctx.fill();
    ctx.set_stroke_style_str(ROBOT_COLOR);
    ctx.set_line_width(2.0);
    if r.draggable {
        set_dash(ctx, 3.0)?;
    }
    ctx.stroke();
    set_dash(ctx, 0.0)?;

    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.set_font("18px sans-serif");
    ctx.fill_text("🤖", r.center.x, r.center.y)?;

    draw_label(ctx, &r.label, Point::new(r.center.x, r.center.y - ROBOT_RADIUS_PX - 14.0), ROBOT_COLOR)?;
    ctx.restore();
    Ok(())
}

/// Pill-shaped caption centred on `at`.
fn draw_label(ctx: &CanvasRenderingContext2d, text: &str, at: Point, background: &str) -> Result<(), JsValue> {
    ctx.set_font("bold 10px sans-serif");
    let width = measured_text_width(ctx, text) + 12.0;
    let height = 16.0;
    ctx.set_fill_style_str(background);
    ctx.fill_rect(at.x - width / 2.0, at.y - height / 2.0, width, height);
    ctx.set_fill_style_str("#ffffff");
    ctx.set_text_align("center");
    ctx.set_text_baseline("middle");
    ctx.fill_text(text, at.x, at.y)
}

fn measured_text_width(ctx: &CanvasRenderingContext2d, text: &str) -> f64 {
    match ctx.measure_text(text) {
        Ok(metrics) => metrics.width(),
        Err(_) => 0.0,
    }
}

fn set_dash(ctx: &CanvasRenderingContext2d, len: f64) -> Result<(), JsValue> {
    let dash_array = js_sys::Array::new();
    if len > 0.0 {
        dash_array.push(&len.into());
        dash_array.push(&len.into());
    }
    ctx.set_line_dash(&dash_array)
}

fn icon_text(icon: &Icon) -> &str {
    match icon {
        Icon::Named(id) => id.glyph(),
        Icon::Custom(raw) => raw,
    }
}

// =============================================================
// Theme colours
// =============================================================

/// Fill and ring colours for a `from-<hue>-<shade> to-<hue>-<shade>` theme id.
fn gradient_colors(theme: &str) -> (&'static str, &'static str) {
    let mut from = None;
    let mut to = None;
    for token in theme.split_whitespace() {
        if let Some(name) = token.strip_prefix("from-") {
            from = palette(name);
        } else if let Some(name) = token.strip_prefix("to-") {
            to = palette(name);
        }
    }
    let fill = from.unwrap_or(FALLBACK_MARKER_COLOR);
    (fill, to.unwrap_or(fill))
}

fn palette(name: &str) -> Option<&'static str> {
    let hex = match name {
        "emerald-400" => "#34d399",
        "teal-600" => "#0d9488",
        "red-400" => "#f87171",
        "rose-600" => "#e11d48",
        "blue-400" => "#60a5fa",
        "cyan-600" => "#0891b2",
        "orange-400" => "#fb923c",
        "amber-600" => "#d97706",
        "indigo-400" => "#818cf8",
        "purple-600" => "#9333ea",
        _ => return None,
    };
    Some(hex)
}
