#![allow(clippy::float_cmp)]

use super::*;

fn make_site(id: &str, x: f64, y: f64) -> Site {
    Site {
        id: id.to_owned(),
        name: id.to_uppercase(),
        description: String::new(),
        icon: Icon::default(),
        badge: String::new(),
        pos_x: x,
        pos_y: y,
        color: "from-blue-400 to-cyan-600".to_owned(),
        path_color: None,
    }
}

// =============================================================
// Icon
// =============================================================

#[test]
fn icon_names_round_trip() {
    for id in IconId::ALL {
        assert_eq!(IconId::from_name(id.as_str()), Some(id));
    }
}

#[test]
fn unknown_icon_name_is_custom() {
    assert_eq!(Icon::from("⛵".to_owned()), Icon::Custom("⛵".to_owned()));
    assert_eq!(Icon::from("landmark".to_owned()), Icon::Custom("landmark".to_owned()));
}

#[test]
fn known_icon_name_is_named() {
    assert_eq!(Icon::from("Trophy".to_owned()), Icon::Named(IconId::Trophy));
}

#[test]
fn icon_serializes_as_plain_string() {
    let json = serde_json::to_string(&Icon::Named(IconId::MapPin)).unwrap();
    assert_eq!(json, "\"MapPin\"");
    let custom: Icon = serde_json::from_str("\"🏮\"").unwrap();
    assert_eq!(custom, Icon::Custom("🏮".to_owned()));
}

#[test]
fn every_icon_has_a_glyph() {
    for id in IconId::ALL {
        assert!(!id.glyph().is_empty());
    }
}

// =============================================================
// Site
// =============================================================

#[test]
fn site_parses_camel_case_fields() {
    let site: Site = serde_json::from_str(
        r##"{"id":"a","name":"A","icon":"Flag","posX":12.5,"posY":40,"color":"c","pathColor":"#ff0000"}"##,
    )
    .unwrap();
    assert_eq!(site.position(), PercentPoint::new(12.5, 40.0));
    assert_eq!(site.icon, Icon::Named(IconId::Flag));
    assert_eq!(site.path_color.as_deref(), Some("#ff0000"));
    assert!(site.description.is_empty());
}

#[test]
fn site_without_icon_defaults_to_map_pin() {
    let site: Site = serde_json::from_str(r#"{"id":"a","name":"A","posX":1,"posY":2}"#).unwrap();
    assert_eq!(site.icon, Icon::Named(IconId::MapPin));
}

// =============================================================
// SiteList
// =============================================================

#[test]
fn site_list_rejects_duplicate_ids() {
    let err = SiteList::new(vec![make_site("a", 1.0, 1.0), make_site("b", 2.0, 2.0), make_site("a", 3.0, 3.0)])
        .unwrap_err();
    assert!(matches!(err, SiteError::DuplicateId(ref id) if id == "a"));
}

#[test]
fn site_list_keeps_declared_order() {
    let list = SiteList::new(vec![make_site("c", 0.0, 0.0), make_site("a", 0.0, 0.0), make_site("b", 0.0, 0.0)])
        .unwrap();
    let ids: Vec<_> = list.iter().map(|s| s.id.as_str()).collect();
    assert_eq!(ids, ["c", "a", "b"]);
}

#[test]
fn route_segments_follow_list_order() {
    let list = SiteList::new(vec![make_site("a", 0.0, 0.0), make_site("b", 0.0, 0.0), make_site("c", 0.0, 0.0)])
        .unwrap();
    let pairs: Vec<_> = list.route_segments().map(|(a, b)| (a.id.as_str(), b.id.as_str())).collect();
    assert_eq!(pairs, [("a", "b"), ("b", "c")]);
}

#[test]
fn route_segments_empty_for_single_site() {
    let list = SiteList::new(vec![make_site("a", 0.0, 0.0)]).unwrap();
    assert_eq!(list.route_segments().count(), 0);
}

#[test]
fn site_list_get_by_id() {
    let list = SiteList::new(vec![make_site("a", 10.0, 20.0)]).unwrap();
    assert_eq!(list.get("a").map(|s| s.pos_x), Some(10.0));
    assert!(list.get("missing").is_none());
}

#[test]
fn site_list_from_json() {
    let list = SiteList::from_json(r#"[{"id":"x","name":"X","posX":1,"posY":2},{"id":"y","name":"Y","posX":3,"posY":4}]"#)
        .unwrap();
    assert_eq!(list.len(), 2);
    assert!(matches!(SiteList::from_json("[{]"), Err(SiteError::Parse(_))));
}

#[test]
fn default_sites_are_valid_and_in_range() {
    let list = default_sites();
    assert_eq!(list.len(), 4);
    assert!(SiteList::new(list.iter().cloned().collect()).is_ok());
    for s in list.iter() {
        assert!((0.0..=100.0).contains(&s.pos_x) && (0.0..=100.0).contains(&s.pos_y), "{}", s.id);
    }
    assert_eq!(list.iter().next().map(|s| s.id.as_str()), Some("trang_an"));
}

// =============================================================
// PathHistory
// =============================================================

#[test]
fn path_keeps_most_recent_fifty_in_order() {
    let mut path = PathHistory::default();
    for i in 0..75 {
        path.push(TelemetryPoint::new(f64::from(i), 0.0));
    }
    assert_eq!(path.len(), 50);
    let xs: Vec<f64> = path.iter().map(|p| p.x).collect();
    let expected: Vec<f64> = (25..75).map(f64::from).collect();
    assert_eq!(xs, expected);
}

#[test]
fn path_below_capacity_keeps_everything() {
    let mut path = PathHistory::default();
    path.push(TelemetryPoint::new(1.0, 1.0));
    path.push(TelemetryPoint::new(2.0, 2.0));
    assert_eq!(path.len(), 2);
    assert_eq!(path.iter().next().map(|p| p.x), Some(1.0));
}

#[test]
fn path_replace_keeps_tail() {
    let mut path = PathHistory::with_capacity(3);
    let pts: Vec<_> = (0..10).map(|i| TelemetryPoint::new(f64::from(i), 0.0)).collect();
    path.replace(&pts);
    let xs: Vec<f64> = path.iter().map(|p| p.x).collect();
    assert_eq!(xs, [7.0, 8.0, 9.0]);
}

#[test]
fn path_zero_capacity_is_raised_to_one() {
    let mut path = PathHistory::with_capacity(0);
    path.push(TelemetryPoint::new(1.0, 0.0));
    path.push(TelemetryPoint::new(2.0, 0.0));
    assert_eq!(path.capacity(), 1);
    assert_eq!(path.iter().next().map(|p| p.x), Some(2.0));
}

// =============================================================
// StationStatus
// =============================================================

#[test]
fn station_busy_only_when_busy() {
    let busy: StationStatus = serde_json::from_str(r#"{"status":"busy","action":"ROTATE"}"#).unwrap();
    assert!(busy.is_busy());
    assert_eq!(busy.action.as_deref(), Some("ROTATE"));
    let done: StationStatus = serde_json::from_str(r#"{"status":"finished"}"#).unwrap();
    assert!(!done.is_busy());
}

#[test]
fn unknown_station_state_parses() {
    let s: StationStatus = serde_json::from_str(r#"{"status":"rebooting"}"#).unwrap();
    assert_eq!(s.status, StationState::Unknown);
}
