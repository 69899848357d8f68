//! Site model: heritage sites, their icons, the robot's path history and the
//! per-station status side-channel.
//!
//! Sites are owned by the host. The engine keeps the latest list it was handed
//! and never edits a position itself; moves go back out as
//! [`crate::engine::Action::PosUpdate`] and return here only when the host
//! pushes a new list.

#[cfg(test)]
#[path = "site_test.rs"]
mod site_test;

use std::collections::{HashMap, HashSet, VecDeque};

use serde::{Deserialize, Serialize};

use crate::consts::PATH_CAPACITY;
use crate::coords::{PercentPoint, TelemetryPoint};

/// Stable, unique site identifier.
pub type SiteId = String;

#[derive(Debug, thiserror::Error)]
pub enum SiteError {
    #[error("duplicate site id: {0}")]
    DuplicateId(SiteId),
    #[error("invalid site list json: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Built-in marker icons.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IconId {
    Landmark,
    Mountain,
    Anchor,
    Flag,
    Map,
    Trophy,
    CheckCircle,
    MapPin,
    Circle,
}

impl IconId {
    pub const ALL: [IconId; 9] = [
        Self::Landmark,
        Self::Mountain,
        Self::Anchor,
        Self::Flag,
        Self::Map,
        Self::Trophy,
        Self::CheckCircle,
        Self::MapPin,
        Self::Circle,
    ];

    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Landmark => "Landmark",
            Self::Mountain => "Mountain",
            Self::Anchor => "Anchor",
            Self::Flag => "Flag",
            Self::Map => "Map",
            Self::Trophy => "Trophy",
            Self::CheckCircle => "CheckCircle",
            Self::MapPin => "MapPin",
            Self::Circle => "Circle",
        }
    }

    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|id| id.as_str() == name)
    }

    /// Single-glyph fallback the canvas painter draws for this icon.
    #[must_use]
    pub fn glyph(self) -> &'static str {
        match self {
            Self::Landmark => "🏛",
            Self::Mountain => "⛰",
            Self::Anchor => "⚓",
            Self::Flag => "🚩",
            Self::Map => "🗺",
            Self::Trophy => "🏆",
            Self::CheckCircle => "✔",
            Self::MapPin => "📍",
            Self::Circle => "●",
        }
    }
}

/// A site's marker icon: one of the built-ins, or opaque host content such as
/// an emoji or a key into the host's own renderables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum Icon {
    Named(IconId),
    Custom(String),
}

impl From<String> for Icon {
    fn from(raw: String) -> Self {
        match IconId::from_name(&raw) {
            Some(id) => Self::Named(id),
            None => Self::Custom(raw),
        }
    }
}

impl From<Icon> for String {
    fn from(icon: Icon) -> Self {
        match icon {
            Icon::Named(id) => id.as_str().to_owned(),
            Icon::Custom(raw) => raw,
        }
    }
}

impl Default for Icon {
    fn default() -> Self {
        Self::Named(IconId::MapPin)
    }
}

/// A heritage point of interest placed on the map.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Site {
    pub id: SiteId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub icon: Icon,
    #[serde(default)]
    pub badge: String,
    /// Horizontal position, percent of the image width.
    pub pos_x: f64,
    /// Vertical position, percent of the image height.
    pub pos_y: f64,
    /// Theme gradient identifier.
    #[serde(default)]
    pub color: String,
    /// Stroke colour of the route segment leading to this site.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path_color: Option<String>,
}

impl Site {
    #[must_use]
    pub fn position(&self) -> PercentPoint {
        PercentPoint::new(self.pos_x, self.pos_y)
    }
}

/// Ordered site list with unique ids.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SiteList {
    sites: Vec<Site>,
}

impl SiteList {
    /// # Errors
    ///
    /// Returns [`SiteError::DuplicateId`] naming the first repeated id.
    pub fn new(sites: Vec<Site>) -> Result<Self, SiteError> {
        let mut seen = HashSet::new();
        for site in &sites {
            if !seen.insert(site.id.as_str()) {
                return Err(SiteError::DuplicateId(site.id.clone()));
            }
        }
        Ok(Self { sites })
    }

    /// Parse a JSON array of sites.
    ///
    /// # Errors
    ///
    /// Returns [`SiteError::Parse`] for malformed JSON and
    /// [`SiteError::DuplicateId`] for repeated ids.
    pub fn from_json(raw: &str) -> Result<Self, SiteError> {
        let sites: Vec<Site> = serde_json::from_str(raw)?;
        Self::new(sites)
    }

    #[must_use]
    pub fn get(&self, id: &str) -> Option<&Site> {
        self.sites.iter().find(|s| s.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &Site> {
        self.sites.iter()
    }

    /// Consecutive pairs in declared order: the route drawn between sites.
    pub fn route_segments(&self) -> impl Iterator<Item = (&Site, &Site)> {
        self.sites.windows(2).map(|w| (&w[0], &w[1]))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.sites.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.sites.is_empty()
    }
}

/// The four heritage sites the arena ships with.
#[must_use]
pub fn default_sites() -> SiteList {
    let site = |id: &str, name: &str, description: &str, icon: IconId, pos: (f64, f64), color: &str| Site {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        icon: Icon::Named(icon),
        badge: format!("/badges/{id}.png"),
        pos_x: pos.0,
        pos_y: pos.1,
        color: color.to_owned(),
        path_color: None,
    };
    SiteList {
        sites: vec![
            site(
                "trang_an",
                "Tràng An",
                "Di sản thế giới kép tại Ninh Bình, nổi tiếng với quần thể núi đá vôi và hang động lung linh.",
                IconId::Mountain,
                (15.0, 30.0),
                "from-emerald-400 to-teal-600",
            ),
            site(
                "cot_co",
                "Cột cờ Hà Nội",
                "Biểu tượng lịch sử của thủ đô, được xây dựng từ đầu thế kỷ 19 dưới triều Nguyễn.",
                IconId::Flag,
                (65.0, 10.0),
                "from-red-400 to-rose-600",
            ),
            site(
                "vinh_ha_long",
                "Vịnh Hạ Long",
                "Kỳ quan thiên nhiên thế giới với hàng ngàn hòn đảo đá vôi kỳ vĩ giữa biển khơi.",
                IconId::Anchor,
                (75.0, 70.0),
                "from-blue-400 to-cyan-600",
            ),
            site(
                "pho_co_hoi_an",
                "Hội An",
                "Đô thị cổ được bảo tồn gần như nguyên vẹn, phản ánh nét giao lưu văn hóa Đông - Tây.",
                IconId::Landmark,
                (35.0, 50.0),
                "from-orange-400 to-amber-600",
            ),
        ],
    }
}

/// Most-recent telemetry samples, oldest first.
#[derive(Debug, Clone)]
pub struct PathHistory {
    points: VecDeque<TelemetryPoint>,
    capacity: usize,
}

impl Default for PathHistory {
    fn default() -> Self {
        Self::with_capacity(PATH_CAPACITY)
    }
}

impl PathHistory {
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        let capacity = capacity.max(1);
        Self { points: VecDeque::with_capacity(capacity), capacity }
    }

    /// Append a sample, evicting the oldest once full.
    pub fn push(&mut self, point: TelemetryPoint) {
        if self.points.len() == self.capacity {
            self.points.pop_front();
        }
        self.points.push_back(point);
    }

    /// Replace the history with the tail of `points`.
    pub fn replace(&mut self, points: &[TelemetryPoint]) {
        self.points.clear();
        let start = points.len().saturating_sub(self.capacity);
        self.points.extend(points[start..].iter().copied());
    }

    pub fn iter(&self) -> impl Iterator<Item = &TelemetryPoint> {
        self.points.iter()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.points.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }

    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

/// Station lifecycle as published by the station nodes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StationState {
    Online,
    Busy,
    Finished,
    Offline,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Cosmetic per-site status; only drives the busy spinner.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct StationStatus {
    pub status: StationState,
    #[serde(default)]
    pub action: Option<String>,
}

impl StationStatus {
    #[must_use]
    pub fn is_busy(&self) -> bool {
        self.status == StationState::Busy
    }
}

pub type StationStatuses = HashMap<SiteId, StationStatus>;
