//! Visited / wishlist state for districts.
//!
//! Both sets are keyed by display name (see [`crate::region::display_name`]).
//! A name is never in both sets: toggling one set on removes it from the
//! other.

use std::collections::BTreeSet;
use std::fmt;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::feature::DistrictFeature;
use crate::region::{self, Province};

/// Which set, if any, a district belongs to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Membership {
    Visited,
    Wishlist,
    None,
}

impl Membership {
    /// Map fill colour for a district in this state.
    #[must_use]
    pub const fn fill_color(self) -> &'static str {
        match self {
            Self::Visited => "#2ecc71",
            Self::Wishlist => "#3498db",
            Self::None => "#ffffff",
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Visited => "visited",
            Self::Wishlist => "wishlist",
            Self::None => "none",
        }
    }
}

impl fmt::Display for Membership {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Visited share of the dataset, kept in tenths of a percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Default)]
pub struct Percent {
    tenths: u64,
}

impl Percent {
    /// `part / whole * 100`, rounded half-up to one decimal place.
    ///
    /// A zero `whole` yields `0.0`.
    #[must_use]
    pub const fn of(part: usize, whole: usize) -> Self {
        if whole == 0 {
            return Self { tenths: 0 };
        }
        let part = part as u64;
        let whole = whole as u64;
        // tenths = round(part * 1000 / whole), ties away from zero
        Self {
            tenths: (part * 2000 + whole) / (whole * 2),
        }
    }

    #[must_use]
    pub const fn tenths(self) -> u64 {
        self.tenths
    }

    #[must_use]
    #[allow(clippy::cast_precision_loss)]
    pub fn as_f64(self) -> f64 {
        self.tenths as f64 / 10.0
    }
}

impl fmt::Display for Percent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}.{}", self.tenths / 10, self.tenths % 10)
    }
}

impl Serialize for Percent {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

/// Progress summary for the stats panel.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Stats {
    pub visited_count: usize,
    pub wishlist_count: usize,
    pub total_districts: usize,
    pub percent: Percent,
}

/// Whether every district of a province has been visited.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Conquest {
    pub conquered: bool,
    pub province: Option<Province>,
    pub province_name: Option<&'static str>,
    pub visited: usize,
    pub total: usize,
}

/// Status shown on the district card after a toggle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum DistrictStatus {
    /// The district is visited and so is every other district of its province.
    ProvinceConquered { province: Province },
    Visited,
    Wishlist,
    NotVisited,
}

impl DistrictStatus {
    /// Card label text.
    #[must_use]
    pub fn label(self) -> String {
        match self {
            Self::ProvinceConquered { province } => format!("🎊 {} 정복! 🎊", province.name()),
            Self::Visited => "✅ 정복 완료!".to_string(),
            Self::Wishlist => "💙 가고 싶은 곳".to_string(),
            Self::NotVisited => "방문 기록 없음".to_string(),
        }
    }

    /// Card label colour.
    #[must_use]
    pub const fn color(self) -> &'static str {
        match self {
            Self::ProvinceConquered { .. } | Self::Visited => Membership::Visited.fill_color(),
            Self::Wishlist => Membership::Wishlist.fill_color(),
            Self::NotVisited => "#888",
        }
    }

    /// Whether the card should play the celebration animation.
    #[must_use]
    pub const fn celebrates(self) -> bool {
        matches!(self, Self::ProvinceConquered { .. })
    }
}

/// Serializable form of the store.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Snapshot {
    #[serde(default)]
    pub visited: Vec<String>,
    #[serde(default)]
    pub wishlist: Vec<String>,
}

/// In-memory visited and wishlist sets.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct VisitStateStore {
    visited: BTreeSet<String>,
    wishlist: BTreeSet<String>,
}

impl VisitStateStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a store from a snapshot. See [`VisitStateStore::restore`].
    #[must_use]
    pub fn from_snapshot(snapshot: Snapshot) -> Self {
        let mut store = Self::new();
        store.restore(snapshot);
        store
    }

    /// Flip `name` in the visited set; adding it drops it from the wishlist.
    pub fn toggle_visited(&mut self, name: &str) -> Membership {
        if !self.visited.remove(name) {
            self.wishlist.remove(name);
            self.visited.insert(name.to_string());
        }
        let membership = self.membership(name);
        debug!(name, %membership, "toggled visited");
        membership
    }

    /// Flip `name` in the wishlist; adding it drops it from the visited set.
    pub fn toggle_wishlist(&mut self, name: &str) -> Membership {
        if !self.wishlist.remove(name) {
            self.visited.remove(name);
            self.wishlist.insert(name.to_string());
        }
        let membership = self.membership(name);
        debug!(name, %membership, "toggled wishlist");
        membership
    }

    #[must_use]
    pub fn membership(&self, name: &str) -> Membership {
        if self.visited.contains(name) {
            Membership::Visited
        } else if self.wishlist.contains(name) {
            Membership::Wishlist
        } else {
            Membership::None
        }
    }

    /// Counts and visited percentage against `total_districts`.
    ///
    /// Counts include stored names that no longer match any district.
    #[must_use]
    pub fn stats(&self, total_districts: usize) -> Stats {
        Stats {
            visited_count: self.visited.len(),
            wishlist_count: self.wishlist.len(),
            total_districts,
            percent: Percent::of(self.visited.len(), total_districts),
        }
    }

    /// Whether every district sharing `target_code`'s province is visited.
    ///
    /// A province with no districts in `districts`, or a target code with no
    /// known province, is never conquered.
    #[must_use]
    pub fn province_conquest(&self, districts: &[DistrictFeature], target_code: &str) -> Conquest {
        let Some(target) = region::province_code(target_code) else {
            return Conquest {
                conquered: false,
                province: None,
                province_name: None,
                visited: 0,
                total: 0,
            };
        };

        let (total, visited) = districts
            .iter()
            .filter(|d| d.province() == Some(target))
            .fold((0, 0), |(total, visited), d| {
                let hit = usize::from(self.visited.contains(&d.display_name()));
                (total + 1, visited + hit)
            });

        Conquest {
            conquered: total > 0 && visited == total,
            province: Some(target),
            province_name: Some(target.name()),
            visited,
            total,
        }
    }

    /// Card status for `name` given its province's conquest result.
    #[must_use]
    pub fn status(&self, name: &str, conquest: &Conquest) -> DistrictStatus {
        match (self.membership(name), conquest.province) {
            (Membership::Visited, Some(province)) if conquest.conquered => {
                DistrictStatus::ProvinceConquered { province }
            }
            (Membership::Visited, _) => DistrictStatus::Visited,
            (Membership::Wishlist, _) => DistrictStatus::Wishlist,
            (Membership::None, _) => DistrictStatus::NotVisited,
        }
    }

    /// Visited names in sorted order.
    pub fn visited(&self) -> impl Iterator<Item = &str> {
        self.visited.iter().map(String::as_str)
    }

    /// Wishlist names in sorted order.
    pub fn wishlist(&self) -> impl Iterator<Item = &str> {
        self.wishlist.iter().map(String::as_str)
    }

    #[must_use]
    pub fn snapshot(&self) -> Snapshot {
        Snapshot {
            visited: self.visited.iter().cloned().collect(),
            wishlist: self.wishlist.iter().cloned().collect(),
        }
    }

    /// Replace both sets wholesale.
    ///
    /// Names are not checked against any dataset. A name listed in both sets
    /// is kept as visited only.
    pub fn restore(&mut self, snapshot: Snapshot) {
        self.visited = snapshot.visited.into_iter().collect();
        self.wishlist = snapshot
            .wishlist
            .into_iter()
            .filter(|name| !self.visited.contains(name))
            .collect();
    }

    pub fn reset(&mut self) {
        self.visited.clear();
        self.wishlist.clear();
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.visited.is_empty() && self.wishlist.is_empty()
    }
}
