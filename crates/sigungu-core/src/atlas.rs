//! Resolved view of the district dataset.
//!
//! Resolves province and display name for every feature once, so callers can
//! look districts up by what a user types and report per-province progress.

use std::collections::BTreeMap;

use serde::Serialize;

use crate::error::{Error, Result};
use crate::feature::{DistrictFeature, FeatureCollection};
use crate::region::Province;
use crate::store::{Conquest, Membership, VisitStateStore};

/// A dataset district with its derived attributes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct District {
    pub code: String,
    pub name: String,
    pub province: Option<Province>,
    pub display_name: String,
}

impl From<&DistrictFeature> for District {
    fn from(feature: &DistrictFeature) -> Self {
        Self {
            code: feature.code.clone(),
            name: feature.name.clone(),
            province: feature.province(),
            display_name: feature.display_name(),
        }
    }
}

/// Per-province visit progress.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ProvinceProgress {
    pub province: Province,
    pub name: &'static str,
    pub visited: usize,
    pub wishlist: usize,
    pub total: usize,
    pub conquered: bool,
}

#[derive(Debug, Clone, Default)]
pub struct Atlas {
    features: Vec<DistrictFeature>,
    districts: Vec<District>,
}

impl Atlas {
    #[must_use]
    pub fn new(collection: FeatureCollection) -> Self {
        let districts = collection.features.iter().map(District::from).collect();
        Self {
            features: collection.features,
            districts,
        }
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.districts.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.districts.is_empty()
    }

    #[must_use]
    pub fn features(&self) -> &[DistrictFeature] {
        &self.features
    }

    #[must_use]
    pub fn districts(&self) -> &[District] {
        &self.districts
    }

    /// Resolve user input to exactly one district.
    ///
    /// Tries, in order: exact display name, exact code, then district short
    /// name. A short name shared by several districts (e.g. `중구`) is
    /// ambiguous.
    ///
    /// # Errors
    ///
    /// [`Error::DistrictNotFound`] or [`Error::AmbiguousDistrict`].
    pub fn find(&self, query: &str) -> Result<&District> {
        let query = query.trim();

        if let Some(d) = self.districts.iter().find(|d| d.display_name == query) {
            return Ok(d);
        }
        if let Some(d) = self.districts.iter().find(|d| d.code == query) {
            return Ok(d);
        }

        let mut matches = self.districts.iter().filter(|d| d.name == query);
        match (matches.next(), matches.next()) {
            (Some(d), None) => Ok(d),
            (None, _) => Err(Error::DistrictNotFound {
                query: query.to_string(),
            }),
            (Some(first), Some(second)) => {
                let mut candidates = vec![first.display_name.clone(), second.display_name.clone()];
                candidates.extend(matches.map(|d| d.display_name.clone()));
                Err(Error::AmbiguousDistrict {
                    query: query.to_string(),
                    candidates,
                })
            }
        }
    }

    /// Conquest status of the province that owns `district`.
    #[must_use]
    pub fn conquest(&self, store: &VisitStateStore, district: &District) -> Conquest {
        store.province_conquest(&self.features, &district.code)
    }

    /// Visit progress for every province present in the dataset, in code
    /// order. Districts with an unknown province are left out.
    #[must_use]
    pub fn province_progress(&self, store: &VisitStateStore) -> Vec<ProvinceProgress> {
        let mut by_province: BTreeMap<Province, ProvinceProgress> = BTreeMap::new();

        for district in &self.districts {
            let Some(province) = district.province else {
                continue;
            };
            let entry = by_province.entry(province).or_insert(ProvinceProgress {
                province,
                name: province.name(),
                visited: 0,
                wishlist: 0,
                total: 0,
                conquered: false,
            });
            entry.total += 1;
            match store.membership(&district.display_name) {
                Membership::Visited => entry.visited += 1,
                Membership::Wishlist => entry.wishlist += 1,
                Membership::None => {}
            }
        }

        by_province
            .into_values()
            .map(|mut progress| {
                progress.conquered = progress.total > 0 && progress.visited == progress.total;
                progress
            })
            .collect()
    }
}
