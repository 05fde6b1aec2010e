//! Custom point-of-interest store boundary.
//!
//! User-authored points live outside this crate; the orchestrator only
//! needs "points within a radius". The store is injected so tests and
//! the CLI can run without one.

use huni_core::{contribution, distance_meters, Category, CategoryConfig, CustomPoi, Facility};

/// Radius within which custom points join the scoring run.
pub const POI_RADIUS_M: f64 = 1000.0;

pub trait PoiStore: Send + Sync {
    /// Points within `radius_m` meters of the given origin.
    fn pois_near(&self, lat: f64, lng: f64, radius_m: f64) -> Vec<CustomPoi>;
}

/// A store with no points; the default for CLI runs.
pub struct EmptyPoiStore;

impl PoiStore for EmptyPoiStore {
    fn pois_near(&self, _lat: f64, _lng: f64, _radius_m: f64) -> Vec<CustomPoi> {
        Vec::new()
    }
}

/// A fixed in-memory point set, filtered by distance on read.
pub struct StaticPoiStore {
    pois: Vec<CustomPoi>,
}

impl StaticPoiStore {
    #[must_use]
    pub fn new(pois: Vec<CustomPoi>) -> Self {
        Self { pois }
    }
}

impl PoiStore for StaticPoiStore {
    fn pois_near(&self, lat: f64, lng: f64, radius_m: f64) -> Vec<CustomPoi> {
        self.pois
            .iter()
            .filter(|p| distance_meters(lat, lng, p.lat, p.lng) <= radius_m)
            .cloned()
            .collect()
    }
}

/// Convert a custom point into a synthetic [`Facility`], scored with
/// the same contribution function as API-sourced facilities.
///
/// Returns `None` for unknown category labels or points beyond the
/// category radius.
#[must_use]
pub fn poi_facility(poi: &CustomPoi, origin_lat: f64, origin_lng: f64) -> Option<Facility> {
    let Some(category) = Category::from_poi_label(&poi.category) else {
        tracing::warn!(poi_id = %poi.id, label = %poi.category, "unknown custom POI category — skipping");
        return None;
    };

    let distance = distance_meters(origin_lat, origin_lng, poi.lat, poi.lng);
    let config = CategoryConfig::for_category(category);
    if distance > config.max_distance_m {
        return None;
    }

    // Custom categories are declared, not inferred; the classifier is
    // not consulted.
    let tags = std::iter::once(("custom".to_string(), "yes".to_string())).collect();

    #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
    let rounded_distance = distance.round() as u32;

    Some(Facility {
        id: format!("{category}-{}", poi.id),
        name: poi.name.clone(),
        category,
        lat: poi.lat,
        lng: poi.lng,
        distance: rounded_distance,
        contribution: contribution(distance, &config),
        tags,
    })
}
