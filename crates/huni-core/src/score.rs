//! Score accumulation and aggregation into sub-scores and the overall
//! score.
//!
//! Contribution sums — not counts — drive the sub-score formulas; the
//! per-category counts exist for display. Dampening and the lighting
//! spillover are applied at accumulation time so the sums can be
//! inspected mid-run.

use std::collections::BTreeMap;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::category::Category;
use crate::facility::Facility;

/// Walkability facilities are numerous and fine-grained, so their
/// contributions are damped to keep them from dominating the sum.
const WALKABILITY_DAMPENING: f64 = 0.25;
/// General safety infrastructure (cameras, calming) is damped; staffed
/// facilities (fire stations) count in full.
const SAFETY_INFRA_DAMPENING: f64 = 0.25;

/// Running per-category totals for one scoring run.
#[derive(Debug, Default)]
pub struct ScoreBoard {
    counts: BTreeMap<Category, u32>,
    sums: BTreeMap<Category, f64>,
}

fn is_lighting(facility: &Facility) -> bool {
    facility.tags.get("highway").map(String::as_str) == Some("street_lamp")
        || facility.tags.get("lit").map(String::as_str) == Some("yes")
}

fn is_fire_station(facility: &Facility) -> bool {
    facility.tags.get("amenity").map(String::as_str) == Some("fire_station")
}

impl ScoreBoard {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Fold one classified facility into the running totals.
    ///
    /// Walkability contributions are damped by 0.25, and lighting
    /// facilities (street lamps, lit ways) spill the same damped amount
    /// into the safety sum — lighting genuinely supports both metrics.
    pub fn add(&mut self, facility: &Facility) {
        *self.counts.entry(facility.category).or_insert(0) += 1;

        match facility.category {
            Category::Walkability => {
                let damped = facility.contribution * WALKABILITY_DAMPENING;
                *self.sums.entry(Category::Walkability).or_insert(0.0) += damped;
                if is_lighting(facility) {
                    *self.sums.entry(Category::Safety).or_insert(0.0) += damped;
                }
            }
            Category::Safety => {
                let value = if is_fire_station(facility) {
                    facility.contribution
                } else {
                    facility.contribution * SAFETY_INFRA_DAMPENING
                };
                *self.sums.entry(Category::Safety).or_insert(0.0) += value;
            }
            other => {
                *self.sums.entry(other).or_insert(0.0) += facility.contribution;
            }
        }
    }

    #[must_use]
    pub fn count(&self, category: Category) -> u32 {
        self.counts.get(&category).copied().unwrap_or(0)
    }

    #[must_use]
    pub fn sum(&self, category: Category) -> f64 {
        self.sums.get(&category).copied().unwrap_or(0.0)
    }

    /// Per-category facility counts for display, with every category
    /// present (zero when nothing was found).
    #[must_use]
    pub fn counts(&self) -> BTreeMap<Category, u32> {
        Category::ALL
            .iter()
            .map(|&cat| (cat, self.count(cat)))
            .collect()
    }

    /// Weighted sub-scores, each capped at 100 and rounded.
    #[must_use]
    pub fn subscores(&self) -> Subscores {
        let s = |cat: Category| self.sum(cat);
        Subscores {
            services: cap_score(
                s(Category::Health) * 1.2
                    + s(Category::Education)
                    + s(Category::Market) * 0.8
                    + s(Category::Religious) * 0.8,
            ),
            mobility: cap_score(s(Category::Transport) * 1.5 + s(Category::Walkability) * 0.5),
            safety: cap_score(
                s(Category::Safety) * 0.6
                    + s(Category::Police) * 2.0
                    + s(Category::Health) * 0.8
                    + s(Category::Accessibility),
            ),
            environment: cap_score(s(Category::Recreation) * 2.5),
        }
    }

    /// Finalize the run into an immutable result.
    #[must_use]
    pub fn into_result(self, address: &str, lat: f64, lng: f64) -> LivabilityResult {
        let subscores = self.subscores();
        LivabilityResult {
            overall: subscores.overall(),
            subscores,
            location: Location {
                address: address.to_string(),
                lat,
                lng,
            },
            facility_counts: self.counts(),
            computed_at: Utc::now(),
        }
    }
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn cap_score(raw: f64) -> u32 {
    raw.clamp(0.0, 100.0).round() as u32
}

/// The four aggregate metrics, each in `0..=100`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Subscores {
    pub services: u32,
    pub mobility: u32,
    pub safety: u32,
    pub environment: u32,
}

impl Subscores {
    /// Weighted overall score; bounded by 100 since every sub-score is.
    #[must_use]
    pub fn overall(&self) -> f64 {
        let weighted = f64::from(self.services) * 0.3
            + f64::from(self.mobility) * 0.25
            + f64::from(self.safety) * 0.25
            + f64::from(self.environment) * 0.2;
        (weighted * 10.0).round() / 10.0
    }
}

/// Where the score was computed.
#[derive(Debug, Clone, Serialize)]
pub struct Location {
    pub address: String,
    pub lat: f64,
    pub lng: f64,
}

/// A finished scoring run. Immutable once returned; callers get a
/// fresh one per request.
#[derive(Debug, Clone, Serialize)]
pub struct LivabilityResult {
    pub overall: f64,
    pub subscores: Subscores,
    pub location: Location,
    pub facility_counts: BTreeMap<Category, u32>,
    pub computed_at: DateTime<Utc>,
}
