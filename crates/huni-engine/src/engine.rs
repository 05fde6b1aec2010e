//! The scoring orchestrator.
//!
//! One scoring run walks the ten categories **sequentially** — never in
//! parallel — to stay under the external service's implicit rate limit.
//! Each category checks the cache, fetches with retry on a miss, and
//! degrades to an empty result when the retry budget runs out; a single
//! failed category must never sink the whole run.

use std::time::Duration;

use huni_core::{Category, CategoryConfig, Facility, LivabilityResult, ScoreBoard};

use crate::cache::{cache_key, QueryCache};
use crate::config::EngineConfig;
use crate::error::EngineError;
use crate::overpass::{category_query, OverpassClient, RawElement};
use crate::poi::{poi_facility, PoiStore, POI_RADIUS_M};
use crate::processor::{dedup_facilities, process_elements};

/// A completed scoring run: the aggregate result plus the flat,
/// deduplicated facility list that produced it.
#[derive(Debug)]
pub struct ScoreOutcome {
    pub result: LivabilityResult,
    pub facilities: Vec<Facility>,
}

/// Livability scoring engine with injected cache and POI store.
///
/// Constructed once per process and shared by reference; each call to
/// [`LivabilityEngine::score`] owns its facility list and accumulators,
/// so concurrent runs only share the cache.
pub struct LivabilityEngine<C, P> {
    client: OverpassClient,
    cache: C,
    pois: P,
    config: EngineConfig,
}

impl<C: QueryCache, P: PoiStore> LivabilityEngine<C, P> {
    /// Creates an engine from configuration and collaborators.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::Http`] if the HTTP client cannot be built.
    pub fn new(config: EngineConfig, cache: C, pois: P) -> Result<Self, EngineError> {
        let client = OverpassClient::new(&config)?;
        Ok(Self {
            client,
            cache,
            pois,
            config,
        })
    }

    /// Computes the livability score for a point.
    ///
    /// Fetches each category in turn (cache first, then network with
    /// retry), classifies and scores the returned elements, folds in
    /// custom POIs, and aggregates. Per-category fetch failures degrade
    /// that category to zero facilities and the run continues.
    ///
    /// # Errors
    ///
    /// Returns [`EngineError::InvalidCoordinate`] for non-finite or
    /// out-of-range coordinates. Network failures never propagate.
    pub async fn score(
        &self,
        lat: f64,
        lng: f64,
        address: &str,
    ) -> Result<ScoreOutcome, EngineError> {
        validate_origin(lat, lng)?;

        let mut facilities: Vec<Facility> = Vec::new();
        let mut pace_next_fetch = false;

        for category in Category::ALL {
            let elements = match self.cache.get(&cache_key(category, lat, lng)) {
                Some(cached) => {
                    tracing::debug!(%category, elements = cached.len(), "cache hit");
                    cached
                }
                None => {
                    // Pacing applies only between network fetches; a run
                    // served from cache issues none and waits for none.
                    if pace_next_fetch {
                        tokio::time::sleep(Duration::from_millis(
                            self.config.inter_category_delay_ms,
                        ))
                        .await;
                        pace_next_fetch = false;
                    }
                    match self.fetch_category(category, lat, lng).await {
                        Ok(elements) => {
                            self.cache
                                .insert(cache_key(category, lat, lng), elements.clone());
                            pace_next_fetch = self.config.inter_category_delay_ms > 0;
                            elements
                        }
                        Err(err) => {
                            tracing::warn!(
                                %category,
                                error = %err,
                                "category fetch failed after retries — scoring it as empty"
                            );
                            Vec::new()
                        }
                    }
                }
            };

            let batch = process_elements(lat, lng, category, &elements);
            tracing::info!(%category, raw = elements.len(), kept = batch.len(), "category processed");
            facilities.extend(batch);
        }

        let mut facilities = dedup_facilities(facilities);

        for poi in self.pois.pois_near(lat, lng, POI_RADIUS_M) {
            if let Some(facility) = poi_facility(&poi, lat, lng) {
                facilities.push(facility);
            }
        }

        let mut board = ScoreBoard::new();
        for facility in &facilities {
            board.add(facility);
        }

        Ok(ScoreOutcome {
            result: board.into_result(address, lat, lng),
            facilities,
        })
    }

    async fn fetch_category(
        &self,
        category: Category,
        lat: f64,
        lng: f64,
    ) -> Result<Vec<RawElement>, EngineError> {
        let radius = CategoryConfig::for_category(category).max_distance_m;
        let query = category_query(category, lat, lng, radius);
        self.client.fetch_elements(&query).await
    }
}

fn validate_origin(lat: f64, lng: f64) -> Result<(), EngineError> {
    let lat_ok = lat.is_finite() && (-90.0..=90.0).contains(&lat);
    let lng_ok = lng.is_finite() && (-180.0..=180.0).contains(&lng);
    if lat_ok && lng_ok {
        Ok(())
    } else {
        Err(EngineError::InvalidCoordinate { lat, lng })
    }
}

#[cfg(test)]
#[path = "engine_test.rs"]
mod tests;
