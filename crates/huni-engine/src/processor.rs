//! Raw element → facility conversion, distance filtering, and
//! deduplication.

use huni_core::{
    classify, contribution, distance_meters, resolve_name, Category, CategoryConfig, Facility,
};

use crate::overpass::RawElement;

/// Two facilities closer than this are dedup candidates.
const DEDUP_RADIUS_M: f64 = 50.0;

/// Normalized substrings that mark two nearby names as the same place
/// even when neither contains the other. Guards against OSM's
/// inconsistent abbreviation of Indonesian school names.
const SHARED_NAME_TOKENS: &[&str] = &["sd", "sekolah"];

/// Convert one category batch of raw elements into scored facilities.
///
/// Elements are classified independently of the query bucket, scored
/// against the *classified* category's decay config, and dropped when
/// they land beyond that category's radius. Elements with neither
/// direct nor `center` coordinates fall back to (0, 0); in practice
/// the distance cutoff removes them.
#[must_use]
pub fn process_elements(
    origin_lat: f64,
    origin_lng: f64,
    bucket: Category,
    elements: &[RawElement],
) -> Vec<Facility> {
    let mut facilities = Vec::with_capacity(elements.len());

    for element in elements {
        let (lat, lng) = match element_coordinates(element) {
            Some(coords) => coords,
            None => {
                tracing::debug!(
                    element_id = element.id,
                    %bucket,
                    "element has no coordinates — defaulting to (0, 0)"
                );
                (0.0, 0.0)
            }
        };

        let distance = distance_meters(origin_lat, origin_lng, lat, lng);
        let category = classify(&element.tags, bucket);
        let config = CategoryConfig::for_category(category);
        if distance > config.max_distance_m {
            continue;
        }

        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let rounded_distance = distance.round() as u32;

        facilities.push(Facility {
            id: format!("{category}-{}", element.id),
            name: resolve_name(&element.tags, category),
            category,
            lat,
            lng,
            distance: rounded_distance,
            contribution: contribution(distance, &config),
            tags: element.tags.clone(),
        });
    }

    facilities
}

fn element_coordinates(element: &RawElement) -> Option<(f64, f64)> {
    match (element.lat, element.lon) {
        (Some(lat), Some(lon)) => Some((lat, lon)),
        _ => element.center.map(|c| (c.lat, c.lon)),
    }
}

/// Deduplicate a run's accumulated facility list.
///
/// Pass (a): any two facilities within 50 m whose names match (equal,
/// containment, or shared school tokens) collapse to the one with the
/// higher contribution, repeated until no pair matches — a fixpoint,
/// since a survivor can form new pairs. Pass (b): collapse records
/// sharing an `id`, which defends against the same raw element arriving
/// through multiple query buckets.
#[must_use]
pub fn dedup_facilities(mut facilities: Vec<Facility>) -> Vec<Facility> {
    loop {
        match find_duplicate_pair(&facilities) {
            Some((i, j)) => {
                let drop = if facilities[i].contribution >= facilities[j].contribution {
                    j
                } else {
                    i
                };
                facilities.remove(drop);
            }
            None => break,
        }
    }

    let mut seen = std::collections::HashSet::new();
    facilities.retain(|f| seen.insert(f.id.clone()));
    facilities
}

fn find_duplicate_pair(facilities: &[Facility]) -> Option<(usize, usize)> {
    for i in 0..facilities.len() {
        for j in (i + 1)..facilities.len() {
            if is_same_place(&facilities[i], &facilities[j]) {
                return Some((i, j));
            }
        }
    }
    None
}

fn is_same_place(a: &Facility, b: &Facility) -> bool {
    if distance_meters(a.lat, a.lng, b.lat, b.lng) >= DEDUP_RADIUS_M {
        return false;
    }
    names_match(&a.name, &b.name)
}

fn names_match(a: &str, b: &str) -> bool {
    let a = a.trim().to_lowercase();
    let b = b.trim().to_lowercase();
    if a == b || a.contains(&b) || b.contains(&a) {
        return true;
    }
    SHARED_NAME_TOKENS
        .iter()
        .any(|token| a.contains(token) && b.contains(token))
}
