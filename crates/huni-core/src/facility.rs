//! Facility records and the raw-tag name fallback chain.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use crate::category::Category;

/// A classified, scored point of interest.
///
/// Ephemeral: built per scoring run from one raw map element or one
/// custom user point, and discarded with the run.
#[derive(Debug, Clone, Serialize)]
pub struct Facility {
    /// `{category}-{source-element-id-or-index}`; unique within one
    /// run's facility list after dedup.
    pub id: String,
    pub name: String,
    /// The inferred category, which may differ from the query bucket
    /// that returned the raw element.
    pub category: Category,
    pub lat: f64,
    pub lng: f64,
    /// Meters from the query origin, rounded.
    pub distance: u32,
    /// Decayed value toward the category score; non-negative.
    pub contribution: f64,
    /// Raw source attributes, passed through for icons and debugging.
    pub tags: BTreeMap<String, String>,
}

/// A user-authored point from the custom POI store.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CustomPoi {
    pub id: String,
    pub name: String,
    /// Category label as stored; `"custom"` is a legacy alias for
    /// recreation.
    pub category: String,
    pub lat: f64,
    pub lng: f64,
}

/// Tag keys tried in order when a raw element has no usable `name`.
const NAME_FALLBACK_KEYS: &[&str] = &[
    "shop",
    "amenity",
    "leisure",
    "highway",
    "railway",
    "public_transport",
];

/// Resolve a display name from raw tags, ending at
/// `"{category} facility"` when nothing usable exists.
#[must_use]
pub fn resolve_name(tags: &BTreeMap<String, String>, category: Category) -> String {
    if let Some(name) = tags.get("name").map(|s| s.trim()).filter(|s| !s.is_empty()) {
        return name.to_string();
    }
    for key in NAME_FALLBACK_KEYS {
        if let Some(value) = tags.get(*key).map(|s| s.trim()).filter(|s| !s.is_empty()) {
            return value.replace('_', " ");
        }
    }
    format!("{category} facility")
}

#[cfg(test)]
mod tests {
    use super::*;

    fn tags(pairs: &[(&str, &str)]) -> BTreeMap<String, String> {
        pairs
            .iter()
            .map(|(k, v)| ((*k).to_string(), (*v).to_string()))
            .collect()
    }

    #[test]
    fn name_tag_wins() {
        let t = tags(&[("name", "Apotek Sehat"), ("amenity", "pharmacy")]);
        assert_eq!(resolve_name(&t, Category::Health), "Apotek Sehat");
    }

    #[test]
    fn empty_name_falls_through_to_amenity() {
        let t = tags(&[("name", "  "), ("amenity", "fast_food")]);
        assert_eq!(resolve_name(&t, Category::Market), "fast food");
    }

    #[test]
    fn shop_beats_amenity() {
        let t = tags(&[("shop", "supermarket"), ("amenity", "marketplace")]);
        assert_eq!(resolve_name(&t, Category::Market), "supermarket");
    }

    #[test]
    fn no_tags_yields_category_default() {
        assert_eq!(
            resolve_name(&BTreeMap::new(), Category::Walkability),
            "walkability facility"
        );
    }
}
