//! Per-category distance-decay configuration and the contribution model.

use crate::category::Category;

/// Decay triple controlling how much a facility of a category is worth
/// at a given distance from the query origin.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CategoryConfig {
    /// Facilities beyond this radius are dropped entirely.
    pub max_distance_m: f64,
    /// Contribution of a facility at distance zero.
    pub max_contribution: f64,
    /// Exponent shaping the decay curve; higher rewards proximity more
    /// sharply.
    pub decay_rate: f64,
}

impl CategoryConfig {
    /// Decay configuration for one category.
    ///
    /// All radii are currently 1000 m but the table is per-category so
    /// individual radii can diverge without touching call sites.
    #[must_use]
    pub const fn for_category(category: Category) -> Self {
        let (max_contribution, decay_rate) = match category {
            Category::Health => (10.0, 0.8),
            Category::Education => (10.0, 0.75),
            Category::Market => (8.0, 0.7),
            // Transport rewards closeness sharply; stops lose value fast.
            Category::Transport => (10.0, 0.95),
            Category::Walkability => (12.0, 0.85),
            Category::Recreation => (9.0, 0.7),
            Category::Safety => (6.0, 0.8),
            Category::Accessibility => (4.0, 0.9),
            // Stations are rare, so police tolerates distance.
            Category::Police => (8.0, 0.6),
            Category::Religious => (6.0, 0.65),
        };
        Self {
            max_distance_m: 1000.0,
            max_contribution,
            decay_rate,
        }
    }
}

/// Fraction of `max_contribution` every in-radius facility keeps, no
/// matter how far out it sits.
const CONTRIBUTION_FLOOR: f64 = 0.1;

/// Decayed contribution of a facility at `distance_m` from the origin.
///
/// Zero beyond the category radius; otherwise
/// `max_contribution * (1 - d/max)^decay_rate`, floored at 10% of
/// `max_contribution` so presence still counts at the radius edge.
#[must_use]
pub fn contribution(distance_m: f64, config: &CategoryConfig) -> f64 {
    if distance_m > config.max_distance_m {
        return 0.0;
    }
    let normalized = distance_m / config.max_distance_m;
    let raw = config.max_contribution * (1.0 - normalized).powf(config.decay_rate);
    raw.max(config.max_contribution * CONTRIBUTION_FLOOR)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn hospital_cfg() -> CategoryConfig {
        CategoryConfig {
            max_distance_m: 1000.0,
            max_contribution: 10.0,
            decay_rate: 0.8,
        }
    }

    #[test]
    fn zero_distance_yields_max_contribution() {
        assert!((contribution(0.0, &hospital_cfg()) - 10.0).abs() < 1e-12);
    }

    #[test]
    fn radius_edge_hits_the_floor() {
        // normalized = 1 → raw = 0 → 10% floor applies.
        let c = contribution(1000.0, &hospital_cfg());
        assert!((c - 1.0).abs() < 1e-12, "got {c}");
    }

    #[test]
    fn beyond_radius_is_zero() {
        assert_eq!(contribution(1000.1, &hospital_cfg()), 0.0);
    }

    #[test]
    fn contribution_is_non_increasing_in_distance() {
        for category in Category::ALL {
            let cfg = CategoryConfig::for_category(category);
            let mut prev = f64::INFINITY;
            let mut d = 0.0;
            while d <= cfg.max_distance_m {
                let c = contribution(d, &cfg);
                assert!(c <= prev + 1e-12, "{category}: rose at {d} m");
                assert!(
                    c >= CONTRIBUTION_FLOOR * cfg.max_contribution - 1e-12,
                    "{category}: below floor at {d} m"
                );
                prev = c;
                d += 25.0;
            }
        }
    }

    #[test]
    fn config_table_covers_all_categories_with_sane_values() {
        for category in Category::ALL {
            let cfg = CategoryConfig::for_category(category);
            assert!(cfg.max_distance_m > 0.0);
            assert!(cfg.max_contribution > 0.0);
            assert!(cfg.decay_rate > 0.0 && cfg.decay_rate <= 1.0);
        }
    }

    #[test]
    fn walkability_police_accessibility_match_tuning() {
        let walk = CategoryConfig::for_category(Category::Walkability);
        assert_eq!((walk.max_contribution, walk.decay_rate), (12.0, 0.85));
        let police = CategoryConfig::for_category(Category::Police);
        assert_eq!((police.max_contribution, police.decay_rate), (8.0, 0.6));
        let access = CategoryConfig::for_category(Category::Accessibility);
        assert_eq!((access.max_contribution, access.decay_rate), (4.0, 0.9));
    }
}
