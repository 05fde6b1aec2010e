//! Great-circle distance on the WGS84 mean-radius sphere.

const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine distance in meters between two coordinate pairs.
///
/// Symmetric, zero for coincident points, and stable across the
/// antimeridian and near the poles.
#[must_use]
pub fn distance_meters(lat1: f64, lng1: f64, lat2: f64, lng2: f64) -> f64 {
    let phi1 = lat1.to_radians();
    let phi2 = lat2.to_radians();
    let d_phi = (lat2 - lat1).to_radians();
    let d_lambda = (lng2 - lng1).to_radians();

    let a = (d_phi / 2.0).sin().powi(2)
        + phi1.cos() * phi2.cos() * (d_lambda / 2.0).sin().powi(2);
    let c = 2.0 * a.sqrt().atan2((1.0 - a).sqrt());

    EARTH_RADIUS_M * c
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn coincident_points_are_zero() {
        assert_eq!(distance_meters(-6.2, 106.8, -6.2, 106.8), 0.0);
    }

    #[test]
    fn is_symmetric() {
        let a = distance_meters(-6.2, 106.8, -6.9, 107.6);
        let b = distance_meters(-6.9, 107.6, -6.2, 106.8);
        assert!((a - b).abs() < 1e-9);
    }

    #[test]
    fn jakarta_to_bandung_is_about_120km() {
        // Monas to Gedung Sate, roughly 118 km great-circle.
        let d = distance_meters(-6.1754, 106.8272, -6.9025, 107.6186);
        assert!((100_000.0..140_000.0).contains(&d), "got {d}");
    }

    #[test]
    fn one_degree_longitude_at_equator_is_about_111km() {
        let d = distance_meters(0.0, 0.0, 0.0, 1.0);
        assert!((d - 111_195.0).abs() < 100.0, "got {d}");
    }

    #[test]
    fn antimeridian_crossing_is_short() {
        // 0.2 degrees of longitude across the date line, not ~360 degrees.
        let d = distance_meters(0.0, 179.9, 0.0, -179.9);
        assert!(d < 25_000.0, "got {d}");
    }
}
