/// Great-circle distance math and radius filtering.
///
/// All functions here are pure and deterministic — no I/O, no clock. The
/// nearby resolver in `source` builds on `within_radius`; nothing else in
/// the crate computes distances, so every path (live or degraded) reports
/// the same geometry.

use crate::model::{Coordinate, NearbyStation, Station};

/// Mean Earth radius in meters, as used by the haversine formula.
pub const EARTH_RADIUS_M: f64 = 6_371_000.0;

/// Haversine great-circle surface distance between two coordinates, in
/// meters.
///
/// Symmetric within floating-point tolerance; `distance_m(a, a) == 0.0`.
pub fn distance_m(a: Coordinate, b: Coordinate) -> f64 {
    let d_lat = (b.latitude - a.latitude).to_radians();
    let d_lng = (b.longitude - a.longitude).to_radians();
    let h = ((d_lat / 2.0).sin().powi(2)
        + a.latitude.to_radians().cos()
            * b.latitude.to_radians().cos()
            * (d_lng / 2.0).sin().powi(2))
    .clamp(0.0, 1.0);
    let c = 2.0 * h.sqrt().atan2((1.0 - h).sqrt());
    EARTH_RADIUS_M * c
}

/// Filters `stations` down to those within `radius_m` of `origin`
/// (boundary inclusive), annotating each with its computed distance.
///
/// Output preserves input order — callers must not assume the result is
/// sorted by proximity.
pub fn within_radius(stations: &[Station], origin: Coordinate, radius_m: f64) -> Vec<NearbyStation> {
    stations
        .iter()
        .filter_map(|station| {
            let distance_m = distance_m(origin, station.coordinate());
            if distance_m <= radius_m {
                Some(NearbyStation {
                    station: station.clone(),
                    distance_m,
                })
            } else {
                None
            }
        })
        .collect()
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::stations::STATION_DATASET;

    fn coord(latitude: f64, longitude: f64) -> Coordinate {
        Coordinate {
            latitude,
            longitude,
        }
    }

    #[test]
    fn test_distance_to_self_is_zero() {
        let p = coord(39.9173, 116.4152);
        assert_eq!(distance_m(p, p), 0.0);
    }

    #[test]
    fn test_distance_is_symmetric() {
        let a = coord(39.9173, 116.4152);
        let b = coord(40.5614, -89.9956);
        let ab = distance_m(a, b);
        let ba = distance_m(b, a);
        let rel = (ab - ba).abs() / ab;
        assert!(
            rel < 1e-6,
            "distance should be symmetric: {} vs {} (rel {})",
            ab,
            ba,
            rel
        );
    }

    #[test]
    fn test_distance_is_non_negative_for_antipodal_points() {
        let a = coord(90.0, 0.0);
        let b = coord(-90.0, 0.0);
        let d = distance_m(a, b);
        assert!(d > 0.0);
        // Pole to pole is half the Earth's circumference.
        let expected = std::f64::consts::PI * EARTH_RADIUS_M;
        assert!(
            (d - expected).abs() < 1.0,
            "pole-to-pole distance should be ~{} m, got {}",
            expected,
            d
        );
    }

    #[test]
    fn test_known_distance_chaoyangmen_to_dongzhimen() {
        // Two central-Beijing stations roughly 3.9 km apart. The haversine
        // result must land well inside [3500, 4300] m; a degrees-as-meters
        // bug or a radius-unit bug would miss by orders of magnitude.
        let a = coord(39.9173, 116.4152);
        let b = coord(39.9496, 116.4352);
        let d = distance_m(a, b);
        assert!(
            (3500.0..4300.0).contains(&d),
            "expected ~3.9 km, got {} m",
            d
        );
    }

    #[test]
    fn test_within_radius_boundary_is_inclusive() {
        let origin = coord(39.9173, 116.4152);
        let station = &STATION_DATASET[1];
        let exact = distance_m(origin, station.coordinate());

        let at_radius = within_radius(&STATION_DATASET, origin, exact);
        assert!(
            at_radius.iter().any(|n| n.station.id == station.id),
            "a station at exactly the radius must be included"
        );

        let just_inside = within_radius(&STATION_DATASET, origin, exact - 0.001);
        assert!(
            !just_inside.iter().any(|n| n.station.id == station.id),
            "a station beyond the radius must be excluded"
        );
    }

    #[test]
    fn test_within_radius_annotates_distances() {
        let origin = coord(39.9173, 116.4152);
        let nearby = within_radius(&STATION_DATASET, origin, 50_000.0);
        assert_eq!(nearby.len(), STATION_DATASET.len());
        for n in &nearby {
            let expected = distance_m(origin, n.station.coordinate());
            assert_eq!(n.distance_m, expected);
        }
    }

    #[test]
    fn test_within_radius_preserves_dataset_order() {
        let origin = coord(39.9173, 116.4152);
        let nearby = within_radius(&STATION_DATASET, origin, 50_000.0);
        let ids: Vec<u32> = nearby.iter().map(|n| n.station.id).collect();
        let expected: Vec<u32> = STATION_DATASET.iter().map(|s| s.id).collect();
        assert_eq!(ids, expected, "no proximity sort is applied");
    }
}
