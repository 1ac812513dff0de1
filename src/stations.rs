/// Static station dataset for the EV charging client.
///
/// Defines the built-in list of charging stations served when the client is
/// configured for local data or degrades after a remote failure. This is the
/// single source of truth for the local dataset — other modules should
/// resolve stations from here rather than hardcoding entries.

use crate::model::{Station, StationStatus};
use std::sync::LazyLock;

// ---------------------------------------------------------------------------
// Resolver constants (re-exported here for use alongside the dataset)
// ---------------------------------------------------------------------------

pub use crate::model::{DEFAULT_HOURLY_RATE, MAX_DURATION_HOURS};

/// Radius applied to a nearby query when the caller does not specify one.
pub const DEFAULT_NEARBY_RADIUS_M: f64 = 5000.0;

// ---------------------------------------------------------------------------
// Station dataset
// ---------------------------------------------------------------------------

/// All built-in charging stations, central Beijing, ordered east to west
/// along the Chang'an corridor.
///
/// Entries with a `station_id` were migrated from the previous backend
/// generation and keep their old numeric identity for lookups.
pub static STATION_DATASET: LazyLock<Vec<Station>> = LazyLock::new(|| {
    vec![
        Station {
            id: 1,
            station_id: Some(101),
            name: "Chaoyangmen".to_string(),
            address: "Chaoyangmen inner ring, exit B of line 2 station".to_string(),
            latitude: 39.9173,
            longitude: 116.4152,
            available_sockets: 3,
            total_sockets: 6,
            price_per_hour: 25.0,
            status: StationStatus::Available,
        },
        Station {
            id: 2,
            station_id: Some(102),
            name: "Dongzhimen".to_string(),
            address: "Dongzhimen transport hub, P2 parking level".to_string(),
            latitude: 39.9496,
            longitude: 116.4352,
            available_sockets: 5,
            total_sockets: 8,
            price_per_hour: 28.0,
            status: StationStatus::Available,
        },
        Station {
            id: 3,
            station_id: None,
            name: "Jianguomen".to_string(),
            address: "Jianguomen outer street, office tower garage".to_string(),
            latitude: 39.9110,
            longitude: 116.4197,
            available_sockets: 0,
            total_sockets: 4,
            price_per_hour: 25.0,
            status: StationStatus::Occupied,
        },
        Station {
            id: 4,
            station_id: Some(104),
            name: "Tiananmen Square".to_string(),
            address: "East visitor parking, south of Chang'an Avenue".to_string(),
            latitude: 39.9075,
            longitude: 116.3972,
            available_sockets: 2,
            total_sockets: 10,
            price_per_hour: 30.0,
            status: StationStatus::Available,
        },
        Station {
            id: 5,
            station_id: None,
            name: "Forbidden City".to_string(),
            address: "Donghuamen gate coach lot".to_string(),
            latitude: 39.9246,
            longitude: 116.3967,
            available_sockets: 0,
            total_sockets: 6,
            price_per_hour: 22.5,
            status: StationStatus::Offline, // lot closed for renovation
        },
    ]
});

/// Returns an owned copy of the full dataset, shaped exactly as a remote
/// list response would be after normalization.
pub fn all_stations() -> Vec<Station> {
    STATION_DATASET.clone()
}

/// Looks up a station by primary id or legacy `station_id`, in dataset
/// order; the first entry matching either field wins. Returns `None` for an
/// unknown id.
pub fn find_station(id: u32) -> Option<&'static Station> {
    STATION_DATASET
        .iter()
        .find(|s| s.id == id || s.station_id == Some(id))
}

/// Looks up a station by display name (exact match).
pub fn find_station_by_name(name: &str) -> Option<&'static Station> {
    STATION_DATASET.iter().find(|s| s.name == name)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::Coordinate;

    #[test]
    fn test_dataset_is_not_empty() {
        assert!(!STATION_DATASET.is_empty());
    }

    #[test]
    fn test_no_duplicate_ids() {
        let mut seen = std::collections::HashSet::new();
        for station in STATION_DATASET.iter() {
            assert!(
                seen.insert(station.id),
                "duplicate station id {} in STATION_DATASET",
                station.id
            );
        }
    }

    #[test]
    fn test_legacy_ids_do_not_shadow_primary_ids() {
        // A legacy id equal to another entry's primary id would make
        // find_station ambiguous in dataset order.
        let primary: std::collections::HashSet<u32> =
            STATION_DATASET.iter().map(|s| s.id).collect();
        for station in STATION_DATASET.iter() {
            if let Some(legacy) = station.station_id {
                assert!(
                    !primary.contains(&legacy),
                    "legacy id {} of '{}' collides with a primary id",
                    legacy,
                    station.name
                );
            }
        }
    }

    #[test]
    fn test_socket_counts_are_consistent() {
        for station in STATION_DATASET.iter() {
            assert!(
                station.available_sockets <= station.total_sockets,
                "'{}' reports {} available of {} total sockets",
                station.name,
                station.available_sockets,
                station.total_sockets
            );
        }
    }

    #[test]
    fn test_coordinates_are_within_wgs84_ranges() {
        for station in STATION_DATASET.iter() {
            let coordinate = Coordinate {
                latitude: station.latitude,
                longitude: station.longitude,
            };
            assert!(
                coordinate.in_range(),
                "'{}' has out-of-range coordinates ({}, {})",
                station.name,
                station.latitude,
                station.longitude
            );
        }
    }

    #[test]
    fn test_rates_are_positive() {
        for station in STATION_DATASET.iter() {
            assert!(
                station.price_per_hour > 0.0,
                "'{}' has non-positive hourly rate {}",
                station.name,
                station.price_per_hour
            );
        }
    }

    #[test]
    fn test_find_station_by_primary_id() {
        let station = find_station(1).expect("Chaoyangmen should be in the dataset");
        assert_eq!(station.id, 1);
        assert_eq!(station.name, "Chaoyangmen");
    }

    #[test]
    fn test_find_station_by_legacy_id() {
        let station = find_station(102).expect("legacy id 102 should resolve");
        assert_eq!(station.id, 2, "legacy id 102 belongs to Dongzhimen");
    }

    #[test]
    fn test_find_station_returns_none_for_unknown_id() {
        assert!(find_station(9999).is_none());
    }

    #[test]
    fn test_find_station_by_name() {
        let station = find_station_by_name("Jianguomen").expect("known name");
        assert_eq!(station.id, 3);
        assert!(find_station_by_name("jianguomen").is_none(), "match is exact");
    }

    #[test]
    fn test_all_stations_matches_dataset() {
        let all = all_stations();
        assert_eq!(all.len(), STATION_DATASET.len());
        assert_eq!(all[0], STATION_DATASET[0]);
    }

    #[test]
    fn test_occupied_and_offline_stations_have_no_free_sockets() {
        for station in STATION_DATASET.iter() {
            if station.status != StationStatus::Available {
                assert_eq!(
                    station.available_sockets, 0,
                    "'{}' is {} but reports free sockets",
                    station.name, station.status
                );
            }
        }
    }
}
