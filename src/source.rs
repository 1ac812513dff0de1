/// Station data source with the degraded-mode policy.
///
/// Four read operations sit in front of the remote backend and the static
/// dataset. The `use_mock_data` switch is evaluated on every call, and any
/// remote failure is caught, classified, logged, and absorbed by completing
/// the call from the local dataset — the caller of a read operation never
/// observes the failure directly. The result type records which path
/// answered so tests (and curious callers) can tell.

use crate::api;
use crate::config::ApiConfig;
use crate::geo;
use crate::logging::{self, DataSource};
use crate::model::{ApiError, Coordinate, NearbyQuery, NearbyStation, Station};
use crate::stations::{self, DEFAULT_NEARBY_RADIUS_M};

// ---------------------------------------------------------------------------
// Sourced results
// ---------------------------------------------------------------------------

/// A data-source result that records which path produced it.
///
/// `Ok` covers both a live backend answer and the configured-mock mode;
/// `Fallback` means the remote path failed and the data was recomputed
/// locally. The cause is carried for inspection but has already been
/// logged — callers are free to ignore it.
#[derive(Debug, Clone, PartialEq)]
pub enum Sourced<T> {
    Ok(T),
    Fallback { data: T, cause: ApiError },
}

impl<T> Sourced<T> {
    /// The payload, regardless of which path produced it.
    pub fn into_inner(self) -> T {
        match self {
            Sourced::Ok(data) => data,
            Sourced::Fallback { data, .. } => data,
        }
    }

    pub fn inner(&self) -> &T {
        match self {
            Sourced::Ok(data) => data,
            Sourced::Fallback { data, .. } => data,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, Sourced::Fallback { .. })
    }

    pub fn fallback_cause(&self) -> Option<&ApiError> {
        match self {
            Sourced::Ok(_) => None,
            Sourced::Fallback { cause, .. } => Some(cause),
        }
    }

    fn map<U>(self, f: impl FnOnce(T) -> U) -> Sourced<U> {
        match self {
            Sourced::Ok(data) => Sourced::Ok(f(data)),
            Sourced::Fallback { data, cause } => Sourced::Fallback {
                data: f(data),
                cause,
            },
        }
    }
}

// ---------------------------------------------------------------------------
// Read operations
// ---------------------------------------------------------------------------

/// All stations: the full remote list, or the full local dataset.
pub fn get_all_stations(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> Sourced<Vec<Station>> {
    if config.use_mock_data {
        logging::debug(DataSource::Stations, None, "serving station list from local dataset");
        return Sourced::Ok(stations::all_stations());
    }
    match api::fetch_stations(client, config) {
        Ok(list) => Sourced::Ok(list),
        Err(cause) => {
            logging::log_remote_failure(DataSource::Stations, "getAllStations", &cause);
            Sourced::Fallback {
                data: stations::all_stations(),
                cause,
            }
        }
    }
}

/// One station by primary id or legacy `station_id`; first match wins.
/// An absent id is an empty result, never an error.
pub fn get_station_by_id(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    id: u32,
) -> Sourced<Option<Station>> {
    if config.use_mock_data {
        return Sourced::Ok(stations::find_station(id).cloned());
    }
    match api::fetch_station(client, config, id) {
        Ok(station) => Sourced::Ok(station),
        Err(cause) => {
            logging::log_remote_failure(DataSource::Stations, "getStationById", &cause);
            Sourced::Fallback {
                data: stations::find_station(id).cloned(),
                cause,
            }
        }
    }
}

/// Stations within `radius_m` of `origin` (default 5000 m), annotated with
/// haversine distances. The local path filters inclusively (`<= radius`);
/// the remote path trusts the backend's filtering and only annotates.
/// No ordering guarantee either way.
pub fn get_nearby_stations(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    origin: Coordinate,
    radius_m: Option<f64>,
) -> Sourced<Vec<NearbyStation>> {
    let query = NearbyQuery {
        origin,
        radius_m: radius_m.unwrap_or(DEFAULT_NEARBY_RADIUS_M),
    };
    if config.use_mock_data {
        return Sourced::Ok(resolve_nearby_local(&query));
    }
    match api::fetch_nearby(client, config, query.origin.latitude, query.origin.longitude, query.radius_m)
    {
        Ok(list) => Sourced::Ok(annotate_distances(list, query.origin)),
        Err(cause) => {
            logging::log_remote_failure(DataSource::Stations, "getNearbyStations", &cause);
            Sourced::Fallback {
                data: resolve_nearby_local(&query),
                cause,
            }
        }
    }
}

/// Keyword search. No keyword (or an empty one) returns the full list;
/// otherwise only entries whose name contains the keyword as a
/// case-sensitive substring.
pub fn search_stations(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    keyword: Option<&str>,
) -> Sourced<Vec<Station>> {
    if config.use_mock_data {
        return Sourced::Ok(search_local(keyword));
    }
    match api::search_stations(client, config, keyword) {
        Ok(list) => Sourced::Ok(list),
        Err(cause) => {
            logging::log_remote_failure(DataSource::Stations, "searchStations", &cause);
            Sourced::Fallback {
                data: search_local(keyword),
                cause,
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Consumer policy
// ---------------------------------------------------------------------------

/// Map-view contract: resolve nearby stations, and when the radius query
/// comes back empty, substitute the full unfiltered list instead. Distances
/// are dropped because the substituted list has none.
pub fn nearby_or_all(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    origin: Coordinate,
    radius_m: Option<f64>,
) -> Sourced<Vec<Station>> {
    match get_nearby_stations(client, config, origin, radius_m) {
        Sourced::Ok(list) if list.is_empty() => get_all_stations(client, config),
        Sourced::Fallback { data, cause } if data.is_empty() => {
            // The radius query already degraded; the substitution stays local
            // rather than retrying the backend.
            Sourced::Fallback {
                data: stations::all_stations(),
                cause,
            }
        }
        sourced => sourced.map(|list| list.into_iter().map(|n| n.station).collect()),
    }
}

// ---------------------------------------------------------------------------
// Local computations
// ---------------------------------------------------------------------------

fn resolve_nearby_local(query: &NearbyQuery) -> Vec<NearbyStation> {
    geo::within_radius(&stations::STATION_DATASET, query.origin, query.radius_m)
}

fn annotate_distances(list: Vec<Station>, origin: Coordinate) -> Vec<NearbyStation> {
    list.into_iter()
        .map(|station| {
            let distance_m = geo::distance_m(origin, station.coordinate());
            NearbyStation {
                station,
                distance_m,
            }
        })
        .collect()
}

fn search_local(keyword: Option<&str>) -> Vec<Station> {
    match keyword {
        Some(keyword) if !keyword.is_empty() => stations::STATION_DATASET
            .iter()
            .filter(|s| s.name.contains(keyword))
            .cloned()
            .collect(),
        _ => stations::all_stations(),
    }
}

// ---------------------------------------------------------------------------
// Tests (mock-mode paths; the fallback contract is covered in tests/)
// ---------------------------------------------------------------------------
