//! Integration diagnostics.
//!
//! Framework for checking the client configuration, the local dataset, and
//! the remote backend before a deployment flips `use_mock_data` off. The
//! report is serializable so it can be archived next to a deployment log.

use crate::api;
use crate::config::{endpoints, ApiConfig};
use crate::stations::{self, DEFAULT_NEARBY_RADIUS_M};
use chrono::Utc;
use serde::{Deserialize, Serialize};

// ============================================================================
// Report structures
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticReport {
    pub timestamp: String,
    pub config: ConfigCheck,
    pub dataset: DatasetCheck,
    /// `None` when mock mode is configured — there is no backend to test.
    pub backend: Option<BackendCheck>,
    pub endpoints: Option<EndpointChecks>,
    pub summary: DiagnosticSummary,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ConfigCheck {
    pub base_url: String,
    pub timeout_ms: u64,
    pub use_mock_data: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DatasetCheck {
    pub station_count: usize,
    pub first_station: Option<String>,
    /// Socket counts consistent and coordinates in range for every entry.
    pub invariants_ok: bool,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BackendCheck {
    pub reachable: bool,
    pub status: Option<u16>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointChecks {
    pub list: EndpointProbe,
    pub detail: EndpointProbe,
    pub nearby: EndpointProbe,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EndpointProbe {
    pub endpoint: String,
    pub success: bool,
    pub record_count: Option<usize>,
    pub error_message: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiagnosticSummary {
    /// "mock" or "live".
    pub mode: String,
    pub checks_run: usize,
    pub checks_passed: usize,
}

// ============================================================================
// Checks
// ============================================================================

pub fn check_config(config: &ApiConfig) -> ConfigCheck {
    ConfigCheck {
        base_url: config.base_url.clone(),
        timeout_ms: config.timeout_ms,
        use_mock_data: config.use_mock_data,
    }
}

pub fn check_dataset() -> DatasetCheck {
    let dataset = &stations::STATION_DATASET;
    let invariants_ok = !dataset.is_empty()
        && dataset.iter().all(|s| {
            s.available_sockets <= s.total_sockets
                && s.coordinate().in_range()
                && s.price_per_hour > 0.0
        });
    DatasetCheck {
        station_count: dataset.len(),
        first_station: dataset.first().map(|s| s.name.clone()),
        invariants_ok,
    }
}

/// One plain GET against the station list, reported as reachability: any
/// HTTP answer counts as reachable, even an error status.
pub fn test_backend_connection(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> BackendCheck {
    let result = client
        .get(config.url(endpoints::STATIONS_LIST))
        .timeout(config.timeout())
        .send();
    match result {
        Ok(response) => BackendCheck {
            reachable: true,
            status: Some(response.status().as_u16()),
            error_message: None,
        },
        Err(e) => BackendCheck {
            reachable: false,
            status: None,
            error_message: Some(e.to_string()),
        },
    }
}

/// Probes the three read endpoints the map view depends on.
pub fn probe_endpoints(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> EndpointChecks {
    let list = match api::fetch_stations(client, config) {
        Ok(stations) => EndpointProbe {
            endpoint: endpoints::STATIONS_LIST.to_string(),
            success: true,
            record_count: Some(stations.len()),
            error_message: None,
        },
        Err(e) => EndpointProbe {
            endpoint: endpoints::STATIONS_LIST.to_string(),
            success: false,
            record_count: None,
            error_message: Some(e.to_string()),
        },
    };

    let detail = match api::fetch_station(client, config, 1) {
        Ok(station) => EndpointProbe {
            endpoint: endpoints::station_detail(1),
            success: true,
            record_count: Some(usize::from(station.is_some())),
            error_message: None,
        },
        Err(e) => EndpointProbe {
            endpoint: endpoints::station_detail(1),
            success: false,
            record_count: None,
            error_message: Some(e.to_string()),
        },
    };

    // Same reference point the map opens on.
    let nearby = match api::fetch_nearby(client, config, 39.9, 116.4, DEFAULT_NEARBY_RADIUS_M) {
        Ok(stations) => EndpointProbe {
            endpoint: endpoints::STATIONS_NEARBY.to_string(),
            success: true,
            record_count: Some(stations.len()),
            error_message: None,
        },
        Err(e) => EndpointProbe {
            endpoint: endpoints::STATIONS_NEARBY.to_string(),
            success: false,
            record_count: None,
            error_message: Some(e.to_string()),
        },
    };

    EndpointChecks {
        list,
        detail,
        nearby,
    }
}

// ============================================================================
// Report generation
// ============================================================================

/// Runs every applicable check. In mock mode the backend and endpoint
/// probes are skipped — the local dataset is the only thing to verify.
pub fn generate_report(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> DiagnosticReport {
    let config_check = check_config(config);
    let dataset = check_dataset();

    let (backend, endpoint_checks) = if config.use_mock_data {
        (None, None)
    } else {
        (
            Some(test_backend_connection(client, config)),
            Some(probe_endpoints(client, config)),
        )
    };

    let mut checks_run = 1; // dataset
    let mut checks_passed = usize::from(dataset.invariants_ok);
    if let Some(b) = &backend {
        checks_run += 1;
        checks_passed += usize::from(b.reachable);
    }
    if let Some(e) = &endpoint_checks {
        for probe in [&e.list, &e.detail, &e.nearby] {
            checks_run += 1;
            checks_passed += usize::from(probe.success);
        }
    }

    DiagnosticReport {
        timestamp: Utc::now().to_rfc3339(),
        config: config_check,
        dataset,
        backend,
        endpoints: endpoint_checks,
        summary: DiagnosticSummary {
            mode: if config.use_mock_data { "mock" } else { "live" }.to_string(),
            checks_run,
            checks_passed,
        },
    }
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_dataset_check_passes_on_builtin_data() {
        let check = check_dataset();
        assert!(check.invariants_ok);
        assert_eq!(check.station_count, stations::STATION_DATASET.len());
        assert_eq!(check.first_station.as_deref(), Some("Chaoyangmen"));
    }

    #[test]
    fn test_mock_mode_report_skips_backend_probes() {
        let config = ApiConfig {
            use_mock_data: true,
            ..ApiConfig::default()
        };
        let client = reqwest::blocking::Client::new();
        let report = generate_report(&client, &config);
        assert!(report.backend.is_none());
        assert!(report.endpoints.is_none());
        assert_eq!(report.summary.mode, "mock");
        assert_eq!(report.summary.checks_run, 1);
        assert_eq!(report.summary.checks_passed, 1);
    }

    #[test]
    fn test_report_serializes() {
        let config = ApiConfig {
            use_mock_data: true,
            ..ApiConfig::default()
        };
        let client = reqwest::blocking::Client::new();
        let report = generate_report(&client, &config);
        let json = serde_json::to_string_pretty(&report).unwrap();
        let parsed: DiagnosticReport = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed.summary.checks_run, report.summary.checks_run);
    }
}
