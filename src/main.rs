/// Diagnostics entrypoint.
///
/// Loads `.env` and the optional TOML config, runs the integration checks,
/// and prints a report. Exit status is success only when every check
/// passed, so the binary can gate a deployment script.
///
/// Usage: evcharge_client [CONFIG.toml] [--json]

use evcharge_client::api;
use evcharge_client::config::ApiConfig;
use evcharge_client::diag::{self, DiagnosticReport, EndpointProbe};
use evcharge_client::logging::{self, LogLevel};
use std::path::{Path, PathBuf};
use std::process::ExitCode;

fn main() -> ExitCode {
    dotenv::dotenv().ok();
    logging::init_logger(LogLevel::Info, None, false);

    let mut json_output = false;
    let mut config_path: Option<PathBuf> = None;
    for arg in std::env::args().skip(1) {
        match arg.as_str() {
            "--json" => json_output = true,
            path => config_path = Some(PathBuf::from(path)),
        }
    }
    // Default config file, picked up only when present next to the binary.
    if config_path.is_none() && Path::new("evcharge.toml").exists() {
        config_path = Some(PathBuf::from("evcharge.toml"));
    }

    let config = match ApiConfig::load(config_path.as_deref()) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };

    let client = match api::build_client() {
        Ok(client) => client,
        Err(e) => {
            eprintln!("cannot build HTTP client: {}", e);
            return ExitCode::FAILURE;
        }
    };

    let report = diag::generate_report(&client, &config);

    if json_output {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("cannot serialize report: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        print_report(&report);
    }

    if report.summary.checks_passed == report.summary.checks_run {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}

fn print_report(report: &DiagnosticReport) {
    println!("========== Client configuration ==========");
    println!("Backend base URL:  {}", report.config.base_url);
    println!("Request timeout:   {} ms", report.config.timeout_ms);
    println!("Mock data mode:    {}", report.config.use_mock_data);
    println!();

    println!("========== Local dataset ==========");
    println!("Stations:          {}", report.dataset.station_count);
    if let Some(first) = &report.dataset.first_station {
        println!("First station:     {}", first);
    }
    println!(
        "Invariants:        {}",
        if report.dataset.invariants_ok { "ok" } else { "VIOLATED" }
    );
    println!();

    if let Some(backend) = &report.backend {
        println!("========== Backend connection ==========");
        if backend.reachable {
            println!(
                "✅ Reachable (HTTP {})",
                backend.status.map(|s| s.to_string()).unwrap_or_default()
            );
        } else {
            println!("❌ Unreachable");
            if let Some(err) = &backend.error_message {
                println!("   {}", err);
            }
        }
        println!();
    }

    if let Some(endpoints) = &report.endpoints {
        println!("========== Endpoint probes ==========");
        print_probe(&endpoints.list);
        print_probe(&endpoints.detail);
        print_probe(&endpoints.nearby);
        println!();
    }

    println!("========== Summary ==========");
    println!("Mode:              {}", report.summary.mode);
    println!(
        "Checks:            {}/{} passed",
        report.summary.checks_passed, report.summary.checks_run
    );
    if report.summary.mode == "mock" {
        println!("Hint: unset use_mock_data (or EVCHARGE_USE_MOCK_DATA) to probe the backend");
    }
}

fn print_probe(probe: &EndpointProbe) {
    if probe.success {
        match probe.record_count {
            Some(count) => println!("✅ {} ({} records)", probe.endpoint, count),
            None => println!("✅ {}", probe.endpoint),
        }
    } else {
        println!(
            "❌ {}: {}",
            probe.endpoint,
            probe.error_message.as_deref().unwrap_or("failed")
        );
    }
}
