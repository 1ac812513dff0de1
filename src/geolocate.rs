/// Geolocation capability seam.
///
/// The core cannot read a positioning system itself; the embedding shell
/// supplies one through `LocationProvider`. This module owns the failure
/// taxonomy, the bounded wait passed to the provider, and the short-lived
/// fix cache the locate button relies on. No retry is automatic — a failed
/// request is reported once and left to the user.

use crate::logging::{self, DataSource};
use crate::model::Coordinate;
use std::time::{Duration, Instant};

// ---------------------------------------------------------------------------
// Types
// ---------------------------------------------------------------------------

/// A one-shot position fix.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Estimated accuracy radius, meters.
    pub accuracy_m: f64,
}

impl Position {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// Categorized geolocation failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GeoError {
    /// The user or platform denied location access.
    PermissionDenied,
    /// The positioning system could not produce a fix.
    Unavailable,
    /// The bounded wait elapsed without a fix.
    Timeout,
}

impl std::fmt::Display for GeoError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            GeoError::PermissionDenied => {
                write!(f, "Location access was denied. Check the permission settings")
            }
            GeoError::Unavailable => write!(
                f,
                "Position unavailable. Check that the device location service is enabled"
            ),
            GeoError::Timeout => write!(
                f,
                "Timed out waiting for a position. Check connectivity or retry outdoors"
            ),
        }
    }
}

impl std::error::Error for GeoError {}

/// Options passed to each position request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct GeoOptions {
    /// Bounded wait for the provider to settle.
    pub timeout: Duration,
    /// Ask the provider for its best accuracy (slower on some platforms).
    pub high_accuracy: bool,
    /// A cached fix younger than this is served without a new request.
    pub maximum_age: Duration,
}

impl Default for GeoOptions {
    fn default() -> Self {
        GeoOptions {
            timeout: Duration::from_secs(45),
            high_accuracy: true,
            maximum_age: Duration::from_secs(30),
        }
    }
}

// ---------------------------------------------------------------------------
// Provider seam
// ---------------------------------------------------------------------------

/// One-shot position capability, implemented by the embedding shell.
/// The provider is expected to settle (fix or failure) within
/// `options.timeout`.
pub trait LocationProvider {
    fn current_position(&self, options: &GeoOptions) -> Result<Position, GeoError>;
}

impl<F> LocationProvider for F
where
    F: Fn(&GeoOptions) -> Result<Position, GeoError>,
{
    fn current_position(&self, options: &GeoOptions) -> Result<Position, GeoError> {
        self(options)
    }
}

// ---------------------------------------------------------------------------
// Locator
// ---------------------------------------------------------------------------

/// Wraps a provider with the cache-window policy and failure logging.
pub struct Locator<P: LocationProvider> {
    provider: P,
    options: GeoOptions,
    last_fix: Option<(Instant, Position)>,
}

impl<P: LocationProvider> Locator<P> {
    pub fn new(provider: P) -> Self {
        Self::with_options(provider, GeoOptions::default())
    }

    pub fn with_options(provider: P, options: GeoOptions) -> Self {
        Locator {
            provider,
            options,
            last_fix: None,
        }
    }

    pub fn options(&self) -> &GeoOptions {
        &self.options
    }

    /// Resolves the current position: serves the cached fix while it is
    /// younger than `maximum_age`, otherwise issues one bounded request.
    /// A fix with out-of-range coordinates counts as `Unavailable`.
    pub fn locate(&mut self) -> Result<Position, GeoError> {
        if let Some((at, fix)) = self.last_fix {
            if at.elapsed() <= self.options.maximum_age {
                logging::debug(DataSource::Geo, None, "serving cached position fix");
                return Ok(fix);
            }
        }

        match self.provider.current_position(&self.options) {
            Ok(fix) => {
                if !fix.coordinate().in_range() {
                    logging::warn(
                        DataSource::Geo,
                        None,
                        &format!(
                            "provider returned out-of-range fix ({}, {})",
                            fix.latitude, fix.longitude
                        ),
                    );
                    return Err(GeoError::Unavailable);
                }
                logging::info(
                    DataSource::Geo,
                    None,
                    &format!(
                        "position acquired: {:.4}, {:.4} (±{:.0} m)",
                        fix.latitude, fix.longitude, fix.accuracy_m
                    ),
                );
                self.last_fix = Some((Instant::now(), fix));
                Ok(fix)
            }
            Err(err) => {
                logging::warn(DataSource::Geo, None, &err.to_string());
                Err(err)
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
