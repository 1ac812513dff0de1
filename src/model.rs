/// Core data types for the EV charging station client.
///
/// This module defines the shared domain model imported by all other modules.
/// It contains no I/O and no business logic — only types, plus the serde
/// derives needed where they cross a module boundary.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ---------------------------------------------------------------------------
// Charging constants
// ---------------------------------------------------------------------------

/// Fallback hourly rate (currency units per hour), applied when a booking
/// references a station whose own rate cannot be resolved.
pub const DEFAULT_HOURLY_RATE: f64 = 25.0;

/// Longest charging session a single booking may reserve, in hours.
pub const MAX_DURATION_HOURS: u32 = 12;

// ---------------------------------------------------------------------------
// Station types
// ---------------------------------------------------------------------------

/// Operational status of a charging station.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum StationStatus {
    /// At least one socket is free.
    Available,
    /// All sockets are currently in use.
    Occupied,
    /// The station is not accepting sessions.
    Offline,
}

impl std::fmt::Display for StationStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            StationStatus::Available => write!(f, "available"),
            StationStatus::Occupied => write!(f, "occupied"),
            StationStatus::Offline => write!(f, "offline"),
        }
    }
}

/// A charging station record in its canonical shape.
///
/// The remote backend historically served two record shapes; both are
/// normalized into this type at the `api` boundary, so downstream code only
/// ever sees one shape. A `Station` is immutable for the lifetime of a fetch
/// result — callers re-fetch rather than mutate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Station {
    pub id: u32,
    /// Secondary identity carried over from the previous backend generation.
    /// Lookups accept either this or `id`.
    pub station_id: Option<u32>,
    pub name: String,
    pub address: String,
    /// WGS84 latitude, decimal degrees.
    pub latitude: f64,
    /// WGS84 longitude, decimal degrees.
    pub longitude: f64,
    pub available_sockets: u32,
    pub total_sockets: u32,
    pub price_per_hour: f64,
    pub status: StationStatus,
}

impl Station {
    pub fn coordinate(&self) -> Coordinate {
        Coordinate {
            latitude: self.latitude,
            longitude: self.longitude,
        }
    }
}

/// A (latitude, longitude) pair in decimal degrees.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Coordinate {
    pub latitude: f64,
    pub longitude: f64,
}

impl Coordinate {
    /// Whether both components are inside the valid WGS84 ranges.
    pub fn in_range(&self) -> bool {
        (-90.0..=90.0).contains(&self.latitude) && (-180.0..=180.0).contains(&self.longitude)
    }
}

/// A radius query against the station dataset. Exists only for the duration
/// of one resolution call; never persisted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NearbyQuery {
    pub origin: Coordinate,
    pub radius_m: f64,
}

/// A station annotated with its computed distance from a query origin.
#[derive(Debug, Clone, PartialEq)]
pub struct NearbyStation {
    pub station: Station,
    pub distance_m: f64,
}

// ---------------------------------------------------------------------------
// Booking types
// ---------------------------------------------------------------------------

/// Lifecycle state of a booking held in the session ledger.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum BookingStatus {
    InProgress,
    Completed,
}

impl std::fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            BookingStatus::InProgress => write!(f, "in-progress"),
            BookingStatus::Completed => write!(f, "completed"),
        }
    }
}

/// A charging reservation. Once appended to the ledger an entry is never
/// mutated or deleted; cancellation goes through the remote API instead.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Booking {
    pub id: u32,
    /// Display name of the referenced station.
    pub station: String,
    pub date: NaiveDate,
    /// Whole hours, in [1, MAX_DURATION_HOURS].
    pub duration_hours: u32,
    pub status: BookingStatus,
    /// duration_hours × applicable hourly rate. Non-negative.
    pub cost: f64,
}

// ---------------------------------------------------------------------------
// User types
// ---------------------------------------------------------------------------

/// The current user's profile and wallet. Persisted by the remote backend
/// between sessions; this crate only holds it for the active session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    /// Non-negative wallet balance.
    pub balance: f64,
    pub registered_date: NaiveDate,
}

// ---------------------------------------------------------------------------
// Error types
// ---------------------------------------------------------------------------

/// Errors that can arise when calling the remote charging backend.
#[derive(Debug, Clone, PartialEq)]
pub enum ApiError {
    /// Non-2xx HTTP response from the backend.
    HttpStatus(u16),
    /// The request could not be sent or the response body could not be read.
    Transport(String),
    /// The response body could not be deserialized.
    Parse(String),
    /// The backend answered but rejected the operation
    /// (a `success: false` payload).
    Rejected(String),
}

impl std::fmt::Display for ApiError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ApiError::HttpStatus(code) => write!(f, "HTTP error: {}", code),
            ApiError::Transport(msg) => write!(f, "Transport error: {}", msg),
            ApiError::Parse(msg) => write!(f, "Parse error: {}", msg),
            ApiError::Rejected(msg) => write!(f, "Rejected by backend: {}", msg),
        }
    }
}

impl std::error::Error for ApiError {}

/// Input-validation failures. Surfaced immediately to the caller; the
/// rejected operation leaves prior state unchanged.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// A required field was empty.
    MissingField(&'static str),
    /// The email field does not look like an email address.
    InvalidEmail,
    /// Passwords must be at least 6 characters.
    PasswordTooShort,
    /// Password and confirmation do not match.
    PasswordMismatch,
    /// Recharge amounts must be positive and finite.
    NonPositiveAmount,
    /// A booking was submitted without selecting a station.
    NoStationSelected,
    /// The operation needs an active session.
    NotLoggedIn,
}

impl std::fmt::Display for ValidationError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ValidationError::MissingField(name) => write!(f, "{} is required", name),
            ValidationError::InvalidEmail => write!(f, "Please enter a valid email address"),
            ValidationError::PasswordTooShort => {
                write!(f, "Password must be at least 6 characters")
            }
            ValidationError::PasswordMismatch => write!(f, "The two passwords do not match"),
            ValidationError::NonPositiveAmount => {
                write!(f, "Amount must be a positive number")
            }
            ValidationError::NoStationSelected => write!(f, "Please select a charging station"),
            ValidationError::NotLoggedIn => write!(f, "No active session"),
        }
    }
}

impl std::error::Error for ValidationError {}
