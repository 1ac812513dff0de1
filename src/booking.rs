/// Booking ledger and cost rules.
///
/// The ledger is session-local and ordered newest first: submissions are
/// prepended, so list order reflects submission order, not booking date.
/// Entries are never mutated or removed here — cancellation goes through
/// the remote API and takes effect on the next fetch.

use crate::model::{
    Booking, BookingStatus, Station, ValidationError, DEFAULT_HOURLY_RATE, MAX_DURATION_HOURS,
};
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Cost rule
// ---------------------------------------------------------------------------

/// The hourly rate applicable to a booking: the selected station's own rate
/// when the station resolves, the flat default otherwise.
pub fn applicable_rate(station: Option<&Station>) -> f64 {
    station.map(|s| s.price_per_hour).unwrap_or(DEFAULT_HOURLY_RATE)
}

/// cost = duration × hourly rate. No discounting, no proration of partial
/// hours.
pub fn booking_cost(duration_hours: u32, station: Option<&Station>) -> f64 {
    duration_hours as f64 * applicable_rate(station)
}

// ---------------------------------------------------------------------------
// Duration stepper
// ---------------------------------------------------------------------------

/// One step up on the duration control, clamped at `MAX_DURATION_HOURS`.
pub fn increment_duration(hours: u32) -> u32 {
    (hours + 1).min(MAX_DURATION_HOURS)
}

/// One step down on the duration control, clamped at 1.
pub fn decrement_duration(hours: u32) -> u32 {
    hours.saturating_sub(1).max(1)
}

// ---------------------------------------------------------------------------
// Ledger
// ---------------------------------------------------------------------------

/// The session-local list of reservations, newest first.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct BookingLedger {
    entries: Vec<Booking>,
}

impl BookingLedger {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seeds the ledger, e.g. from a remote booking list fetched at login.
    /// Entries are taken as already ordered newest first.
    pub fn with_entries(entries: Vec<Booking>) -> Self {
        BookingLedger { entries }
    }

    /// Entries in submission order, most recent first.
    pub fn entries(&self) -> &[Booking] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Submits a reservation: validates that a station was selected,
    /// computes the cost, and prepends the new entry.
    ///
    /// Duration is expected to be pre-clamped by the stepper; submission
    /// itself only checks the station selection, matching the form's
    /// native bounds handling.
    pub fn submit(
        &mut self,
        station_name: &str,
        date: NaiveDate,
        duration_hours: u32,
        station: Option<&Station>,
    ) -> Result<&Booking, ValidationError> {
        if station_name.trim().is_empty() {
            return Err(ValidationError::NoStationSelected);
        }
        let booking = Booking {
            id: self.entries.len() as u32 + 1,
            station: station_name.to_string(),
            date,
            duration_hours,
            status: BookingStatus::InProgress,
            cost: booking_cost(duration_hours, station),
        };
        self.entries.insert(0, booking);
        Ok(&self.entries[0])
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
