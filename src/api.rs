/// Charging backend REST client.
///
/// Wire payload types and blocking HTTP calls for the station, booking,
/// user, and auth endpoints. Two generations of the station record coexist
/// on the wire; both are normalized into the canonical `Station` here and
/// nowhere else — downstream code never sees the raw shapes.

use crate::config::{endpoints, ApiConfig};
use crate::model::{
    ApiError, Booking, BookingStatus, Station, StationStatus, UserProfile,
    DEFAULT_HOURLY_RATE,
};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};

// ============================================================================
// Station payloads
// ============================================================================

/// A station record as served by the backend. The current shape is tried
/// first; records from the previous backend generation fall through to the
/// legacy shape.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
pub enum StationPayload {
    Current(CurrentStation),
    Legacy(LegacyStation),
}

/// Current wire shape.
#[derive(Debug, Deserialize)]
pub struct CurrentStation {
    pub id: u32,
    #[serde(rename = "stationId", default)]
    pub station_id: Option<u32>,
    pub name: String,
    #[serde(default)]
    pub address: String,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(rename = "availableSockets")]
    pub available_sockets: u32,
    #[serde(rename = "totalSockets")]
    pub total_sockets: u32,
    #[serde(rename = "pricePerHour")]
    pub price_per_hour: f64,
    #[serde(default)]
    pub status: Option<String>,
}

/// Legacy wire shape: a bare marker point with a single availability flag
/// and, on some records, a flat price.
#[derive(Debug, Deserialize)]
pub struct LegacyStation {
    pub id: u32,
    #[serde(rename = "stationId", default)]
    pub station_id: Option<u32>,
    pub location: String,
    pub lat: f64,
    pub lng: f64,
    pub available: bool,
    #[serde(default)]
    pub price: Option<f64>,
}

impl StationPayload {
    /// Normalizes either wire shape into the canonical record.
    pub fn into_station(self) -> Station {
        match self {
            StationPayload::Current(s) => {
                let status = parse_station_status(s.status.as_deref(), s.available_sockets);
                Station {
                    id: s.id,
                    station_id: s.station_id,
                    name: s.name,
                    address: s.address,
                    latitude: s.latitude,
                    longitude: s.longitude,
                    available_sockets: s.available_sockets,
                    total_sockets: s.total_sockets,
                    price_per_hour: s.price_per_hour,
                    status,
                }
            }
            StationPayload::Legacy(s) => {
                // Legacy records carry no socket counts; the boolean flag
                // maps to a single notional socket.
                let (available_sockets, status) = if s.available {
                    (1, StationStatus::Available)
                } else {
                    (0, StationStatus::Occupied)
                };
                Station {
                    id: s.id,
                    station_id: s.station_id,
                    name: s.location,
                    address: String::new(),
                    latitude: s.lat,
                    longitude: s.lng,
                    available_sockets,
                    total_sockets: 1,
                    price_per_hour: s.price.unwrap_or(DEFAULT_HOURLY_RATE),
                    status,
                }
            }
        }
    }
}

fn parse_station_status(raw: Option<&str>, available_sockets: u32) -> StationStatus {
    match raw.map(|s| s.to_ascii_lowercase()).as_deref() {
        Some("available") => StationStatus::Available,
        Some("occupied") => StationStatus::Occupied,
        Some("offline") => StationStatus::Offline,
        // Absent or unrecognized tag: infer from the socket count.
        _ => {
            if available_sockets > 0 {
                StationStatus::Available
            } else {
                StationStatus::Occupied
            }
        }
    }
}

// ============================================================================
// Booking payloads
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct BookingPayload {
    #[serde(default)]
    pub id: Option<u32>,
    pub station: String,
    pub date: NaiveDate,
    #[serde(rename = "duration")]
    pub duration_hours: u32,
    #[serde(default)]
    pub status: Option<String>,
    pub cost: f64,
}

impl BookingPayload {
    pub fn from_booking(booking: &Booking) -> Self {
        BookingPayload {
            id: Some(booking.id),
            station: booking.station.clone(),
            date: booking.date,
            duration_hours: booking.duration_hours,
            status: Some(booking.status.to_string()),
            cost: booking.cost,
        }
    }

    pub fn into_booking(self) -> Booking {
        let status = match self.status.as_deref() {
            Some("completed") => BookingStatus::Completed,
            _ => BookingStatus::InProgress,
        };
        Booking {
            id: self.id.unwrap_or(0),
            station: self.station,
            date: self.date,
            duration_hours: self.duration_hours,
            status,
            cost: self.cost,
        }
    }
}

// ============================================================================
// User payloads
// ============================================================================

#[derive(Debug, Serialize, Deserialize)]
pub struct ProfilePayload {
    pub id: u32,
    pub name: String,
    pub email: String,
    pub phone: String,
    pub balance: f64,
    #[serde(rename = "registeredDate")]
    pub registered_date: NaiveDate,
}

impl ProfilePayload {
    pub fn from_profile(profile: &UserProfile) -> Self {
        ProfilePayload {
            id: profile.id,
            name: profile.name.clone(),
            email: profile.email.clone(),
            phone: profile.phone.clone(),
            balance: profile.balance,
            registered_date: profile.registered_date,
        }
    }

    pub fn into_profile(self) -> UserProfile {
        UserProfile {
            id: self.id,
            name: self.name,
            email: self.email,
            phone: self.phone,
            balance: self.balance,
            registered_date: self.registered_date,
        }
    }
}

#[derive(Debug, Serialize)]
struct RechargeRequest {
    amount: f64,
}

/// Auth endpoints answer with an envelope rather than a bare payload.
#[derive(Debug, Deserialize)]
pub struct AuthResponse {
    pub success: bool,
    #[serde(default)]
    pub user: Option<ProfilePayload>,
    #[serde(default)]
    pub message: Option<String>,
}

// ============================================================================
// HTTP plumbing
// ============================================================================

/// Builds the blocking HTTP client shared by all calls.
pub fn build_client() -> Result<reqwest::blocking::Client, ApiError> {
    reqwest::blocking::Client::builder()
        .build()
        .map_err(|e| ApiError::Transport(e.to_string()))
}

fn send_checked(
    request: reqwest::blocking::RequestBuilder,
    config: &ApiConfig,
) -> Result<reqwest::blocking::Response, ApiError> {
    let response = request
        .timeout(config.timeout())
        .send()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status().as_u16()));
    }
    Ok(response)
}

fn read_json<T: DeserializeOwned>(response: reqwest::blocking::Response) -> Result<T, ApiError> {
    let text = response
        .text()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    serde_json::from_str(&text).map_err(|e| ApiError::Parse(e.to_string()))
}

// ============================================================================
// Station calls
// ============================================================================

/// Fetches the full station list (GET /api/stations), normalized.
pub fn fetch_stations(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> Result<Vec<Station>, ApiError> {
    let response = send_checked(client.get(config.url(endpoints::STATIONS_LIST)), config)?;
    let payloads: Vec<StationPayload> = read_json(response)?;
    Ok(payloads.into_iter().map(StationPayload::into_station).collect())
}

/// Fetches one station (GET /api/stations/{id}), or `None` when the
/// backend reports 404 for the id.
pub fn fetch_station(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    id: u32,
) -> Result<Option<Station>, ApiError> {
    let response = client
        .get(config.url(&endpoints::station_detail(id)))
        .timeout(config.timeout())
        .send()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if response.status().as_u16() == 404 {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status().as_u16()));
    }
    let payload: StationPayload = read_json(response)?;
    Ok(Some(payload.into_station()))
}

/// Fetches stations within `radius_m` of the origin (GET
/// /api/stations/nearby). Filtering happens server-side; distances are
/// annotated by the caller.
pub fn fetch_nearby(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    latitude: f64,
    longitude: f64,
    radius_m: f64,
) -> Result<Vec<Station>, ApiError> {
    let request = client.get(config.url(endpoints::STATIONS_NEARBY)).query(&[
        ("latitude", latitude),
        ("longitude", longitude),
        ("radius", radius_m),
    ]);
    let response = send_checked(request, config)?;
    let payloads: Vec<StationPayload> = read_json(response)?;
    Ok(payloads.into_iter().map(StationPayload::into_station).collect())
}

/// Keyword search against the display name (GET /api/stations/search).
pub fn search_stations(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    keyword: Option<&str>,
) -> Result<Vec<Station>, ApiError> {
    let mut request = client.get(config.url(endpoints::STATIONS_SEARCH));
    if let Some(keyword) = keyword {
        request = request.query(&[("keyword", keyword)]);
    }
    let response = send_checked(request, config)?;
    let payloads: Vec<StationPayload> = read_json(response)?;
    Ok(payloads.into_iter().map(StationPayload::into_station).collect())
}

// ============================================================================
// Booking calls
// ============================================================================

/// Creates a reservation (POST /api/bookings); returns the stored record
/// with its server-assigned id.
pub fn create_booking(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    booking: &Booking,
) -> Result<Booking, ApiError> {
    let body = BookingPayload::from_booking(booking);
    let request = client.post(config.url(endpoints::BOOKINGS)).json(&body);
    let response = send_checked(request, config)?;
    let payload: BookingPayload = read_json(response)?;
    Ok(payload.into_booking())
}

/// Lists all reservations for the current user (GET /api/bookings).
pub fn list_bookings(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> Result<Vec<Booking>, ApiError> {
    let response = send_checked(client.get(config.url(endpoints::BOOKINGS)), config)?;
    let payloads: Vec<BookingPayload> = read_json(response)?;
    Ok(payloads.into_iter().map(BookingPayload::into_booking).collect())
}

/// Fetches one reservation (GET /api/bookings/{id}), `None` on 404.
pub fn fetch_booking(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    id: u32,
) -> Result<Option<Booking>, ApiError> {
    let response = client
        .get(config.url(&endpoints::booking_detail(id)))
        .timeout(config.timeout())
        .send()
        .map_err(|e| ApiError::Transport(e.to_string()))?;
    if response.status().as_u16() == 404 {
        return Ok(None);
    }
    if !response.status().is_success() {
        return Err(ApiError::HttpStatus(response.status().as_u16()));
    }
    let payload: BookingPayload = read_json(response)?;
    Ok(Some(payload.into_booking()))
}

/// Replaces a reservation (PUT /api/bookings/{id}).
pub fn update_booking(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    id: u32,
    booking: &Booking,
) -> Result<Booking, ApiError> {
    let body = BookingPayload::from_booking(booking);
    let request = client
        .put(config.url(&endpoints::booking_detail(id)))
        .json(&body);
    let response = send_checked(request, config)?;
    let payload: BookingPayload = read_json(response)?;
    Ok(payload.into_booking())
}

/// POST /api/bookings/{id}/cancel.
pub fn cancel_booking(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    id: u32,
) -> Result<(), ApiError> {
    send_checked(client.post(config.url(&endpoints::booking_cancel(id))), config)?;
    Ok(())
}

// ============================================================================
// User calls
// ============================================================================

/// GET /api/users/profile.
pub fn fetch_profile(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
) -> Result<UserProfile, ApiError> {
    let response = send_checked(client.get(config.url(endpoints::USER_PROFILE)), config)?;
    let payload: ProfilePayload = read_json(response)?;
    Ok(payload.into_profile())
}

/// Stores the edited profile (PUT /api/users/profile); returns the new
/// state of record.
pub fn update_profile(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    profile: &UserProfile,
) -> Result<UserProfile, ApiError> {
    let body = ProfilePayload::from_profile(profile);
    let request = client.put(config.url(endpoints::USER_PROFILE)).json(&body);
    let response = send_checked(request, config)?;
    let payload: ProfilePayload = read_json(response)?;
    Ok(payload.into_profile())
}

/// Credits the wallet (POST /api/users/recharge); returns the updated
/// profile.
pub fn recharge(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    amount: f64,
) -> Result<UserProfile, ApiError> {
    let request = client
        .post(config.url(endpoints::USER_RECHARGE))
        .json(&RechargeRequest { amount });
    let response = send_checked(request, config)?;
    let payload: ProfilePayload = read_json(response)?;
    Ok(payload.into_profile())
}

// ============================================================================
// Auth calls
// ============================================================================

/// Form-encoded identifier/password exchange (POST /api/auth/login).
/// A `success: false` envelope becomes `ApiError::Rejected`.
pub fn login(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    identifier: &str,
    password: &str,
) -> Result<UserProfile, ApiError> {
    let request = client
        .post(config.url(endpoints::AUTH_LOGIN))
        .form(&[("identifier", identifier), ("password", password)]);
    let response = send_checked(request, config)?;
    let auth: AuthResponse = read_json(response)?;
    if !auth.success {
        return Err(ApiError::Rejected(
            auth.message.unwrap_or_else(|| "login failed".to_string()),
        ));
    }
    match auth.user {
        Some(user) => Ok(user.into_profile()),
        None => Err(ApiError::Parse(
            "login response missing user payload".to_string(),
        )),
    }
}

/// Form-encoded registration (POST /api/auth/register).
pub fn register(
    client: &reqwest::blocking::Client,
    config: &ApiConfig,
    name: &str,
    email: &str,
    phone: &str,
    password: &str,
) -> Result<(), ApiError> {
    let request = client.post(config.url(endpoints::AUTH_REGISTER)).form(&[
        ("name", name),
        ("email", email),
        ("phone", phone),
        ("password", password),
    ]);
    let response = send_checked(request, config)?;
    let auth: AuthResponse = read_json(response)?;
    if !auth.success {
        return Err(ApiError::Rejected(
            auth.message
                .unwrap_or_else(|| "registration failed".to_string()),
        ));
    }
    Ok(())
}

// ============================================================================
// Tests
// ============================================================================
