//! Client core for an EV charging station finder.
//!
//! Locates charging stations, books charging sessions, and manages a user
//! profile/wallet against a REST backend, degrading to a built-in station
//! dataset whenever the backend cannot answer. The rendering layer and the
//! backend itself live elsewhere; this crate is the state and data-source
//! logic between them.
//!
//! Module map:
//! - [`model`]: shared domain types and error enums
//! - [`config`]: configuration file/env loading and endpoint paths
//! - [`stations`]: the built-in station dataset
//! - [`geo`]: haversine distance and radius filtering
//! - [`api`]: wire payloads and blocking REST calls
//! - [`source`]: the four station read operations with the degraded-mode
//!   policy
//! - [`booking`]: the session-local booking ledger and cost rules
//! - [`session`]: login/logout, wallet, and profile editing
//! - [`geolocate`]: the positioning capability seam
//! - [`diag`]: integration diagnostics
//! - [`logging`]: structured logging with failure classification

pub mod api;
pub mod booking;
pub mod config;
pub mod diag;
pub mod geo;
pub mod geolocate;
pub mod logging;
pub mod model;
pub mod session;
pub mod source;
pub mod stations;
