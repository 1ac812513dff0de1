/// Session context: the logged-in user and their booking ledger.
///
/// Replaces the original client's browser-storage globals with one explicit
/// object. Lifecycle: created empty, populated at login, cleared at logout;
/// the profile and booking consumers read from it. Profile persistence
/// between sessions is the backend's job — this module only holds the
/// active session's state of record.

use crate::api;
use crate::booking::BookingLedger;
use crate::config::ApiConfig;
use crate::logging::{self, DataSource};
use crate::model::{ApiError, UserProfile, ValidationError};
use chrono::NaiveDate;

// ---------------------------------------------------------------------------
// Demo accounts
// ---------------------------------------------------------------------------

/// Built-in demo accounts, checked before the remote auth endpoint so the
/// demo flow works with no backend at all.
struct DemoAccount {
    id: u32,
    name: &'static str,
    email: &'static str,
    phone: &'static str,
    password: &'static str,
    balance: f64,
    registered: (i32, u32, u32),
}

static DEMO_ACCOUNTS: &[DemoAccount] = &[
    DemoAccount {
        id: 1,
        name: "John Doe",
        email: "john@example.com",
        phone: "13800138001",
        password: "123456",
        balance: 100.00,
        registered: (2025, 1, 1),
    },
    DemoAccount {
        id: 2,
        name: "Jane Smith",
        email: "jane@example.com",
        phone: "13800138002",
        password: "123456",
        balance: 150.00,
        registered: (2025, 1, 2),
    },
    DemoAccount {
        id: 3,
        name: "Bob Johnson",
        email: "bob@example.com",
        phone: "13800138003",
        password: "123456",
        balance: 75.00,
        registered: (2025, 1, 3),
    },
];

impl DemoAccount {
    fn profile(&self) -> UserProfile {
        let (y, m, d) = self.registered;
        UserProfile {
            id: self.id,
            name: self.name.to_string(),
            email: self.email.to_string(),
            phone: self.phone.to_string(),
            balance: self.balance,
            registered_date: NaiveDate::from_ymd_opt(y, m, d).unwrap_or_default(),
        }
    }
}

/// Matches identifier (email OR phone OR numeric id) and password against
/// the demo table.
fn find_demo_account(identifier: &str, password: &str) -> Option<UserProfile> {
    DEMO_ACCOUNTS
        .iter()
        .find(|a| {
            (a.email == identifier || a.phone == identifier || a.id.to_string() == identifier)
                && a.password == password
        })
        .map(DemoAccount::profile)
}

// ---------------------------------------------------------------------------
// Session context
// ---------------------------------------------------------------------------

#[derive(Debug, Default)]
pub struct SessionContext {
    user: Option<UserProfile>,
    ledger: BookingLedger,
}

impl SessionContext {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn is_logged_in(&self) -> bool {
        self.user.is_some()
    }

    pub fn current_user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn ledger(&self) -> &BookingLedger {
        &self.ledger
    }

    pub fn ledger_mut(&mut self) -> &mut BookingLedger {
        &mut self.ledger
    }

    /// Logs in: demo accounts are tried first so the demo flow needs no
    /// backend; on a miss the remote auth endpoint decides. Unlike the
    /// station reads, auth has no silent fallback — remote rejections and
    /// transport failures are surfaced, and the session stays logged out.
    pub fn login(
        &mut self,
        client: &reqwest::blocking::Client,
        config: &ApiConfig,
        identifier: &str,
        password: &str,
    ) -> Result<UserProfile, ApiError> {
        if let Some(profile) = find_demo_account(identifier, password) {
            logging::info(DataSource::Auth, Some(identifier), "demo account login");
            self.user = Some(profile.clone());
            return Ok(profile);
        }

        match api::login(client, config, identifier, password) {
            Ok(profile) => {
                logging::info(DataSource::Auth, Some(identifier), "backend login");
                self.user = Some(profile.clone());
                Ok(profile)
            }
            Err(err) => {
                logging::warn(
                    DataSource::Auth,
                    Some(identifier),
                    &format!("login failed: {}", err),
                );
                Err(err)
            }
        }
    }

    /// Clears the session: user and ledger both go.
    pub fn logout(&mut self) {
        if let Some(user) = &self.user {
            logging::info(DataSource::Auth, Some(&user.id.to_string()), "logged out");
        }
        self.user = None;
        self.ledger = BookingLedger::new();
    }

    /// Credits the wallet. The amount must be positive and finite;
    /// otherwise the call is a rejected no-op and the balance is untouched.
    /// Returns the new balance.
    pub fn recharge(&mut self, amount: f64) -> Result<f64, ValidationError> {
        let user = self.user.as_mut().ok_or(ValidationError::NotLoggedIn)?;
        if !amount.is_finite() || amount <= 0.0 {
            return Err(ValidationError::NonPositiveAmount);
        }
        user.balance += amount;
        logging::info(
            DataSource::Users,
            Some(&user.id.to_string()),
            &format!("recharged {:.2}, balance now {:.2}", amount, user.balance),
        );
        Ok(user.balance)
    }

    /// Applies a profile edit. Name and email are required; the email must
    /// look like an email address. A rejected edit leaves the profile
    /// unchanged. Pushing the new state of record to the backend is the
    /// caller's follow-up (`api::update_profile`).
    pub fn update_profile(
        &mut self,
        name: &str,
        email: &str,
        phone: &str,
    ) -> Result<(), ValidationError> {
        let user = self.user.as_mut().ok_or(ValidationError::NotLoggedIn)?;
        if name.trim().is_empty() {
            return Err(ValidationError::MissingField("name"));
        }
        if email.trim().is_empty() {
            return Err(ValidationError::MissingField("email"));
        }
        if !looks_like_email(email) {
            return Err(ValidationError::InvalidEmail);
        }
        user.name = name.to_string();
        user.email = email.to_string();
        user.phone = phone.to_string();
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Registration validation
// ---------------------------------------------------------------------------

fn looks_like_email(email: &str) -> bool {
    email.contains('@') && email.contains('.')
}

/// Pre-flight validation for the register form, applied before
/// `api::register` is called. Phone is optional.
pub fn validate_registration(
    name: &str,
    email: &str,
    password: &str,
    confirm_password: &str,
) -> Result<(), ValidationError> {
    if name.trim().is_empty() {
        return Err(ValidationError::MissingField("name"));
    }
    if email.trim().is_empty() {
        return Err(ValidationError::MissingField("email"));
    }
    if !looks_like_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if password.is_empty() {
        return Err(ValidationError::MissingField("password"));
    }
    if password != confirm_password {
        return Err(ValidationError::PasswordMismatch);
    }
    if password.len() < 6 {
        return Err(ValidationError::PasswordTooShort);
    }
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
