/// Structured logging for the charging client.
///
/// Provides context-rich logging with subsystem and record identifiers,
/// timestamps, and severity levels. Supports both console output and
/// file-based logging. The degraded-mode policy depends on this module:
/// a remote failure is never surfaced to the caller of a read operation,
/// so the log line written here is the only trace the failure leaves.

use crate::model::ApiError;
use chrono::Utc;
use std::fmt;
use std::fs::OpenOptions;
use std::io::Write;
use std::sync::Mutex;

// ---------------------------------------------------------------------------
// Log Levels
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum LogLevel {
    Debug,
    Info,
    Warning,
    Error,
}

impl fmt::Display for LogLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LogLevel::Debug => write!(f, "DEBUG"),
            LogLevel::Info => write!(f, "INFO"),
            LogLevel::Warning => write!(f, "WARN"),
            LogLevel::Error => write!(f, "ERROR"),
        }
    }
}

// ---------------------------------------------------------------------------
// Subsystem Tags
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DataSource {
    Stations,
    Bookings,
    Users,
    Auth,
    Geo,
    System,
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Stations => write!(f, "STATIONS"),
            DataSource::Bookings => write!(f, "BOOKINGS"),
            DataSource::Users => write!(f, "USERS"),
            DataSource::Auth => write!(f, "AUTH"),
            DataSource::Geo => write!(f, "GEO"),
            DataSource::System => write!(f, "SYS"),
        }
    }
}

// ---------------------------------------------------------------------------
// Failure Classification
// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FailureType {
    /// Expected failure - the backend answered and declined deliberately
    Expected,
    /// Unexpected failure - indicates backend degradation or an API change
    Unexpected,
    /// Unknown - cannot determine whether the backend is down on purpose
    Unknown,
}

impl fmt::Display for FailureType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureType::Expected => write!(f, "EXPECTED"),
            FailureType::Unexpected => write!(f, "UNEXPECTED"),
            FailureType::Unknown => write!(f, "UNKNOWN"),
        }
    }
}

/// Classify a remote-call failure before logging it.
///
/// An HTTP status or a parse failure means the backend is reachable but
/// misbehaving (or its contract changed) — that deserves attention. A
/// transport failure may just be the backend being offline, which the
/// mock fallback exists to absorb.
pub fn classify_remote_failure(err: &ApiError) -> FailureType {
    match err {
        ApiError::HttpStatus(_) => FailureType::Unexpected,
        ApiError::Parse(_) => FailureType::Unexpected,
        ApiError::Transport(_) => FailureType::Unknown,
        ApiError::Rejected(_) => FailureType::Expected,
    }
}

// ---------------------------------------------------------------------------
// Logger Configuration
// ---------------------------------------------------------------------------

/// Global logger instance
static LOGGER: Mutex<Option<Logger>> = Mutex::new(None);

pub struct Logger {
    /// Minimum log level to display
    min_level: LogLevel,
    /// Optional file path for logging
    log_file: Option<String>,
    /// Whether to include timestamps in console output
    console_timestamps: bool,
}

impl Logger {
    /// Initialize the global logger
    pub fn init(min_level: LogLevel, log_file: Option<String>, console_timestamps: bool) {
        let logger = Logger {
            min_level,
            log_file,
            console_timestamps,
        };

        *LOGGER.lock().unwrap() = Some(logger);
    }

    fn log(&self, level: LogLevel, source: &DataSource, record_id: Option<&str>, message: &str) {
        if level < self.min_level {
            return;
        }

        let timestamp = Utc::now().format("%Y-%m-%d %H:%M:%S UTC");

        let record_part = record_id.map(|s| format!(" [{}]", s)).unwrap_or_default();
        let log_entry = format!(
            "{} {} {}{}: {}",
            timestamp, level, source, record_part, message
        );

        // Console output
        if self.console_timestamps {
            match level {
                LogLevel::Error => eprintln!("{}", log_entry),
                LogLevel::Warning => eprintln!("   {}", log_entry),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => println!("   [DEBUG] {}", message),
            }
        } else {
            match level {
                LogLevel::Error => eprintln!("   ✗ {}{}: {}", source, record_part, message),
                LogLevel::Warning => eprintln!("   ⚠ {}{}: {}", source, record_part, message),
                LogLevel::Info => println!("   {}", message),
                LogLevel::Debug => {} // Skip debug in non-timestamp mode
            }
        }

        // File output
        if let Some(ref path) = self.log_file {
            if let Err(e) = Self::append_to_file(path, &log_entry) {
                eprintln!("Failed to write to log file {}: {}", path, e);
            }
        }
    }

    fn append_to_file(path: &str, entry: &str) -> std::io::Result<()> {
        let mut file = OpenOptions::new().create(true).append(true).open(path)?;
        writeln!(file, "{}", entry)?;
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Public Logging Functions
// ---------------------------------------------------------------------------

/// Initialize the global logger
pub fn init_logger(min_level: LogLevel, log_file: Option<&str>, console_timestamps: bool) {
    Logger::init(min_level, log_file.map(String::from), console_timestamps);
}

/// Log a general informational message
pub fn info(source: DataSource, record_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Info, &source, record_id, message);
    }
}

/// Log a warning message
pub fn warn(source: DataSource, record_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Warning, &source, record_id, message);
    }
}

/// Log an error message
pub fn error(source: DataSource, record_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Error, &source, record_id, message);
    }
}

/// Log a debug message
pub fn debug(source: DataSource, record_id: Option<&str>, message: &str) {
    if let Some(logger) = LOGGER.lock().unwrap().as_ref() {
        logger.log(LogLevel::Debug, &source, record_id, message);
    }
}

// ---------------------------------------------------------------------------
// Structured Failure Logging
// ---------------------------------------------------------------------------

/// Log a remote-call failure with automatic classification.
///
/// Called from every degraded-mode path before the operation completes
/// with local data.
pub fn log_remote_failure(source: DataSource, operation: &str, err: &ApiError) {
    let failure_type = classify_remote_failure(err);

    let message = format!(
        "{} failed [{}], degrading to local dataset: {}",
        operation, failure_type, err
    );

    match failure_type {
        FailureType::Expected => debug(source, None, &message),
        FailureType::Unexpected => error(source, None, &message),
        FailureType::Unknown => warn(source, None, &message),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_log_level_ordering() {
        assert!(LogLevel::Debug < LogLevel::Info);
        assert!(LogLevel::Info < LogLevel::Warning);
        assert!(LogLevel::Warning < LogLevel::Error);
    }

    #[test]
    fn test_failure_classification() {
        let refused = ApiError::Transport("connection refused".to_string());
        assert_eq!(classify_remote_failure(&refused), FailureType::Unknown);

        let server_error = ApiError::HttpStatus(500);
        assert_eq!(classify_remote_failure(&server_error), FailureType::Unexpected);

        let bad_body = ApiError::Parse("expected value at line 1".to_string());
        assert_eq!(classify_remote_failure(&bad_body), FailureType::Unexpected);

        let declined = ApiError::Rejected("insufficient balance".to_string());
        assert_eq!(classify_remote_failure(&declined), FailureType::Expected);
    }
}
