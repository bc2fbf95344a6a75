//! Error types for schoolcal.

use chrono::NaiveDate;
use thiserror::Error;

/// Errors that can occur in schoolcal operations.
#[derive(Error, Debug)]
pub enum CalendarError {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Invalid event: {0}")]
    Validation(String),

    #[error("Invalid date range: {start} is after {end}")]
    InvalidRange { start: NaiveDate, end: NaiveDate },

    #[error("Invalid date format '{0}'. Expected YYYY-MM-DD")]
    InvalidDate(String),

    #[error("Date {0} is outside the supported calendar")]
    OutOfRange(String),

    #[error("Event not found: {0}")]
    EventNotFound(String),

    #[error("Admin login required")]
    Unauthorized,

    #[error("Incorrect admin password")]
    InvalidCredentials,

    #[error("No admin password configured")]
    AdminNotConfigured,

    #[error("Import error: {0}")]
    Import(String),

    #[error("ICS generation error: {0}")]
    Export(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

/// Result type alias for schoolcal operations.
pub type CalendarResult<T> = Result<T, CalendarError>;
