//! Error types for staystat
//!
//! This module defines the error types used throughout the staystat library.
//! All errors are derived from `thiserror` for convenient error handling
//! and automatic `From` implementations.
//!
//! # Example
//!
//! ```
//! use staystat_core::error::{StaystatError, Result};
//!
//! fn example_function() -> Result<()> {
//!     // This will automatically convert io::Error to StaystatError
//!     let _file = std::fs::read_to_string("nonexistent.txt")?;
//!     Ok(())
//! }
//! ```

use thiserror::Error;

/// Main error type for staystat operations
///
/// Covers everything from transport failures against the booking API to
/// malformed payloads and bad command-line input.
#[derive(Error, Debug)]
pub enum StaystatError {
    /// IO error occurred
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON parsing error
    #[error("JSON parsing error: {0}")]
    Json(#[from] serde_json::Error),

    /// Network error
    #[error("Network error: {0}")]
    Network(#[from] reqwest::Error),

    /// The API answered with a non-success status
    #[error("Request to {endpoint} failed with HTTP status {status}")]
    HttpStatus {
        /// Endpoint path that was requested
        endpoint: String,
        /// HTTP status code returned
        status: u16,
    },

    /// Response envelope has no `data` array
    #[error("Invalid data format: response from {endpoint} has no `data` field")]
    MissingData {
        /// Endpoint path that was requested
        endpoint: String,
    },

    /// A booking record failed boundary validation
    #[error("Invalid booking record{}: {reason}", .id.as_deref().map(|i| format!(" {i}")).unwrap_or_default())]
    InvalidRecord {
        /// Record identifier, when the payload carried one
        id: Option<String>,
        /// What was wrong with it
        reason: String,
    },

    /// Invalid month label or filter
    #[error("Invalid month: {0}")]
    InvalidMonth(String),

    /// Invalid timezone
    #[error("Invalid timezone: {0}")]
    InvalidTimezone(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Invalid argument
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),
}

impl StaystatError {
    /// Shorthand for a record rejection
    pub fn invalid_record(id: Option<&str>, reason: impl Into<String>) -> Self {
        Self::InvalidRecord {
            id: id.map(str::to_string),
            reason: reason.into(),
        }
    }
}

/// Convenience type alias for Results in staystat
///
/// # Example
///
/// ```
/// use staystat_core::Result;
///
/// fn process_data() -> Result<String> {
///     Ok("Processed successfully".to_string())
/// }
/// ```
pub type Result<T> = std::result::Result<T, StaystatError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let error = StaystatError::MissingData {
            endpoint: "/booking".to_string(),
        };
        assert_eq!(
            error.to_string(),
            "Invalid data format: response from /booking has no `data` field"
        );
    }

    #[test]
    fn test_invalid_record_display() {
        let with_id = StaystatError::invalid_record(Some("b-1"), "no usable date");
        assert_eq!(with_id.to_string(), "Invalid booking record b-1: no usable date");

        let without_id = StaystatError::invalid_record(None, "no usable date");
        assert_eq!(without_id.to_string(), "Invalid booking record: no usable date");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let staystat_error: StaystatError = io_error.into();
        assert!(matches!(staystat_error, StaystatError::Io(_)));
    }

    #[test]
    fn test_http_status_display() {
        let error = StaystatError::HttpStatus {
            endpoint: "/tours".to_string(),
            status: 401,
        };
        assert!(error.to_string().contains("401"));
        assert!(error.to_string().contains("/tours"));
    }
}
