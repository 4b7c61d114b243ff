//! Error types for Trailbook
//!
//! This module defines all error types used throughout the application,
//! using `thiserror` for ergonomic error handling.

use thiserror::Error;

/// Main error type for Trailbook operations
///
/// This enum encompasses all possible errors that can occur during
/// record decoding, diary persistence, command parsing, and command
/// execution.
#[derive(Error, Debug)]
pub enum TrailbookError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// A persisted line that cannot be decoded into a trip or photo
    #[error("Malformed record: {0}")]
    MalformedRecord(String),

    /// Diary file or its directory could not be created or written
    #[error("Storage error: {0}")]
    Storage(String),

    /// A required command flag was not supplied
    #[error("Missing compulsory parameter: {0}")]
    MissingParameter(String),

    /// An index argument was not a positive integer
    #[error("Invalid number: {0}")]
    InvalidNumber(String),

    /// A timestamp argument did not match the expected YYYYMMDDHHMMSS form
    #[error("Invalid timestamp: {0} (expected YYYYMMDDHHMMSS)")]
    InvalidTimestamp(String),

    /// The command word is not part of the command set
    #[error("Unknown command: {0}\n\nType 'menu' to see available commands")]
    UnknownCommand(String),

    /// A command was issued in a session state where it is not legal
    #[error("{0}")]
    StateMismatch(String),

    /// A trip reference did not resolve to an existing trip
    #[error("Trip not found: {0}")]
    TripNotFound(String),

    /// A photo index did not resolve to an existing photo
    #[error("Photo not found: {0}")]
    PhotoNotFound(String),

    /// IO errors
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// YAML parsing errors
    #[error("YAML error: {0}")]
    Yaml(#[from] serde_yaml::Error),
}

/// Result type alias for Trailbook operations
///
/// This is a convenience alias that uses `anyhow::Error` as the error type,
/// allowing for rich error context and easy error propagation.
pub type Result<T> = anyhow::Result<T>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_malformed_record_display() {
        let error = TrailbookError::MalformedRecord("unknown marker 'X:'".to_string());
        assert_eq!(error.to_string(), "Malformed record: unknown marker 'X:'");
    }

    #[test]
    fn test_storage_error_display() {
        let error = TrailbookError::Storage("cannot create data directory".to_string());
        assert_eq!(
            error.to_string(),
            "Storage error: cannot create data directory"
        );
    }

    #[test]
    fn test_missing_parameter_display() {
        let error = TrailbookError::MissingParameter("n (trip name)".to_string());
        assert_eq!(
            error.to_string(),
            "Missing compulsory parameter: n (trip name)"
        );
    }

    #[test]
    fn test_invalid_number_display() {
        let error = TrailbookError::InvalidNumber("abc".to_string());
        assert_eq!(error.to_string(), "Invalid number: abc");
    }

    #[test]
    fn test_invalid_timestamp_display() {
        let error = TrailbookError::InvalidTimestamp("2024-04-01".to_string());
        assert!(error.to_string().contains("YYYYMMDDHHMMSS"));
    }

    #[test]
    fn test_unknown_command_display() {
        let error = TrailbookError::UnknownCommand("frobnicate".to_string());
        assert!(error.to_string().contains("frobnicate"));
        assert!(error.to_string().contains("menu"));
    }

    #[test]
    fn test_trip_not_found_display() {
        let error = TrailbookError::TripNotFound("7".to_string());
        assert_eq!(error.to_string(), "Trip not found: 7");
    }

    #[test]
    fn test_io_error_conversion() {
        let io_error = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let error: TrailbookError = io_error.into();
        assert!(matches!(error, TrailbookError::Io(_)));
    }

    #[test]
    fn test_yaml_error_conversion() {
        let yaml_str = "invalid: : yaml";
        let yaml_error = serde_yaml::from_str::<serde_yaml::Value>(yaml_str).unwrap_err();
        let error: TrailbookError = yaml_error.into();
        assert!(matches!(error, TrailbookError::Yaml(_)));
    }

    #[test]
    fn test_error_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<TrailbookError>();
    }
}
