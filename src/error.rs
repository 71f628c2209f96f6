//! Centralized error handling module
//!
//! Provides the unified error type for classification, catalogs, map state
//! and configuration, plus a serializable report for presentation layers.

use serde::Serialize;
use std::fmt;
use thiserror::Error;
use tracing::error;
use uuid::Uuid;

use crate::models::{MetricKind, SeverityBucket};

/// Library-wide error types
#[derive(Error, Debug)]
pub enum AdvisoryError {
    #[error("Unknown metric kind: {0}")]
    UnknownMetricKind(String),

    #[error("Non-finite {kind} value: {value}")]
    NonFiniteValue { kind: MetricKind, value: f64 },

    #[error("Non-finite {kind} change: {delta}")]
    NonFiniteDelta { kind: MetricKind, delta: f64 },

    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),

    #[error("Invalid map location: {0}")]
    InvalidLocation(String),

    #[error("Invalid hour {0}: must be between 0 and 23")]
    InvalidHour(u8),

    #[error("Clipboard write rejected: {0}")]
    ClipboardRejected(String),

    #[error("Catalog has no message for {kind}/{bucket}")]
    MissingMessage {
        kind: MetricKind,
        bucket: SeverityBucket,
    },

    #[error("Catalog attaches bucket {bucket} to {kind}, which does not use it")]
    UnexpectedBucket {
        kind: MetricKind,
        bucket: SeverityBucket,
    },

    #[error("Catalog parse error: {0}")]
    Catalog(#[from] serde_json::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ::config::ConfigError),
}

impl AdvisoryError {
    /// Stable classification code for this error
    pub fn error_type(&self) -> &'static str {
        match self {
            AdvisoryError::UnknownMetricKind(_) => "UNKNOWN_METRIC_KIND",
            AdvisoryError::NonFiniteValue { .. } => "NON_FINITE_VALUE",
            AdvisoryError::NonFiniteDelta { .. } => "NON_FINITE_DELTA",
            AdvisoryError::UnknownPollutant(_) => "UNKNOWN_POLLUTANT",
            AdvisoryError::InvalidLocation(_) => "INVALID_LOCATION",
            AdvisoryError::InvalidHour(_) => "INVALID_HOUR",
            AdvisoryError::ClipboardRejected(_) => "CLIPBOARD_REJECTED",
            AdvisoryError::MissingMessage { .. } => "MISSING_MESSAGE",
            AdvisoryError::UnexpectedBucket { .. } => "UNEXPECTED_BUCKET",
            AdvisoryError::Catalog(_) => "CATALOG_ERROR",
            AdvisoryError::Io(_) => "IO_ERROR",
            AdvisoryError::Config(_) => "CONFIG_ERROR",
        }
    }

    /// Whether the error was caused by caller input rather than the environment
    pub fn is_input_error(&self) -> bool {
        matches!(
            self,
            AdvisoryError::UnknownMetricKind(_)
                | AdvisoryError::NonFiniteValue { .. }
                | AdvisoryError::NonFiniteDelta { .. }
                | AdvisoryError::UnknownPollutant(_)
                | AdvisoryError::InvalidLocation(_)
                | AdvisoryError::InvalidHour(_)
        )
    }
}

/// Standardized error report handed to presentation layers
#[derive(Debug, Serialize)]
pub struct ErrorReport {
    /// Unique correlation ID for tracing
    pub correlation_id: String,
    /// Error type classification
    pub error_type: String,
    /// Human-readable error message
    pub message: String,
    /// Timestamp of the error
    pub timestamp: String,
}

impl ErrorReport {
    pub fn new(error_type: &str, message: &str) -> Self {
        Self {
            correlation_id: Uuid::new_v4().to_string(),
            error_type: error_type.to_string(),
            message: message.to_string(),
            timestamp: chrono::Utc::now().to_rfc3339(),
        }
    }
}

impl fmt::Display for ErrorReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.error_type, self.message)
    }
}

impl From<&AdvisoryError> for ErrorReport {
    fn from(err: &AdvisoryError) -> Self {
        let report = ErrorReport::new(err.error_type(), &err.to_string());

        if !err.is_input_error() {
            error!(
                correlation_id = %report.correlation_id,
                error_type = %report.error_type,
                "Advisory engine error"
            );
        }

        report
    }
}

/// Result type alias for library errors
pub type AdvisoryResult<T> = Result<T, AdvisoryError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_unknown_kind_error_type() {
        let error = AdvisoryError::UnknownMetricKind("not-a-metric".to_string());
        assert_eq!(error.error_type(), "UNKNOWN_METRIC_KIND");
        assert!(error.is_input_error());
        assert_eq!(error.to_string(), "Unknown metric kind: not-a-metric");
    }

    #[test]
    fn test_non_finite_delta_is_input_error() {
        let error = AdvisoryError::NonFiniteDelta {
            kind: MetricKind::WindSpeed,
            delta: f64::NAN,
        };
        assert_eq!(error.error_type(), "NON_FINITE_DELTA");
        assert!(error.is_input_error());
        assert_eq!(error.to_string(), "Non-finite wind change: NaN");
    }

    #[test]
    fn test_missing_message_display() {
        let error = AdvisoryError::MissingMessage {
            kind: MetricKind::Humidity,
            bucket: SeverityBucket::ModerateHigh,
        };
        assert_eq!(error.error_type(), "MISSING_MESSAGE");
        assert!(!error.is_input_error());
        assert_eq!(
            error.to_string(),
            "Catalog has no message for humidity/moderateHigh"
        );
    }

    #[test]
    fn test_error_report_format() {
        let error = AdvisoryError::InvalidHour(24);
        let report = ErrorReport::from(&error);

        assert!(!report.correlation_id.is_empty());
        assert_eq!(report.error_type, "INVALID_HOUR");
        assert_eq!(report.message, "Invalid hour 24: must be between 0 and 23");
        assert!(chrono::DateTime::parse_from_rfc3339(&report.timestamp).is_ok());
    }
}
