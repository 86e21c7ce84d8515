//! Error types for the prediction client.

use std::time::Duration;
use thiserror::Error;

/// Message shown when the service cannot be reached
pub const CONNECTIVITY_MESSAGE: &str = "Network error: Unable to connect to server";

/// Message shown when the response carries no usable probability
pub const MALFORMED_MESSAGE: &str = "Invalid response format from server";

/// Prediction failures
///
/// `Display` is the user-visible message for each failure.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum PredictionError {
    /// The request could not reach the service
    #[error("{} ({})", CONNECTIVITY_MESSAGE, .0)]
    Connectivity(String),

    /// No response within the configured bound
    #[error("Request timed out after {}s", .0.as_secs_f64())]
    Timeout(Duration),

    /// The service answered with an error status
    #[error("{message}")]
    Service {
        /// HTTP status code
        status: u16,
        /// Server-supplied message, or a generic one naming the status
        message: String,
    },

    /// A response arrived but held no usable probability
    #[error("{}: {}", MALFORMED_MESSAGE, .0)]
    MalformedResponse(String),

    /// The endpoint URL or HTTP client could not be built
    #[error("Configuration error: {0}")]
    Configuration(String),
}

impl PredictionError {
    /// Build a service failure, falling back to a generic message
    pub fn service(status: u16, message: Option<String>) -> Self {
        let message = message
            .filter(|m| !m.trim().is_empty())
            .unwrap_or_else(|| format!("Server error: {}", status));
        PredictionError::Service { status, message }
    }

    /// Short name of the failure kind, used in logs and JSON output
    pub fn kind(&self) -> &'static str {
        match self {
            PredictionError::Connectivity(_) => "connectivity",
            PredictionError::Timeout(_) => "timeout",
            PredictionError::Service { .. } => "service",
            PredictionError::MalformedResponse(_) => "malformed_response",
            PredictionError::Configuration(_) => "configuration",
        }
    }

    /// Classify a transport error raised while sending or reading
    pub(crate) fn from_transport(e: reqwest::Error, timeout: Duration) -> Self {
        if e.is_timeout() {
            PredictionError::Timeout(timeout)
        } else if e.is_decode() || e.is_body() {
            PredictionError::MalformedResponse(e.to_string())
        } else if e.is_builder() {
            PredictionError::Configuration(e.to_string())
        } else {
            PredictionError::Connectivity(e.to_string())
        }
    }
}
