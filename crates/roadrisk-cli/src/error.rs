//! Error types for the CLI application.

use roadrisk_client::{PredictionError, WorkflowError};
use roadrisk_domain::FormError;
use thiserror::Error;

/// Result type alias for CLI operations.
pub type Result<T> = std::result::Result<T, CliError>;

/// CLI-specific errors.
#[derive(Debug, Error)]
pub enum CliError {
    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// Submission failed; the message is the user-visible one
    #[error("{}", .0.user_message())]
    Submission(#[from] WorkflowError<PredictionError>),

    /// Prediction client error outside a submission
    #[error("{0}")]
    Prediction(#[from] PredictionError),

    /// Form edit rejected
    #[error("{0}")]
    Form(#[from] FormError),

    /// I/O error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    /// TOML parsing error
    #[error("TOML parsing error: {0}")]
    Toml(#[from] toml::de::Error),

    /// Invalid input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// Operation not permitted
    #[error("Operation not permitted: {0}")]
    NotPermitted(String),

    /// Logging could not be initialized
    #[error("Logging error: {0}")]
    Logging(String),
}
