//! Scoring endpoint selection
//!
//! The browser front end picked its endpoint from the page's host name:
//! loopback hosts talked to the development server directly, anything else
//! used the relative `/predict` path on its own origin. Here that rule is a
//! pure helper used to *produce* a base URL, which is then injected into
//! [`crate::PredictionClient`].

use crate::error::PredictionError;
use reqwest::Url;

/// Development server address used on loopback hosts
pub const DEV_BASE_URL: &str = "http://localhost:5000";

/// Path of the prediction route under the base URL
pub const PREDICT_PATH: &str = "predict";

/// True for host names that refer to the local machine
pub fn is_loopback_host(host: &str) -> bool {
    let host = host.trim().trim_start_matches('[').trim_end_matches(']');
    matches!(host.to_lowercase().as_str(), "localhost" | "127.0.0.1" | "::1")
}

/// Base URL for a deployment reached through `host`
///
/// Loopback hosts map to [`DEV_BASE_URL`]; other hosts keep the serving
/// origin so the request goes to `<origin>/predict`.
pub fn select_base_url(host: &str, origin: &str) -> String {
    if is_loopback_host(host) {
        DEV_BASE_URL.to_string()
    } else {
        origin.trim_end_matches('/').to_string()
    }
}

/// Full prediction URL under a base URL
///
/// A path on the base is kept: `http://h/api` becomes `http://h/api/predict`.
pub fn predict_url(base_url: &str) -> Result<Url, PredictionError> {
    let trimmed = base_url.trim();
    if trimmed.is_empty() {
        return Err(PredictionError::Configuration("endpoint base URL is empty".to_string()));
    }
    let with_slash = format!("{}/", trimmed.trim_end_matches('/'));
    let base = Url::parse(&with_slash)
        .map_err(|e| PredictionError::Configuration(format!("invalid endpoint '{}': {}", trimmed, e)))?;
    base.join(PREDICT_PATH)
        .map_err(|e| PredictionError::Configuration(format!("invalid endpoint '{}': {}", trimmed, e)))
}
