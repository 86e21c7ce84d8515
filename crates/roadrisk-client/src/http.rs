//! HTTP Prediction Client
//!
//! Sends one normalized request to `<base>/predict` and interprets the
//! answer.
//!
//! # Features
//!
//! - Endpoint injected at construction, no ambient host detection
//! - Per-request timeout (15 seconds by default)
//! - Failure taxonomy: connectivity, timeout, service, malformed response
//! - Single attempt per call; resubmission is up to the caller
//!
//! # Examples
//!
//! ```no_run
//! use roadrisk_client::PredictionClient;
//! use std::time::Duration;
//!
//! let client = PredictionClient::new("http://localhost:5000")
//!     .unwrap()
//!     .with_timeout(Duration::from_secs(5));
//! assert_eq!(client.predict_url().as_str(), "http://localhost:5000/predict");
//! ```

use crate::endpoint::predict_url;
use crate::error::PredictionError;
use crate::wire::{decode_error_message, decode_success, BooleanEncoding, WireRequest};
use reqwest::Url;
use roadrisk_domain::{PredictionRequest, PredictionResult, RiskScorer};
use std::time::Duration;
use tracing::{debug, info, warn};

/// Default timeout for prediction requests (15 seconds)
pub const DEFAULT_TIMEOUT_SECS: u64 = 15;

/// Client for a remote scoring service
#[derive(Debug, Clone)]
pub struct PredictionClient {
    predict_url: Url,
    client: reqwest::Client,
    timeout: Duration,
    boolean_encoding: BooleanEncoding,
}

impl PredictionClient {
    /// Create a client for the service rooted at `base_url`
    ///
    /// # Errors
    ///
    /// Returns [`PredictionError::Configuration`] if the URL is empty or
    /// unparsable, or the HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, PredictionError> {
        let predict_url = predict_url(base_url)?;
        let client = reqwest::Client::builder()
            .build()
            .map_err(|e| PredictionError::Configuration(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            predict_url,
            client,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            boolean_encoding: BooleanEncoding::default(),
        })
    }

    /// Set the request timeout
    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    /// Set how boolean fields are written on the wire
    pub fn with_boolean_encoding(mut self, encoding: BooleanEncoding) -> Self {
        self.boolean_encoding = encoding;
        self
    }

    /// The resolved `/predict` URL
    pub fn predict_url(&self) -> &Url {
        &self.predict_url
    }

    /// The configured timeout
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Submit one request
    ///
    /// # Errors
    ///
    /// - [`PredictionError::Connectivity`] if no response was received
    /// - [`PredictionError::Timeout`] if the timeout elapsed first
    /// - [`PredictionError::Service`] for an error status
    /// - [`PredictionError::MalformedResponse`] if the body has no usable `accident_risk`
    pub async fn submit(&self, request: &PredictionRequest) -> Result<PredictionResult, PredictionError> {
        let body = WireRequest::encode(request, self.boolean_encoding);
        debug!(url = %self.predict_url, timeout = ?self.timeout, "Sending prediction request");

        let outcome = self.send(&body).await;
        match &outcome {
            Ok(result) => info!(
                accident_risk = result.accident_risk(),
                tier = result.tier().as_str(),
                "Prediction received"
            ),
            Err(e) => warn!(kind = e.kind(), "Prediction failed: {}", e),
        }
        outcome
    }

    async fn send(&self, body: &WireRequest) -> Result<PredictionResult, PredictionError> {
        let response = self
            .client
            .post(self.predict_url.clone())
            .timeout(self.timeout)
            .json(body)
            .send()
            .await
            .map_err(|e| PredictionError::from_transport(e, self.timeout))?;

        let status = response.status();
        let bytes = response
            .bytes()
            .await
            .map_err(|e| PredictionError::from_transport(e, self.timeout))?;

        if status.is_success() {
            decode_success(&bytes)
        } else {
            Err(PredictionError::service(status.as_u16(), decode_error_message(&bytes)))
        }
    }
}

impl RiskScorer for PredictionClient {
    type Error = PredictionError;

    async fn score(&self, request: &PredictionRequest) -> Result<PredictionResult, Self::Error> {
        self.submit(request).await
    }
}
