//! Roadrisk Client Layer
//!
//! Scoring-service implementations of the `RiskScorer` trait from
//! `roadrisk-domain`, plus the submission workflow that drives them.
//!
//! # Scorers
//!
//! - `PredictionClient`: HTTP client for a remote `/predict` route
//! - `MockScorer`: deterministic scorer for testing, no network calls
//!
//! # Examples
//!
//! ```
//! use roadrisk_client::{MockScorer, RiskWorkflow};
//! use roadrisk_domain::RiskTier;
//!
//! # #[tokio::main]
//! # async fn main() {
//! let mut workflow = RiskWorkflow::new(MockScorer::new(0.82));
//! for (field, value) in [
//!     ("road_type", "rural"), ("num_lanes", "2"), ("curvature", "0.5"),
//!     ("speed_limit", "60"), ("lighting", "night"), ("weather", "foggy"),
//!     ("road_signs_present", "false"), ("public_road", "true"),
//!     ("time_of_day", "evening"), ("holiday", "false"),
//!     ("school_season", "false"), ("num_reported_accidents", "1"),
//! ] {
//!     workflow.set_named(field, value).unwrap();
//! }
//!
//! let assessment = workflow.submit().await.unwrap();
//! assert_eq!(assessment.tier, RiskTier::High);
//! # }
//! ```

#![warn(missing_docs)]

pub mod endpoint;
pub mod http;
pub mod wire;
pub mod workflow;

mod error;

use roadrisk_domain::{PredictionRequest, PredictionResult, RiskScorer};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex, PoisonError};

pub use error::{PredictionError, CONNECTIVITY_MESSAGE, MALFORMED_MESSAGE};
pub use http::PredictionClient;
pub use wire::BooleanEncoding;
pub use workflow::{RiskWorkflow, SubmissionState, WorkflowError};

/// Mock scorer for deterministic testing
///
/// Returns a pre-configured outcome without making any network calls and
/// records every request it receives.
///
/// # Examples
///
/// ```
/// use roadrisk_client::{MockScorer, PredictionError};
///
/// let scorer = MockScorer::new(0.4);
/// assert_eq!(scorer.call_count(), 0);
///
/// let failing = MockScorer::failing(PredictionError::service(500, None));
/// assert_eq!(failing.call_count(), 0);
/// ```
#[derive(Debug, Clone)]
pub struct MockScorer {
    outcome: Result<f64, PredictionError>,
    call_count: Arc<AtomicUsize>,
    requests: Arc<Mutex<Vec<PredictionRequest>>>,
}

impl MockScorer {
    /// Create a scorer that always answers with `probability`
    ///
    /// A probability outside [0, 1] is reported as a malformed response,
    /// like a real service returning an unusable body.
    pub fn new(probability: f64) -> Self {
        Self::with_outcome(Ok(probability))
    }

    /// Create a scorer that always fails with `error`
    pub fn failing(error: PredictionError) -> Self {
        Self::with_outcome(Err(error))
    }

    fn with_outcome(outcome: Result<f64, PredictionError>) -> Self {
        Self {
            outcome,
            call_count: Arc::new(AtomicUsize::new(0)),
            requests: Arc::new(Mutex::new(Vec::new())),
        }
    }

    /// Number of times `score` was called
    pub fn call_count(&self) -> usize {
        self.call_count.load(Ordering::SeqCst)
    }

    /// Requests received so far, oldest first
    pub fn requests(&self) -> Vec<PredictionRequest> {
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }
}

impl RiskScorer for MockScorer {
    type Error = PredictionError;

    async fn score(&self, request: &PredictionRequest) -> Result<PredictionResult, Self::Error> {
        self.call_count.fetch_add(1, Ordering::SeqCst);
        self.requests
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .push(request.clone());

        match &self.outcome {
            Ok(probability) => PredictionResult::new(*probability).ok_or_else(|| {
                PredictionError::MalformedResponse(format!("accident_risk {} outside [0, 1]", probability))
            }),
            Err(e) => Err(e.clone()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use roadrisk_domain::{Lighting, RoadType, TimeOfDay, Weather};
    use std::time::Duration;

    fn request() -> PredictionRequest {
        PredictionRequest {
            road_type: RoadType::Urban,
            num_lanes: 2,
            curvature: 0.5,
            speed_limit: 60,
            lighting: Lighting::Daylight,
            weather: Weather::Clear,
            road_signs_present: true,
            public_road: true,
            time_of_day: TimeOfDay::Morning,
            holiday: false,
            school_season: false,
            num_reported_accidents: 0,
        }
    }

    #[tokio::test]
    async fn test_mock_scorer_fixed_probability() {
        let scorer = MockScorer::new(0.42);
        let result = scorer.score(&request()).await.unwrap();
        assert_eq!(result.accident_risk(), 0.42);
        assert_eq!(scorer.call_count(), 1);
        assert_eq!(scorer.requests(), vec![request()]);
    }

    #[tokio::test]
    async fn test_mock_scorer_failure() {
        let scorer = MockScorer::failing(PredictionError::Timeout(Duration::from_secs(15)));
        let err = scorer.score(&request()).await.unwrap_err();
        assert_eq!(err, PredictionError::Timeout(Duration::from_secs(15)));
    }

    #[tokio::test]
    async fn test_mock_scorer_out_of_range() {
        let scorer = MockScorer::new(1.5);
        assert!(matches!(
            scorer.score(&request()).await,
            Err(PredictionError::MalformedResponse(_))
        ));
    }

    #[tokio::test]
    async fn test_mock_scorer_clone_shares_counts() {
        let scorer1 = MockScorer::new(0.1);
        let scorer2 = scorer1.clone();

        scorer1.score(&request()).await.unwrap();

        assert_eq!(scorer1.call_count(), 1);
        assert_eq!(scorer2.call_count(), 1);
    }

    #[tokio::test]
    async fn test_mock_scorer_records_after_poisoned_lock() {
        let scorer = MockScorer::new(0.3);
        scorer.score(&request()).await.unwrap();

        let requests = scorer.requests.clone();
        let _ = std::thread::spawn(move || {
            let _guard = requests.lock().unwrap();
            panic!("poison the request log");
        })
        .join();
        assert!(scorer.requests.is_poisoned());

        scorer.score(&request()).await.unwrap();
        assert_eq!(scorer.requests(), vec![request(), request()]);
    }
}
