//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{PredictionRequest, PredictionResult};
use std::future::Future;

/// Trait for scoring a normalized request
///
/// Implemented by the infrastructure layer (roadrisk-client). A call is a
/// single attempt: implementations do not retry.
pub trait RiskScorer {
    /// Error type for scoring operations
    type Error: std::error::Error;

    /// Score one request
    fn score(
        &self,
        request: &PredictionRequest,
    ) -> impl Future<Output = Result<PredictionResult, Self::Error>> + Send;
}
