//! Risk module - scoring results and their classification

use crate::advisory::{advisories_for, Advisory};
use crate::request::PredictionRequest;
use std::fmt;

/// Probabilities strictly below this are [`RiskTier::Low`]
pub const MODERATE_THRESHOLD: f64 = 0.30;

/// Probabilities strictly above this are [`RiskTier::High`]
pub const HIGH_THRESHOLD: f64 = 0.70;

/// Discretized accident risk
///
/// Both thresholds belong to the Moderate band: 0.30 and 0.70 are Moderate.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum RiskTier {
    /// Below 0.30
    Low,

    /// From 0.30 to 0.70 inclusive
    Moderate,

    /// Above 0.70
    High,
}

impl RiskTier {
    /// Classify a probability
    ///
    /// # Examples
    ///
    /// ```
    /// use roadrisk_domain::RiskTier;
    ///
    /// assert_eq!(RiskTier::classify(0.29), RiskTier::Low);
    /// assert_eq!(RiskTier::classify(0.30), RiskTier::Moderate);
    /// assert_eq!(RiskTier::classify(0.70), RiskTier::Moderate);
    /// assert_eq!(RiskTier::classify(0.71), RiskTier::High);
    /// ```
    pub fn classify(probability: f64) -> Self {
        if probability < MODERATE_THRESHOLD {
            RiskTier::Low
        } else if probability <= HIGH_THRESHOLD {
            RiskTier::Moderate
        } else {
            RiskTier::High
        }
    }

    /// Get the tier name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RiskTier::Low => "low",
            RiskTier::Moderate => "moderate",
            RiskTier::High => "high",
        }
    }

    /// Display label, e.g. "Moderate Risk"
    pub fn label(&self) -> &'static str {
        match self {
            RiskTier::Low => "Low Risk",
            RiskTier::Moderate => "Moderate Risk",
            RiskTier::High => "High Risk",
        }
    }

    /// Parse a tier from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "low" => Some(RiskTier::Low),
            "moderate" => Some(RiskTier::Moderate),
            "high" => Some(RiskTier::High),
            _ => None,
        }
    }
}

impl fmt::Display for RiskTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Risk probability returned by a scoring service
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PredictionResult {
    accident_risk: f64,
}

impl PredictionResult {
    /// Wrap a probability, rejecting values outside [0, 1] and non-finite values
    pub fn new(accident_risk: f64) -> Option<Self> {
        if accident_risk.is_finite() && (0.0..=1.0).contains(&accident_risk) {
            Some(Self { accident_risk })
        } else {
            None
        }
    }

    /// The probability in [0, 1]
    pub fn accident_risk(&self) -> f64 {
        self.accident_risk
    }

    /// Tier of the probability
    pub fn tier(&self) -> RiskTier {
        RiskTier::classify(self.accident_risk)
    }

    /// Complement of the probability, shown as the "safety score"
    pub fn safety_margin(&self) -> f64 {
        1.0 - self.accident_risk
    }
}

/// Everything presented after one successful submission
#[derive(Debug, Clone, PartialEq)]
pub struct Assessment {
    /// The request that was scored
    pub request: PredictionRequest,
    /// The service's answer
    pub result: PredictionResult,
    /// Classified tier
    pub tier: RiskTier,
    /// Tier advisory followed by condition warnings
    pub advisories: Vec<Advisory>,
}

impl Assessment {
    /// Classify a result and derive its advisories
    pub fn new(request: PredictionRequest, result: PredictionResult) -> Self {
        let tier = result.tier();
        let advisories = advisories_for(&request, tier);
        Self {
            request,
            result,
            tier,
            advisories,
        }
    }
}


#[cfg(test)]
mod proptests {
    use super::*;
    use proptest::prelude::*;

    proptest! {
        /// Property: classification is monotone in the probability
        #[test]
        fn test_classification_monotone(a in 0.0f64..=1.0, b in 0.0f64..=1.0) {
            let (lo, hi) = if a <= b { (a, b) } else { (b, a) };
            prop_assert!(RiskTier::classify(lo) <= RiskTier::classify(hi));
        }
    }
}
