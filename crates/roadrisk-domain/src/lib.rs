//! Roadrisk Domain Layer
//!
//! Core model of the risk-submission workflow: the editable form, the
//! strictly-typed request derived from it, and the classification of the
//! probability returned by a scoring service.
//!
//! ## Key Concepts
//!
//! - **FormInput**: raw, editable draft of twelve road/traffic attributes
//! - **PredictionRequest**: the normalized payload sent to a scoring service
//! - **PredictionResult**: the risk probability in [0, 1]
//! - **RiskTier**: Low / Moderate / High discretization of the probability
//! - **Advisory**: safety recommendations derived from tier and conditions
//!
//! ## Architecture
//!
//! - No I/O and no async runtime
//! - Pure, deterministic functions only
//! - Transport implementations live in `roadrisk-client`
//! - The [`traits::RiskScorer`] trait is the boundary to the scoring service

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod advisory;
pub mod attributes;
pub mod field;
pub mod form;
pub mod request;
pub mod risk;
pub mod traits;

// Re-exports for convenience
pub use advisory::{advisories_for, Advisory};
pub use attributes::{Lighting, RoadType, TimeOfDay, Weather};
pub use field::FormField;
pub use form::{FormError, FormInput};
pub use request::{normalize, InvalidInputError, PredictionRequest};
pub use risk::{Assessment, PredictionResult, RiskTier};
pub use traits::RiskScorer;
