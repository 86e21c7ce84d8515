//! JSON wire format of the `/predict` route.

use crate::error::PredictionError;
use roadrisk_domain::{PredictionRequest, PredictionResult};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// How boolean fields are written on the wire
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BooleanEncoding {
    /// JSON `true` / `false`
    #[default]
    Boolean,
    /// `1` / `0`, as the browser client sent them
    Integer,
}

/// A flag encoded per [`BooleanEncoding`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(untagged)]
pub enum WireFlag {
    /// JSON boolean
    Bool(bool),
    /// 1 or 0
    Int(u8),
}

impl WireFlag {
    fn encode(value: bool, encoding: BooleanEncoding) -> Self {
        match encoding {
            BooleanEncoding::Boolean => WireFlag::Bool(value),
            BooleanEncoding::Integer => WireFlag::Int(u8::from(value)),
        }
    }
}

/// Request body sent to the scoring service
///
/// Field names are the wire keys.
#[allow(missing_docs)]
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WireRequest {
    pub road_type: &'static str,
    pub num_lanes: u32,
    pub curvature: f64,
    pub speed_limit: u32,
    pub lighting: &'static str,
    pub weather: &'static str,
    pub road_signs_present: WireFlag,
    pub public_road: WireFlag,
    pub time_of_day: &'static str,
    pub holiday: WireFlag,
    pub school_season: WireFlag,
    pub num_reported_accidents: u32,
}

impl WireRequest {
    /// Encode a normalized request
    pub fn encode(request: &PredictionRequest, encoding: BooleanEncoding) -> Self {
        Self {
            road_type: request.road_type.as_str(),
            num_lanes: request.num_lanes,
            curvature: request.curvature,
            speed_limit: request.speed_limit,
            lighting: request.lighting.as_str(),
            weather: request.weather.as_str(),
            road_signs_present: WireFlag::encode(request.road_signs_present, encoding),
            public_road: WireFlag::encode(request.public_road, encoding),
            time_of_day: request.time_of_day.as_str(),
            holiday: WireFlag::encode(request.holiday, encoding),
            school_season: WireFlag::encode(request.school_season, encoding),
            num_reported_accidents: request.num_reported_accidents,
        }
    }
}

/// Error body returned with a failing status
#[derive(Debug, Deserialize)]
struct WireError {
    error: Option<String>,
}

/// Read `accident_risk` from a success body
pub fn decode_success(body: &[u8]) -> Result<PredictionResult, PredictionError> {
    let value: Value = serde_json::from_slice(body)
        .map_err(|e| PredictionError::MalformedResponse(format!("body is not JSON: {}", e)))?;
    let risk = value
        .get("accident_risk")
        .ok_or_else(|| PredictionError::MalformedResponse("missing accident_risk".to_string()))?;
    let probability = risk.as_f64().ok_or_else(|| {
        PredictionError::MalformedResponse(format!("accident_risk is not a number: {}", risk))
    })?;
    PredictionResult::new(probability).ok_or_else(|| {
        PredictionError::MalformedResponse(format!("accident_risk {} outside [0, 1]", probability))
    })
}

/// Read the optional `error` message from a failure body
pub fn decode_error_message(body: &[u8]) -> Option<String> {
    serde_json::from_slice::<WireError>(body).ok().and_then(|e| e.error)
}
