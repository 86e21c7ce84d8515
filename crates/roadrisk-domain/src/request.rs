//! Request Normalizer - raw form text to a strictly-typed request
//!
//! The conversion rules hold regardless of which front end filled the form:
//!
//! - integers are parsed base-10, lanes and speed limit must be at least 1
//! - curvature is a finite decimal in [0, 1]
//! - flags must be exactly `"true"` or `"false"`
//! - categorical fields must name one of their known values

use crate::attributes::{Lighting, RoadType, TimeOfDay, Weather};
use crate::field::FormField;
use crate::form::FormInput;
use thiserror::Error;

/// A raw value violated its field's contract
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("Invalid value '{value}' for {field}: {reason}")]
pub struct InvalidInputError {
    /// Offending field
    pub field: FormField,
    /// Raw value as entered
    pub value: String,
    /// What was expected instead
    pub reason: String,
}

impl InvalidInputError {
    fn new(field: FormField, value: &str, reason: impl Into<String>) -> Self {
        Self {
            field,
            value: value.to_string(),
            reason: reason.into(),
        }
    }
}

/// Normalized prediction request
///
/// Field names mirror the wire keys expected by the scoring service.
#[derive(Debug, Clone, PartialEq)]
pub struct PredictionRequest {
    /// Road category
    pub road_type: RoadType,
    /// Number of lanes, at least 1
    pub num_lanes: u32,
    /// Curvature in [0, 1]
    pub curvature: f64,
    /// Speed limit, at least 1
    pub speed_limit: u32,
    /// Lighting conditions
    pub lighting: Lighting,
    /// Weather conditions
    pub weather: Weather,
    /// Road signs present
    pub road_signs_present: bool,
    /// Public road
    pub public_road: bool,
    /// Time of day
    pub time_of_day: TimeOfDay,
    /// Holiday
    pub holiday: bool,
    /// School in session
    pub school_season: bool,
    /// Previously reported accidents
    pub num_reported_accidents: u32,
}

/// Convert a form into a typed request
///
/// Pure: the same form always yields the same request or the same error.
/// An empty field is rejected like any other malformed value.
///
/// # Examples
///
/// ```
/// use roadrisk_domain::{normalize, FormField, FormInput, RoadType};
///
/// let mut form = FormInput::with_defaults();
/// for (field, value) in [
///     (FormField::RoadType, "rural"),
///     (FormField::Lighting, "night"),
///     (FormField::Weather, "foggy"),
///     (FormField::RoadSignsPresent, "false"),
///     (FormField::PublicRoad, "true"),
///     (FormField::TimeOfDay, "evening"),
///     (FormField::Holiday, "false"),
///     (FormField::SchoolSeason, "false"),
/// ] {
///     form.set_field(field, value);
/// }
///
/// let request = normalize(&form).unwrap();
/// assert_eq!(request.road_type, RoadType::Rural);
/// assert_eq!(request.num_lanes, 2);
/// assert!(!request.road_signs_present);
/// ```
pub fn normalize(form: &FormInput) -> Result<PredictionRequest, InvalidInputError> {
    Ok(PredictionRequest {
        road_type: choice(form, FormField::RoadType, RoadType::parse)?,
        num_lanes: integer(form, FormField::NumLanes, 1)?,
        curvature: curvature(form)?,
        speed_limit: integer(form, FormField::SpeedLimit, 1)?,
        lighting: choice(form, FormField::Lighting, Lighting::parse)?,
        weather: choice(form, FormField::Weather, Weather::parse)?,
        road_signs_present: flag(form, FormField::RoadSignsPresent)?,
        public_road: flag(form, FormField::PublicRoad)?,
        time_of_day: choice(form, FormField::TimeOfDay, TimeOfDay::parse)?,
        holiday: flag(form, FormField::Holiday)?,
        school_season: flag(form, FormField::SchoolSeason)?,
        num_reported_accidents: integer(form, FormField::NumReportedAccidents, 0)?,
    })
}

/// Parse a flag value; only the exact strings `"true"` and `"false"` are accepted
pub fn parse_flag(field: FormField, raw: &str) -> Result<bool, InvalidInputError> {
    match raw {
        "true" => Ok(true),
        "false" => Ok(false),
        _ => Err(InvalidInputError::new(field, raw, "expected \"true\" or \"false\"")),
    }
}

fn non_empty(form: &FormInput, field: FormField) -> Result<&str, InvalidInputError> {
    let raw = form.get(field);
    if raw.is_empty() {
        return Err(InvalidInputError::new(field, raw, "value is required"));
    }
    Ok(raw)
}

fn choice<T>(
    form: &FormInput,
    field: FormField,
    parse: fn(&str) -> Option<T>,
) -> Result<T, InvalidInputError> {
    let raw = non_empty(form, field)?;
    parse(raw).ok_or_else(|| {
        let expected = match field.kind() {
            crate::field::FieldKind::Choice(values) => format!("expected one of {}", values.join(", ")),
            _ => "unrecognized value".to_string(),
        };
        InvalidInputError::new(field, raw, expected)
    })
}

fn integer(form: &FormInput, field: FormField, min: u32) -> Result<u32, InvalidInputError> {
    let raw = non_empty(form, field)?;
    let value = raw
        .trim()
        .parse::<u32>()
        .map_err(|_| InvalidInputError::new(field, raw, "expected a whole number"))?;
    if value < min {
        return Err(InvalidInputError::new(field, raw, format!("must be at least {}", min)));
    }
    Ok(value)
}

fn curvature(form: &FormInput) -> Result<f64, InvalidInputError> {
    let field = FormField::Curvature;
    let raw = non_empty(form, field)?;
    let value = raw
        .trim()
        .parse::<f64>()
        .map_err(|_| InvalidInputError::new(field, raw, "expected a decimal number"))?;
    if !value.is_finite() || !(0.0..=1.0).contains(&value) {
        return Err(InvalidInputError::new(field, raw, "must be between 0 and 1"));
    }
    Ok(value)
}

fn flag(form: &FormInput, field: FormField) -> Result<bool, InvalidInputError> {
    let raw = non_empty(form, field)?;
    parse_flag(field, raw)
}

#[cfg(test)]
mod tests {
    use super::*;

    pub(crate) fn scenario_form() -> FormInput {
        let mut form = FormInput::new();
        form.set_field(FormField::RoadType, "rural");
        form.set_field(FormField::NumLanes, "2");
        form.set_field(FormField::Curvature, "0.5");
        form.set_field(FormField::SpeedLimit, "60");
        form.set_field(FormField::Lighting, "night");
        form.set_field(FormField::Weather, "foggy");
        form.set_field(FormField::RoadSignsPresent, "false");
        form.set_field(FormField::PublicRoad, "true");
        form.set_field(FormField::TimeOfDay, "evening");
        form.set_field(FormField::Holiday, "false");
        form.set_field(FormField::SchoolSeason, "false");
        form.set_field(FormField::NumReportedAccidents, "1");
        form
    }

    #[test]
    fn test_normalize_complete_form() {
        let request = normalize(&scenario_form()).unwrap();
        assert_eq!(
            request,
            PredictionRequest {
                road_type: RoadType::Rural,
                num_lanes: 2,
                curvature: 0.5,
                speed_limit: 60,
                lighting: Lighting::Night,
                weather: Weather::Foggy,
                road_signs_present: false,
                public_road: true,
                time_of_day: TimeOfDay::Evening,
                holiday: false,
                school_season: false,
                num_reported_accidents: 1,
            }
        );
    }

    #[test]
    fn test_flag_parsing_is_exact() {
        assert_eq!(parse_flag(FormField::Holiday, "true"), Ok(true));
        assert_eq!(parse_flag(FormField::Holiday, "false"), Ok(false));
        for raw in ["True", "1", "0", "yes", " true", ""] {
            let err = parse_flag(FormField::Holiday, raw).unwrap_err();
            assert_eq!(err.field, FormField::Holiday);
            assert_eq!(err.value, raw);
        }
    }

    #[test]
    fn test_curvature_out_of_range() {
        for raw in ["1.01", "-0.1", "NaN", "inf", "abc"] {
            let mut form = scenario_form();
            form.set_field(FormField::Curvature, raw);
            let err = normalize(&form).unwrap_err();
            assert_eq!(err.field, FormField::Curvature, "raw = {raw}");
        }
    }

    #[test]
    fn test_curvature_bounds_are_inclusive() {
        for raw in ["0", "1", "0.0", "1.0"] {
            let mut form = scenario_form();
            form.set_field(FormField::Curvature, raw);
            assert!(normalize(&form).is_ok(), "raw = {raw}");
        }
    }

    #[test]
    fn test_integer_fields_reject_fractions_and_garbage() {
        let mut form = scenario_form();
        form.set_field(FormField::SpeedLimit, "60.5");
        assert_eq!(normalize(&form).unwrap_err().field, FormField::SpeedLimit);

        let mut form = scenario_form();
        form.set_field(FormField::NumReportedAccidents, "-1");
        assert_eq!(normalize(&form).unwrap_err().field, FormField::NumReportedAccidents);
    }

    #[test]
    fn test_integer_minimums() {
        let mut form = scenario_form();
        form.set_field(FormField::NumLanes, "0");
        let err = normalize(&form).unwrap_err();
        assert_eq!(err.field, FormField::NumLanes);
        assert!(err.reason.contains("at least 1"));

        let mut form = scenario_form();
        form.set_field(FormField::SpeedLimit, "0");
        assert_eq!(normalize(&form).unwrap_err().field, FormField::SpeedLimit);

        let mut form = scenario_form();
        form.set_field(FormField::NumReportedAccidents, "0");
        assert_eq!(normalize(&form).unwrap().num_reported_accidents, 0);
    }

    #[test]
    fn test_unknown_choice_lists_allowed_values() {
        let mut form = scenario_form();
        form.set_field(FormField::Weather, "snowy");
        let err = normalize(&form).unwrap_err();
        assert_eq!(err.field, FormField::Weather);
        assert_eq!(err.to_string(), "Invalid value 'snowy' for weather: expected one of clear, rainy, foggy");
    }

    #[test]
    fn test_empty_field_is_rejected() {
        let mut form = scenario_form();
        form.clear(FormField::RoadType);
        let err = normalize(&form).unwrap_err();
        assert_eq!(err.field, FormField::RoadType);
        assert_eq!(err.reason, "value is required");
    }
}
