//! Form field module - the twelve attributes of a prediction request

use std::fmt;

/// One of the twelve editable fields of a prediction form
///
/// The canonical name of each field (see [`FormField::as_str`]) is also the
/// key used on the wire when the request is sent to the scoring service.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum FormField {
    /// Road category (urban, rural, highway)
    RoadType,
    /// Number of lanes, a counter with minimum 1
    NumLanes,
    /// Road curvature in [0, 1]
    Curvature,
    /// Posted speed limit
    SpeedLimit,
    /// Lighting conditions (daylight, dim, night)
    Lighting,
    /// Weather conditions (clear, rainy, foggy)
    Weather,
    /// Whether road signs are present
    RoadSignsPresent,
    /// Whether the road is public
    PublicRoad,
    /// Time of day (morning, afternoon, evening)
    TimeOfDay,
    /// Whether the trip falls on a holiday
    Holiday,
    /// Whether schools are in session
    SchoolSeason,
    /// Number of previously reported accidents, a counter with minimum 0
    NumReportedAccidents,
}

/// Broad input category of a field, used by presentation layers to pick an editor
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// One of a fixed set of lowercase values
    Choice(&'static [&'static str]),
    /// Integer adjusted by increments, never below `min`
    Counter {
        /// Smallest value the counter may hold
        min: u32,
    },
    /// Free numeric text
    Numeric,
    /// "true" or "false"
    Flag,
}

impl FormField {
    /// Number of fields on the form
    pub const COUNT: usize = 12;

    /// All fields in declaration order
    pub const ALL: [FormField; FormField::COUNT] = [
        FormField::RoadType,
        FormField::NumLanes,
        FormField::Curvature,
        FormField::SpeedLimit,
        FormField::Lighting,
        FormField::Weather,
        FormField::RoadSignsPresent,
        FormField::PublicRoad,
        FormField::TimeOfDay,
        FormField::Holiday,
        FormField::SchoolSeason,
        FormField::NumReportedAccidents,
    ];

    /// Canonical snake_case name
    pub fn as_str(&self) -> &'static str {
        match self {
            FormField::RoadType => "road_type",
            FormField::NumLanes => "num_lanes",
            FormField::Curvature => "curvature",
            FormField::SpeedLimit => "speed_limit",
            FormField::Lighting => "lighting",
            FormField::Weather => "weather",
            FormField::RoadSignsPresent => "road_signs_present",
            FormField::PublicRoad => "public_road",
            FormField::TimeOfDay => "time_of_day",
            FormField::Holiday => "holiday",
            FormField::SchoolSeason => "school_season",
            FormField::NumReportedAccidents => "num_reported_accidents",
        }
    }

    /// Human-readable label
    pub fn label(&self) -> &'static str {
        match self {
            FormField::RoadType => "Road Type",
            FormField::NumLanes => "Number of Lanes",
            FormField::Curvature => "Curvature",
            FormField::SpeedLimit => "Speed Limit",
            FormField::Lighting => "Lighting",
            FormField::Weather => "Weather",
            FormField::RoadSignsPresent => "Road Signs Present",
            FormField::PublicRoad => "Public Road",
            FormField::TimeOfDay => "Time of Day",
            FormField::Holiday => "Holiday",
            FormField::SchoolSeason => "School Season",
            FormField::NumReportedAccidents => "Reported Accidents",
        }
    }

    /// Parse a field from its name
    ///
    /// Accepts the canonical name in any case, with `-` allowed in place of `_`.
    pub fn parse(s: &str) -> Option<Self> {
        let name = s.trim().to_lowercase().replace('-', "_");
        FormField::ALL.into_iter().find(|f| f.as_str() == name)
    }

    /// Position of the field in [`FormField::ALL`]
    pub fn index(&self) -> usize {
        *self as usize
    }

    /// Input category of the field
    pub fn kind(&self) -> FieldKind {
        match self {
            FormField::RoadType => FieldKind::Choice(&["urban", "rural", "highway"]),
            FormField::Lighting => FieldKind::Choice(&["daylight", "dim", "night"]),
            FormField::Weather => FieldKind::Choice(&["clear", "rainy", "foggy"]),
            FormField::TimeOfDay => FieldKind::Choice(&["morning", "afternoon", "evening"]),
            FormField::NumLanes => FieldKind::Counter { min: 1 },
            FormField::NumReportedAccidents => FieldKind::Counter { min: 0 },
            FormField::Curvature | FormField::SpeedLimit => FieldKind::Numeric,
            FormField::RoadSignsPresent
            | FormField::PublicRoad
            | FormField::Holiday
            | FormField::SchoolSeason => FieldKind::Flag,
        }
    }

    /// Minimum value if this field is a counter
    pub fn counter_min(&self) -> Option<u32> {
        match self.kind() {
            FieldKind::Counter { min } => Some(min),
            _ => None,
        }
    }
}

impl fmt::Display for FormField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for FormField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s).ok_or_else(|| format!("Unknown field: {}", s))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_index_matches_declaration_order() {
        for (i, field) in FormField::ALL.iter().enumerate() {
            assert_eq!(field.index(), i);
        }
    }

    #[test]
    fn test_parse_accepts_dashes_and_case() {
        assert_eq!(FormField::parse("road-type"), Some(FormField::RoadType));
        assert_eq!(FormField::parse("NUM_LANES"), Some(FormField::NumLanes));
        assert_eq!(FormField::parse("lanes"), None);
    }

    #[test]
    fn test_counter_minimums() {
        assert_eq!(FormField::NumLanes.counter_min(), Some(1));
        assert_eq!(FormField::NumReportedAccidents.counter_min(), Some(0));
        assert_eq!(FormField::SpeedLimit.counter_min(), None);
    }

    #[test]
    fn test_name_roundtrip() {
        for field in FormField::ALL {
            assert_eq!(field.as_str().parse::<FormField>(), Ok(field));
        }
    }
}
