//! Categorical road and trip attributes

/// Road category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoadType {
    /// City streets
    Urban,
    /// Country roads
    Rural,
    /// Limited-access highways
    Highway,
}

impl RoadType {
    /// Get the road type name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            RoadType::Urban => "urban",
            RoadType::Rural => "rural",
            RoadType::Highway => "highway",
        }
    }

    /// Parse a road type from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "urban" => Some(RoadType::Urban),
            "rural" => Some(RoadType::Rural),
            "highway" => Some(RoadType::Highway),
            _ => None,
        }
    }
}

/// Lighting conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Lighting {
    /// Full daylight
    Daylight,
    /// Dusk, dawn or poor street lighting
    Dim,
    /// Darkness
    Night,
}

impl Lighting {
    /// Get the lighting name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Lighting::Daylight => "daylight",
            Lighting::Dim => "dim",
            Lighting::Night => "night",
        }
    }

    /// Parse lighting from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "daylight" => Some(Lighting::Daylight),
            "dim" => Some(Lighting::Dim),
            "night" => Some(Lighting::Night),
            _ => None,
        }
    }
}

/// Weather conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Weather {
    /// Clear skies
    Clear,
    /// Rain
    Rainy,
    /// Fog, reduced visibility
    Foggy,
}

impl Weather {
    /// Get the weather name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            Weather::Clear => "clear",
            Weather::Rainy => "rainy",
            Weather::Foggy => "foggy",
        }
    }

    /// Parse weather from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "clear" => Some(Weather::Clear),
            "rainy" => Some(Weather::Rainy),
            "foggy" => Some(Weather::Foggy),
            _ => None,
        }
    }
}

/// Part of the day the trip takes place in
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum TimeOfDay {
    /// Morning
    Morning,
    /// Afternoon
    Afternoon,
    /// Evening
    Evening,
}

impl TimeOfDay {
    /// Get the time of day name as a string
    pub fn as_str(&self) -> &'static str {
        match self {
            TimeOfDay::Morning => "morning",
            TimeOfDay::Afternoon => "afternoon",
            TimeOfDay::Evening => "evening",
        }
    }

    /// Parse a time of day from a string
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_lowercase().as_str() {
            "morning" => Some(TimeOfDay::Morning),
            "afternoon" => Some(TimeOfDay::Afternoon),
            "evening" => Some(TimeOfDay::Evening),
            _ => None,
        }
    }
}
