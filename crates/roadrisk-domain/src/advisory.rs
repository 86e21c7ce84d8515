//! Safety advisories shown alongside a risk assessment

use crate::attributes::{Lighting, Weather};
use crate::request::PredictionRequest;
use crate::risk::RiskTier;

/// Speed limits above this trigger [`Advisory::HighSpeed`]
pub const HIGH_SPEED_LIMIT: u32 = 80;

/// A recommendation derived from the tier or the described conditions
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Advisory {
    /// Low tier
    RouteAppearsSafe,
    /// Moderate tier
    ExerciseCaution,
    /// High tier
    ConsiderAlternatives,
    /// Speed limit above [`HIGH_SPEED_LIMIT`]
    HighSpeed,
    /// Foggy weather
    Fog,
    /// Night lighting
    NightDriving,
    /// No road signs
    LimitedSignage,
}

impl Advisory {
    /// Advisory text
    pub fn message(&self) -> &'static str {
        match self {
            Advisory::RouteAppearsSafe => {
                "Your route appears safe. Maintain standard safety protocols and continue to monitor conditions."
            }
            Advisory::ExerciseCaution => {
                "Exercise caution on this route. Be vigilant and adjust driving according to observed conditions."
            }
            Advisory::ConsiderAlternatives => {
                "High accident risk detected. Consider alternative routes or reconsider travel plans if possible."
            }
            Advisory::HighSpeed => {
                "High speed limits detected. Reduce speed and increase following distance to other vehicles."
            }
            Advisory::Fog => {
                "Foggy conditions reduce visibility. Use headlights and reduce speed for better control."
            }
            Advisory::NightDriving => {
                "Night driving detected. Ensure proper lighting and take regular breaks to avoid fatigue."
            }
            Advisory::LimitedSignage => {
                "Limited road signage. Extra caution is advised. Stay alert for potential hazards."
            }
        }
    }

    /// True for condition warnings, false for the tier advisory
    pub fn is_warning(&self) -> bool {
        !matches!(
            self,
            Advisory::RouteAppearsSafe | Advisory::ExerciseCaution | Advisory::ConsiderAlternatives
        )
    }
}

/// Tier advisory first, then condition warnings in a fixed order
pub fn advisories_for(request: &PredictionRequest, tier: RiskTier) -> Vec<Advisory> {
    let mut advisories = vec![match tier {
        RiskTier::Low => Advisory::RouteAppearsSafe,
        RiskTier::Moderate => Advisory::ExerciseCaution,
        RiskTier::High => Advisory::ConsiderAlternatives,
    }];

    if request.speed_limit > HIGH_SPEED_LIMIT {
        advisories.push(Advisory::HighSpeed);
    }
    if request.weather == Weather::Foggy {
        advisories.push(Advisory::Fog);
    }
    if request.lighting == Lighting::Night {
        advisories.push(Advisory::NightDriving);
    }
    if !request.road_signs_present {
        advisories.push(Advisory::LimitedSignage);
    }

    advisories
}
