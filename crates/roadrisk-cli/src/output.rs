//! Output formatting for the CLI.

use crate::config::OutputFormat;
use crate::error::Result;
use colored::*;
use roadrisk_domain::{Assessment, FormInput, PredictionRequest, RiskTier};
use tabled::{
    builder::Builder,
    settings::{object::Rows, Alignment, Modify, Style},
};

/// Output formatter.
pub struct Formatter {
    format: OutputFormat,
    color_enabled: bool,
}

impl Formatter {
    /// Create a new formatter.
    pub fn new(format: OutputFormat, color_enabled: bool) -> Self {
        Self {
            format,
            color_enabled,
        }
    }

    /// Format the outcome of a successful submission.
    pub fn format_assessment(&self, assessment: &Assessment) -> Result<String> {
        match self.format {
            OutputFormat::Json => self.format_assessment_json(assessment),
            OutputFormat::Table => Ok(self.format_assessment_table(assessment)),
            OutputFormat::Quiet => Ok(format_probability(assessment.result.accident_risk())),
        }
    }

    fn format_assessment_json(&self, assessment: &Assessment) -> Result<String> {
        let advisories: Vec<&str> = assessment.advisories.iter().map(|a| a.message()).collect();
        let value = serde_json::json!({
            "accident_risk": assessment.result.accident_risk(),
            "tier": assessment.tier.as_str(),
            "safety_margin": assessment.result.safety_margin(),
            "advisories": advisories,
            "request": request_json(&assessment.request),
        });
        Ok(serde_json::to_string_pretty(&value)?)
    }

    fn format_assessment_table(&self, assessment: &Assessment) -> String {
        let risk = assessment.result.accident_risk();

        let mut builder = Builder::default();
        builder.push_record(["Accident Risk", "Risk Level", "Safety Margin"]);
        builder.push_record([
            format_percent(risk),
            assessment.tier.label().to_string(),
            format_percent(assessment.result.safety_margin()),
        ]);

        let mut table = builder.build();
        table
            .with(Style::rounded())
            .with(Modify::new(Rows::first()).with(Alignment::center()));

        let mut out = table.to_string();
        out.push('\n');
        out.push_str(&self.tier_line(assessment.tier));
        for advisory in &assessment.advisories {
            out.push('\n');
            let line = format!("  - {}", advisory.message());
            if advisory.is_warning() {
                out.push_str(&self.colorize(&line, "yellow"));
            } else {
                out.push_str(&line);
            }
        }
        out
    }

    /// Format a bare tier classification.
    pub fn format_classification(&self, probability: f64, tier: RiskTier) -> Result<String> {
        match self.format {
            OutputFormat::Json => Ok(serde_json::to_string_pretty(&serde_json::json!({
                "accident_risk": probability,
                "tier": tier.as_str(),
                "safety_margin": 1.0 - probability,
            }))?),
            OutputFormat::Table => Ok(format!("{} {}", format_percent(probability), self.tier_line(tier))),
            OutputFormat::Quiet => Ok(tier.as_str().to_string()),
        }
    }

    /// Format the raw form values.
    pub fn format_form(&self, form: &FormInput) -> Result<String> {
        match self.format {
            OutputFormat::Json => {
                let map: serde_json::Map<String, serde_json::Value> = form
                    .iter()
                    .map(|(field, value)| (field.as_str().to_string(), serde_json::Value::from(value)))
                    .collect();
                Ok(serde_json::to_string_pretty(&map)?)
            }
            OutputFormat::Table => {
                let mut builder = Builder::default();
                builder.push_record(["Field", "Name", "Value"]);
                for (field, value) in form.iter() {
                    let shown = if value.is_empty() {
                        self.colorize("(empty)", "red")
                    } else {
                        value.to_string()
                    };
                    builder.push_record([field.label().to_string(), field.as_str().to_string(), shown]);
                }
                let mut table = builder.build();
                table
                    .with(Style::rounded())
                    .with(Modify::new(Rows::first()).with(Alignment::center()));
                Ok(table.to_string())
            }
            OutputFormat::Quiet => Ok(form
                .iter()
                .map(|(field, value)| format!("{}={}", field.as_str(), value))
                .collect::<Vec<_>>()
                .join("\n")),
        }
    }

    /// Format a success message.
    pub fn success(&self, message: &str) -> String {
        self.colorize(&format!("✓ {}", message), "green")
    }

    /// Format an error message.
    pub fn error(&self, message: &str) -> String {
        self.colorize(&format!("✗ {}", message), "red")
    }

    /// Format an info message.
    pub fn info(&self, message: &str) -> String {
        self.colorize(&format!("ℹ {}", message), "blue")
    }

    /// Format a warning message.
    pub fn warning(&self, message: &str) -> String {
        self.colorize(&format!("⚠ {}", message), "yellow")
    }

    fn tier_line(&self, tier: RiskTier) -> String {
        let color = match tier {
            RiskTier::Low => "green",
            RiskTier::Moderate => "yellow",
            RiskTier::High => "red",
        };
        self.colorize(tier.label(), color)
    }

    /// Colorize text if color is enabled.
    fn colorize(&self, text: &str, color: &str) -> String {
        if !self.color_enabled {
            return text.to_string();
        }

        match color {
            "red" => text.red().to_string(),
            "green" => text.green().to_string(),
            "blue" => text.blue().to_string(),
            "yellow" => text.yellow().to_string(),
            _ => text.to_string(),
        }
    }
}

/// Probability as a percentage with one decimal.
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value * 100.0)
}

fn format_probability(value: f64) -> String {
    format!("{:.4}", value)
}

fn request_json(request: &PredictionRequest) -> serde_json::Value {
    serde_json::json!({
        "road_type": request.road_type.as_str(),
        "num_lanes": request.num_lanes,
        "curvature": request.curvature,
        "speed_limit": request.speed_limit,
        "lighting": request.lighting.as_str(),
        "weather": request.weather.as_str(),
        "road_signs_present": request.road_signs_present,
        "public_road": request.public_road,
        "time_of_day": request.time_of_day.as_str(),
        "holiday": request.holiday,
        "school_season": request.school_season,
        "num_reported_accidents": request.num_reported_accidents,
    })
}
