//! CLI command definitions and argument parsing.

use clap::{Parser, Subcommand};
use roadrisk_client::BooleanEncoding;
use roadrisk_domain::FormField;
use std::path::PathBuf;

/// Roadrisk CLI - Assess road accident risk against a scoring service.
#[derive(Debug, Parser)]
#[command(name = "roadrisk")]
#[command(version, about, long_about = None)]
pub struct Cli {
    /// Output format
    #[arg(short, long, value_enum, global = true)]
    pub format: Option<CliFormat>,

    /// Disable colored output
    #[arg(long, global = true)]
    pub no_color: bool,

    /// Configuration file path
    #[arg(short, long, global = true)]
    pub config: Option<PathBuf>,

    /// Profile to use
    #[arg(short, long, global = true)]
    pub profile: Option<String>,

    /// Log filter (overridden by RUST_LOG)
    #[arg(long, global = true)]
    pub log_level: Option<String>,

    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Output format options.
#[derive(Debug, Clone, Copy, clap::ValueEnum)]
pub enum CliFormat {
    /// Table format (default)
    Table,
    /// JSON format
    Json,
    /// Quiet format (probability only)
    Quiet,
}

/// CLI commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Submit one set of road conditions for scoring
    Predict(PredictArgs),

    /// Classify a probability into a risk tier without contacting the service
    Classify(ClassifyArgs),

    /// Pick the scoring endpoint for a page host
    Resolve(ResolveArgs),

    /// Manage configuration profiles
    Profile(ProfileArgs),

    /// Enter interactive REPL mode
    Repl,
}

/// Arguments for the predict command.
///
/// Values are passed through unparsed; the form normalizer reports bad ones.
#[derive(Debug, Default, Parser)]
pub struct PredictArgs {
    /// Road type (urban, rural, highway)
    #[arg(long)]
    pub road_type: Option<String>,

    /// Number of lanes (default: 2)
    #[arg(long)]
    pub num_lanes: Option<String>,

    /// Curvature between 0 and 1 (default: 0.5)
    #[arg(long)]
    pub curvature: Option<String>,

    /// Speed limit (default: 60)
    #[arg(long)]
    pub speed_limit: Option<String>,

    /// Lighting (daylight, dim, night)
    #[arg(long)]
    pub lighting: Option<String>,

    /// Weather (clear, rainy, foggy)
    #[arg(long)]
    pub weather: Option<String>,

    /// Road signs present (true, false)
    #[arg(long)]
    pub road_signs_present: Option<String>,

    /// Public road (true, false)
    #[arg(long)]
    pub public_road: Option<String>,

    /// Time of day (morning, afternoon, evening)
    #[arg(long)]
    pub time_of_day: Option<String>,

    /// Holiday (true, false)
    #[arg(long)]
    pub holiday: Option<String>,

    /// School season (true, false)
    #[arg(long)]
    pub school_season: Option<String>,

    /// Number of reported accidents (default: 0)
    #[arg(long)]
    pub num_reported_accidents: Option<String>,

    /// Scoring service base URL, overriding the profile
    #[arg(short, long)]
    pub endpoint: Option<String>,

    /// Request timeout in seconds, overriding the profile
    #[arg(short, long)]
    pub timeout_secs: Option<u64>,
}

impl PredictArgs {
    /// Field values given on the command line.
    pub fn assignments(&self) -> Vec<(FormField, &str)> {
        let values = [
            (FormField::RoadType, &self.road_type),
            (FormField::NumLanes, &self.num_lanes),
            (FormField::Curvature, &self.curvature),
            (FormField::SpeedLimit, &self.speed_limit),
            (FormField::Lighting, &self.lighting),
            (FormField::Weather, &self.weather),
            (FormField::RoadSignsPresent, &self.road_signs_present),
            (FormField::PublicRoad, &self.public_road),
            (FormField::TimeOfDay, &self.time_of_day),
            (FormField::Holiday, &self.holiday),
            (FormField::SchoolSeason, &self.school_season),
            (FormField::NumReportedAccidents, &self.num_reported_accidents),
        ];
        values
            .into_iter()
            .filter_map(|(field, value)| value.as_deref().map(|v| (field, v)))
            .collect()
    }
}

/// Arguments for the classify command.
#[derive(Debug, Parser)]
pub struct ClassifyArgs {
    /// Accident risk probability (0.0-1.0)
    pub probability: f64,
}

/// Arguments for the resolve command.
#[derive(Debug, Parser)]
pub struct ResolveArgs {
    /// Host name the client is served from
    #[arg(long)]
    pub host: String,

    /// Origin of the serving page (used for non-loopback hosts)
    #[arg(short, long)]
    pub origin: Option<String>,

    /// Save the resolved endpoint as a profile
    #[arg(long)]
    pub save_as: Option<String>,
}

/// Arguments for profile management.
#[derive(Debug, Parser)]
pub struct ProfileArgs {
    #[command(subcommand)]
    pub action: ProfileAction,
}

/// Profile management actions.
#[derive(Debug, PartialEq, Subcommand)]
pub enum ProfileAction {
    /// List all profiles
    List,

    /// Show active profile
    Show,

    /// Switch to a different profile
    Switch {
        /// Profile name
        name: String,
    },

    /// Create or update a profile
    Set {
        /// Profile name
        name: String,
        /// Scoring service base URL
        #[arg(short, long)]
        url: String,
        /// Request timeout in seconds
        #[arg(short, long)]
        timeout_secs: Option<u64>,
        /// Boolean wire encoding
        #[arg(short, long, value_enum)]
        encoding: Option<EncodingArg>,
    },

    /// Delete a profile
    Delete {
        /// Profile name
        name: String,
    },
}

/// Boolean encoding argument.
#[derive(Debug, Clone, Copy, PartialEq, Eq, clap::ValueEnum)]
pub enum EncodingArg {
    /// JSON true/false
    Boolean,
    /// 1/0 integers
    Integer,
}

impl From<CliFormat> for crate::config::OutputFormat {
    fn from(format: CliFormat) -> Self {
        match format {
            CliFormat::Table => crate::config::OutputFormat::Table,
            CliFormat::Json => crate::config::OutputFormat::Json,
            CliFormat::Quiet => crate::config::OutputFormat::Quiet,
        }
    }
}

impl From<EncodingArg> for BooleanEncoding {
    fn from(encoding: EncodingArg) -> Self {
        match encoding {
            EncodingArg::Boolean => BooleanEncoding::Boolean,
            EncodingArg::Integer => BooleanEncoding::Integer,
        }
    }
}
