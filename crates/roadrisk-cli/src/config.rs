//! Configuration management for the CLI.

use crate::error::{CliError, Result};
use roadrisk_client::endpoint::DEV_BASE_URL;
use roadrisk_client::http::DEFAULT_TIMEOUT_SECS;
use roadrisk_client::{BooleanEncoding, PredictionClient};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

/// CLI configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Active profile name
    #[serde(default = "default_profile")]
    pub active_profile: String,

    /// Available profiles
    #[serde(default)]
    pub profiles: BTreeMap<String, Profile>,

    /// Global settings
    #[serde(default)]
    pub settings: Settings,

    /// File the configuration was loaded from and is saved to
    #[serde(skip)]
    path: Option<PathBuf>,

    /// Profile chosen for this invocation only; never saved
    #[serde(skip)]
    session_profile: Option<String>,
}

/// Scoring endpoint profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Profile {
    /// Base URL of the scoring service; requests go to `<base>/predict`
    pub endpoint_base_url: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout_secs")]
    pub timeout_secs: u64,

    /// How boolean fields are sent
    #[serde(default)]
    pub boolean_encoding: BooleanEncoding,
}

/// Global CLI settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// Enable colored output
    #[serde(default = "default_true")]
    pub color: bool,

    /// Default output format
    #[serde(default = "default_format")]
    pub format: OutputFormat,

    /// Command history size
    #[serde(default = "default_history_size")]
    pub history_size: usize,

    /// Log filter used when `RUST_LOG` is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

/// Output format.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    /// Table format
    Table,
    /// JSON format
    Json,
    /// Quiet (minimal) format
    Quiet,
}

impl Profile {
    /// Profile for a service rooted at `endpoint_base_url` with default settings.
    pub fn new(endpoint_base_url: impl Into<String>) -> Self {
        Self {
            endpoint_base_url: endpoint_base_url.into(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
            boolean_encoding: BooleanEncoding::default(),
        }
    }

    /// Check the profile's values.
    pub fn validate(&self) -> Result<()> {
        if self.endpoint_base_url.trim().is_empty() {
            return Err(CliError::Config("endpoint_base_url must not be empty".into()));
        }
        if self.timeout_secs == 0 {
            return Err(CliError::Config("timeout_secs must be greater than 0".into()));
        }
        Ok(())
    }

    /// Build a prediction client for this profile.
    pub fn client(&self) -> Result<PredictionClient> {
        self.validate()?;
        Ok(PredictionClient::new(&self.endpoint_base_url)?
            .with_timeout(Duration::from_secs(self.timeout_secs))
            .with_boolean_encoding(self.boolean_encoding))
    }
}

impl Config {
    /// Get the default configuration file path.
    pub fn default_path() -> Result<PathBuf> {
        let home = dirs::home_dir().ok_or_else(|| CliError::Config("Could not find home directory".into()))?;
        Ok(home.join(".roadrisk").join("config.toml"))
    }

    /// Load configuration from `path`, or the default path; a missing file yields defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        let path = match path {
            Some(p) => p.to_path_buf(),
            None => Self::default_path()?,
        };

        let mut config = if path.exists() {
            let contents = fs::read_to_string(&path)?;
            let config: Config = toml::from_str(&contents)?;
            config.validate()?;
            config
        } else {
            Self::default()
        };
        config.path = Some(path);
        Ok(config)
    }

    /// Save configuration to the file it was loaded from.
    pub fn save(&self) -> Result<()> {
        let path = match &self.path {
            Some(p) => p.clone(),
            None => Self::default_path()?,
        };

        // Create parent directory if it doesn't exist
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }

        let contents = toml::to_string_pretty(self)
            .map_err(|e| CliError::Config(format!("Failed to serialize config: {}", e)))?;
        fs::write(&path, contents)?;
        Ok(())
    }

    /// Check that the active profile exists and every profile is usable.
    pub fn validate(&self) -> Result<()> {
        self.get_active_profile()?;
        for (name, profile) in &self.profiles {
            profile
                .validate()
                .map_err(|e| CliError::Config(format!("Profile '{}': {}", name, e)))?;
        }
        Ok(())
    }

    /// Name of the profile in effect: the session override, else the saved one.
    pub fn active_profile_name(&self) -> &str {
        self.session_profile.as_deref().unwrap_or(&self.active_profile)
    }

    /// Get the profile in effect.
    pub fn get_active_profile(&self) -> Result<&Profile> {
        let name = self.active_profile_name();
        self.profiles
            .get(name)
            .ok_or_else(|| CliError::Config(format!("Profile '{}' not found", name)))
    }

    /// Use a profile for this invocation without changing the saved choice.
    pub fn use_profile_once(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.session_profile = Some(name);
        Ok(())
    }

    /// Add or update a profile.
    pub fn set_profile(&mut self, name: String, profile: Profile) {
        self.profiles.insert(name, profile);
    }

    /// Switch to a different profile; the choice is saved by the next `save`.
    pub fn switch_profile(&mut self, name: String) -> Result<()> {
        if !self.profiles.contains_key(&name) {
            return Err(CliError::Config(format!("Profile '{}' does not exist", name)));
        }
        self.active_profile = name;
        self.session_profile = None;
        Ok(())
    }
}

impl Default for Config {
    fn default() -> Self {
        let mut profiles = BTreeMap::new();
        profiles.insert("default".to_string(), Profile::new(DEV_BASE_URL));

        Self {
            active_profile: "default".to_string(),
            profiles,
            settings: Settings::default(),
            path: None,
            session_profile: None,
        }
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            color: true,
            format: OutputFormat::Table,
            history_size: 1000,
            log_level: default_log_level(),
        }
    }
}

fn default_profile() -> String {
    "default".to_string()
}

fn default_timeout_secs() -> u64 {
    DEFAULT_TIMEOUT_SECS
}

fn default_true() -> bool {
    true
}

fn default_format() -> OutputFormat {
    OutputFormat::Table
}

fn default_history_size() -> usize {
    1000
}

fn default_log_level() -> String {
    "warn".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.active_profile, "default");
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.endpoint_base_url, "http://localhost:5000");
        assert_eq!(profile.timeout_secs, 15);
        assert_eq!(profile.boolean_encoding, BooleanEncoding::Boolean);
        assert!(config.settings.color);
    }

    #[test]
    fn test_profile_management() {
        let mut config = Config::default();

        config.set_profile("staging".to_string(), Profile::new("https://staging.example.com"));
        assert!(config.profiles.contains_key("staging"));

        config.switch_profile("staging".to_string()).unwrap();
        assert_eq!(config.active_profile, "staging");
    }

    #[test]
    fn test_switch_to_nonexistent_profile() {
        let mut config = Config::default();
        let result = config.switch_profile("nonexistent".to_string());
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_toml_with_defaults() {
        let toml = r#"
            active_profile = "prod"

            [profiles.prod]
            endpoint_base_url = "https://risk.example.com"
            boolean_encoding = "integer"

            [settings]
            format = "json"
        "#;

        let config: Config = toml::from_str(toml).unwrap();
        let profile = config.get_active_profile().unwrap();
        assert_eq!(profile.timeout_secs, 15);
        assert_eq!(profile.boolean_encoding, BooleanEncoding::Integer);
        assert_eq!(config.settings.format, OutputFormat::Json);
        assert_eq!(config.settings.log_level, "warn");
        assert!(config.settings.color);
    }

    #[test]
    fn test_zero_timeout_rejected() {
        let mut profile = Profile::new("http://localhost:5000");
        profile.timeout_secs = 0;
        assert!(matches!(profile.validate(), Err(CliError::Config(_))));
        assert!(profile.client().is_err());
    }

    #[test]
    fn test_profile_builds_client() {
        let profile = Profile {
            endpoint_base_url: "http://localhost:5000".to_string(),
            timeout_secs: 3,
            boolean_encoding: BooleanEncoding::Integer,
        };
        let client = profile.client().unwrap();
        assert_eq!(client.timeout(), Duration::from_secs(3));
        assert_eq!(client.predict_url().as_str(), "http://localhost:5000/predict");
    }

    #[test]
    fn test_save_and_load_roundtrip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("nested").join("config.toml");

        let mut config = Config::load(Some(path.as_path())).unwrap();
        config.set_profile("lab".to_string(), Profile::new("http://10.0.0.5:5000"));
        config.switch_profile("lab".to_string()).unwrap();
        config.save().unwrap();

        let reloaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(reloaded.active_profile, "lab");
        assert_eq!(reloaded.profiles.get("lab"), config.profiles.get("lab"));
    }

    #[test]
    fn test_one_shot_profile_is_not_saved() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");

        let mut config = Config::load(Some(path.as_path())).unwrap();
        config.set_profile("lab".to_string(), Profile::new("http://10.0.0.5:5000"));
        config.save().unwrap();

        let mut config = Config::load(Some(path.as_path())).unwrap();
        config.use_profile_once("lab".to_string()).unwrap();
        assert_eq!(config.active_profile_name(), "lab");
        assert_eq!(config.get_active_profile().unwrap().endpoint_base_url, "http://10.0.0.5:5000");

        config.set_profile("other".to_string(), Profile::new("http://other:5000"));
        config.save().unwrap();

        let reloaded = Config::load(Some(path.as_path())).unwrap();
        assert_eq!(reloaded.active_profile, "default");
        assert_eq!(reloaded.active_profile_name(), "default");
        assert!(reloaded.profiles.contains_key("other"));
    }

    #[test]
    fn test_switch_replaces_one_shot_profile() {
        let mut config = Config::default();
        config.set_profile("lab".to_string(), Profile::new("http://10.0.0.5:5000"));
        config.set_profile("prod".to_string(), Profile::new("https://risk.example.com"));

        config.use_profile_once("lab".to_string()).unwrap();
        config.switch_profile("prod".to_string()).unwrap();
        assert_eq!(config.active_profile_name(), "prod");

        assert!(config.use_profile_once("ghost".to_string()).is_err());
        assert_eq!(config.active_profile_name(), "prod");
    }

    #[test]
    fn test_load_rejects_missing_active_profile() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "active_profile = \"ghost\"\n").unwrap();

        assert!(matches!(Config::load(Some(path.as_path())), Err(CliError::Config(_))));
    }
}
