// Rust guideline compliant 2026-10-14

//! Configuration management for the lead dialer.

use crate::{Error, LeadSource, Result};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Output format for command results.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    /// JSON output format.
    Json,
    /// Human-readable table format.
    #[default]
    Table,
    /// Plain text format.
    Plain,
}

const LOG_LEVELS: [&str; 5] = ["error", "warn", "info", "debug", "trace"];

/// Configuration for lead dialer behavior.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Failed call attempts after which a lead is dropped instead of retried.
    #[serde(default = "default_max_call_attempts")]
    pub max_call_attempts: u32,

    /// Source assigned to leads created without an explicit source.
    #[serde(default)]
    pub default_source: LeadSource,

    /// Default output format for commands.
    #[serde(default)]
    pub output_format: OutputFormat,

    /// Number operators dial from; shown in manual dial instructions.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub caller_number: Option<String>,

    /// Script read to the lead when the call connects.
    #[serde(default = "default_call_script")]
    pub call_script: String,

    /// Log level used when no level is given on the command line.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_max_call_attempts() -> u32 {
    2
}

fn default_call_script() -> String {
    "Assalam o Alaikum. Hum aap se property inquiry ke hawale se rabta kar rahe thay. Shukriya."
        .to_string()
}

fn default_log_level() -> String {
    "warn".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            max_call_attempts: default_max_call_attempts(),
            default_source: LeadSource::default(),
            output_format: OutputFormat::default(),
            caller_number: None,
            call_script: default_call_script(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Loads configuration from file and environment variables.
    ///
    /// Configuration is loaded in the following order (later overrides earlier):
    /// 1. Default values
    /// 2. Configuration file at `.leads/config.toml`
    /// 3. Environment variables with `LEADS_` prefix
    ///
    /// # Arguments
    ///
    /// * `leads_dir` - Path to the `.leads` directory
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - Configuration file exists but cannot be read
    /// - Configuration file contains invalid TOML
    /// - Configuration values fail validation
    pub fn load(leads_dir: &Path) -> Result<Self> {
        let mut config = Self::default();

        let config_path = leads_dir.join("config.toml");
        if config_path.exists() {
            let content = std::fs::read_to_string(&config_path)?;
            config = toml::from_str(&content)
                .map_err(|e| Error::InvalidConfig(format!("Invalid config file: {}", e)))?;
        }

        config.apply_env_overrides()?;
        config.validate()?;

        Ok(config)
    }

    /// Applies environment variable overrides to the configuration.
    ///
    /// Supported environment variables:
    /// - `LEADS_MAX_CALL_ATTEMPTS` - Failed attempts before dropping (>= 1)
    /// - `LEADS_DEFAULT_SOURCE` - Default lead source (new/old)
    /// - `LEADS_OUTPUT_FORMAT` - Output format (json/table/plain)
    /// - `LEADS_CALLER_NUMBER` - Operator caller number
    /// - `LEADS_CALL_SCRIPT` - Call script text
    /// - `LEADS_LOG_LEVEL` - Log level (error/warn/info/debug/trace)
    ///
    /// # Errors
    ///
    /// Returns an error if environment variable values are invalid.
    fn apply_env_overrides(&mut self) -> Result<()> {
        if let Ok(val) = std::env::var("LEADS_MAX_CALL_ATTEMPTS") {
            self.max_call_attempts = val.parse().map_err(|_| {
                Error::InvalidConfig(
                    "LEADS_MAX_CALL_ATTEMPTS must be a positive number".to_string(),
                )
            })?;
        }

        if let Ok(val) = std::env::var("LEADS_DEFAULT_SOURCE") {
            self.default_source = val.parse().map_err(|_| {
                Error::InvalidConfig("LEADS_DEFAULT_SOURCE must be new or old".to_string())
            })?;
        }

        if let Ok(val) = std::env::var("LEADS_OUTPUT_FORMAT") {
            self.output_format = match val.as_str() {
                "json" => OutputFormat::Json,
                "table" => OutputFormat::Table,
                "plain" => OutputFormat::Plain,
                _ => {
                    return Err(Error::InvalidConfig(
                        "LEADS_OUTPUT_FORMAT must be json, table, or plain".to_string(),
                    ))
                }
            };
        }

        if let Ok(val) = std::env::var("LEADS_CALLER_NUMBER") {
            self.caller_number = Some(val);
        }

        if let Ok(val) = std::env::var("LEADS_CALL_SCRIPT") {
            self.call_script = val;
        }

        if let Ok(val) = std::env::var("LEADS_LOG_LEVEL") {
            self.log_level = val.to_lowercase();
        }

        Ok(())
    }

    /// Validates the configuration values.
    ///
    /// # Errors
    ///
    /// Returns an error if:
    /// - max_call_attempts is zero
    /// - caller_number is set but not a valid phone number
    /// - log_level is not a known level
    fn validate(&self) -> Result<()> {
        if self.max_call_attempts == 0 {
            return Err(Error::InvalidConfig(
                "max_call_attempts must be greater than 0".to_string(),
            ));
        }

        if let Some(number) = &self.caller_number {
            crate::models::validate_phone(number)
                .map_err(|e| Error::InvalidConfig(format!("caller_number: {}", e)))?;
        }

        if !LOG_LEVELS.contains(&self.log_level.as_str()) {
            return Err(Error::InvalidConfig(format!(
                "log_level must be one of {}, got {}",
                LOG_LEVELS.join(", "),
                self.log_level
            )));
        }

        Ok(())
    }

    /// Saves the configuration to `config.toml` in the given directory.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails or the file cannot be written.
    pub fn save(&self, leads_dir: &Path) -> Result<()> {
        let config_path = leads_dir.join("config.toml");
        let content = toml::to_string_pretty(self)
            .map_err(|e| Error::InvalidConfig(format!("Failed to serialize config: {}", e)))?;
        std::fs::write(&config_path, content)?;
        Ok(())
    }
}
