use anyhow::Result;
use config::{Config, FileFormat};
use serde::{Deserialize, Serialize};

use crate::constants::{CONFIG_FILE_NAME, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub output: OutputConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// How diff results are rendered by the command line front end.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum OutputFormat {
    #[default]
    Text,
    Json,
}

#[derive(Debug, Clone, Deserialize)]
pub struct OutputConfig {
    pub format: OutputFormat,
}

impl Settings {
    /// ## Summary
    /// Loads configuration from environment variables and `kunai.toml` into a `Settings`.
    /// Environment variables take precedence over file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env vars, e.g. KUNAI_LOGGING_LEVEL
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .separator("_")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?
            .validated()?)
    }

    /// ## Summary
    /// Builds settings from defaults overlaid with an inline TOML document.
    ///
    /// ## Errors
    /// Returns an error if the TOML is malformed or a value has the wrong type.
    pub fn from_toml_str(toml: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(toml, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?
            .validated()?)
    }

    /// ## Errors
    /// Returns `CoreError::InvalidConfiguration` if the log filter is blank.
    fn validated(self) -> CoreResult<Self> {
        if self.logging.level.trim().is_empty() {
            return Err(CoreError::InvalidConfiguration(
                "logging.level must not be empty".to_string(),
            ));
        }
        Ok(self)
    }

    fn builder() -> Result<config::ConfigBuilder<config::builder::DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("output.format", "text")?)
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    Settings::load()
}

#[cfg(test)]
#[path = "config_tests.rs"]
mod tests;
