use anyhow::Result;
use config::{Config, ConfigBuilder, FileFormat, builder::DefaultState};
use serde::Deserialize;

use crate::constants::{CONFIG_FILE_NAME, ENV_PREFIX};
use crate::error::{CoreError, CoreResult};

const LOG_LEVELS: [&str; 6] = ["trace", "debug", "info", "warn", "error", "off"];

#[derive(Debug, Clone, Deserialize)]
pub struct Settings {
    pub logging: LoggingConfig,
    pub serializer: SerializerConfig,
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    pub level: String,
}

/// Order in which a property's parameters are written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ParameterOrder {
    /// Order of appearance in the source text (or of insertion through the API).
    #[default]
    Source,
    /// Parameters whose value contains `:` first, then the rest; each group sorted by
    /// descending parameter name.
    Legacy,
}

impl std::str::FromStr for ParameterOrder {
    type Err = CoreError;

    fn from_str(s: &str) -> CoreResult<Self> {
        match s.to_ascii_lowercase().as_str() {
            "source" => Ok(Self::Source),
            "legacy" => Ok(Self::Legacy),
            other => Err(CoreError::InvalidInput(format!(
                "unknown parameter order '{other}', expected 'source' or 'legacy'"
            ))),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct SerializerConfig {
    pub fold_lines: bool,
    pub parameter_order: ParameterOrder,
}

impl Default for SerializerConfig {
    fn default() -> Self {
        Self {
            fold_lines: true,
            parameter_order: ParameterOrder::Source,
        }
    }
}

impl Settings {
    fn builder() -> Result<ConfigBuilder<DefaultState>> {
        Ok(Config::builder()
            .set_default("logging.level", "info")?
            .set_default("serializer.fold_lines", true)?
            .set_default("serializer.parameter_order", "source")?)
    }

    /// ## Summary
    /// Loads configuration from environment variables and an optional `almanac.toml`.
    /// Environment variables (`ALMANAC_SERIALIZER__FOLD_LINES=false`) take precedence over
    /// file values.
    ///
    /// ## Errors
    /// Returns an error if building the configuration or deserializing it fails.
    pub fn load() -> Result<Self> {
        Ok(Self::builder()?
            // TOML file
            .add_source(config::File::with_name(CONFIG_FILE_NAME).required(false))
            // Env
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator("_")
                    .separator("__")
                    .ignore_empty(true)
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize::<Settings>()?
            .validated()?)
    }

    /// ## Summary
    /// Builds settings from an in-memory TOML document layered over the defaults.
    ///
    /// ## Errors
    /// Returns an error if the document is not valid TOML or does not deserialize.
    pub fn from_toml(source: &str) -> Result<Self> {
        Ok(Self::builder()?
            .add_source(config::File::from_str(source, FileFormat::Toml))
            .build()?
            .try_deserialize::<Settings>()?
            .validated()?)
    }

    fn validated(self) -> CoreResult<Self> {
        let level = self.logging.level.to_ascii_lowercase();
        if !LOG_LEVELS.contains(&level.as_str()) {
            return Err(CoreError::ConfigError(format!(
                "logging.level '{}' is not one of {LOG_LEVELS:?}",
                self.logging.level
            )));
        }
        Ok(self)
    }
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            serializer: SerializerConfig::default(),
        }
    }
}

/// ## Summary
/// Loads configuration from environment variables and `.env` file.
///
/// ## Errors
/// Returns an error if loading or deserializing the configuration fails.
pub fn load_config() -> Result<Settings> {
    dotenvy::dotenv().ok();

    let settings = Settings::load()?;
    tracing::debug!(settings = ?settings, "Configuration loaded");
    Ok(settings)
}
