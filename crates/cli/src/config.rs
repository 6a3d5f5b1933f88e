//! # Application Configuration
//!
//! Loads the `schoolbot` configuration from a YAML file and environment variables.
//! The file picks the AI provider and may tune the bot; everything has a default except
//! the provider block.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use schoolbot::{constants::DEFAULT_DB_FILE, providers::factory::ProviderConfig, BotConfig};
use serde::Deserialize;
use std::env;
use std::fs;
use tracing::info;

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates a required configuration file was not found.
    NotFound(String),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::General(msg) => write!(f, "Configuration error: {msg}"),
            ConfigError::NotFound(msg) => write!(f, "{msg}"),
        }
    }
}

impl std::error::Error for ConfigError {}

impl From<config::ConfigError> for ConfigError {
    fn from(err: config::ConfigError) -> Self {
        ConfigError::General(err.to_string())
    }
}

/// The root configuration structure, mapping directly to `config.yml`.
#[derive(Debug, Deserialize, Clone)]
pub struct AppConfig {
    /// The path to the SQLite database file. Loaded from `DB_URL` env var.
    pub db_url: String,
    /// The AI provider used by the generation fallback.
    pub provider: ProviderConfig,
    /// Pipeline tuning: school name, limits, matcher weights.
    #[serde(default)]
    pub bot: BotConfig,
}

// Reads a file and substitutes `${VAR}` with the environment value (empty when unset).
// Returns Ok(None) if the file does not exist.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !std::path::Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        env::var(&caps["var"]).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Blank strings left behind by unset `${VAR}` placeholders count as absent.
fn non_empty(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Loads the application configuration from a file and environment variables.
///
/// - Without an override, `config.yml` is used when present, otherwise
///   `config.{AI_PROVIDER}.yml` (`local` when unset).
/// - `DB_URL` overrides `db_url`.
/// - Nested keys are overridden by `SCHOOLBOT_...` variables, e.g.
///   `SCHOOLBOT_BOT__MATCHING__THRESHOLD=2.0`.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let base_path = env!("CARGO_MANIFEST_DIR");
    let mut builder = ConfigBuilder::builder().set_default("db_url", DEFAULT_DB_FILE)?;

    let main_config_path = if let Some(override_path) = config_path_override {
        override_path.to_string()
    } else {
        let user_config_path = format!("{base_path}/config.yml");
        if std::path::Path::new(&user_config_path).exists() {
            info!("Loading user-defined configuration from '{user_config_path}'.");
            user_config_path
        } else {
            let provider = env::var("AI_PROVIDER").unwrap_or_else(|_| "local".to_string());
            let fallback_path = format!("{base_path}/config.{provider}.yml");
            info!("'{user_config_path}' not found. Falling back to '{fallback_path}' based on AI_PROVIDER='{provider}'.");
            fallback_path
        }
    };

    let main_content = read_and_substitute(&main_config_path)?.ok_or_else(|| {
        ConfigError::NotFound(format!(
            "Main config file not found at '{main_config_path}'. Create 'config.yml' or set AI_PROVIDER to 'local' or 'gemini'."
        ))
    })?;
    builder = builder.add_source(File::from_str(&main_content, FileFormat::Yaml));

    let settings = builder
        .add_source(Environment::default())
        .add_source(
            Environment::with_prefix("SCHOOLBOT")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    config.provider.api_url = non_empty(config.provider.api_url);
    config.provider.api_key = non_empty(config.provider.api_key);
    config.provider.model_name = non_empty(config.provider.model_name);

    Ok(config)
}
