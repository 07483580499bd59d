//! # Application Configuration
//!
//! Defines the configuration of the `studymate-server` and loads it in layers:
//!
//! 1. Built-in defaults.
//! 2. An optional YAML file (`config.yml` in the working directory, or an
//!    explicit path), with `${VAR}` references substituted from the environment.
//! 3. Top-level environment variables (`PORT`, `LOG_PATH`, `MAX_WORDS`).
//! 4. `STUDYMATE_`-prefixed variables for nested keys
//!    (e.g. `STUDYMATE_PROVIDER__MODEL_NAME`).
//!
//! The completion API key falls back to `OPENAI_API_KEY` when no layer sets it.

use config::{Config as ConfigBuilder, Environment, File, FileFormat};
use regex::Regex;
use serde::Deserialize;
use std::env;
use std::fs;
use std::path::Path;
use studymate::constants::{
    DEFAULT_LOG_PATH, DEFAULT_MAX_WORDS, DEFAULT_QA_TEMPLATE_PATH, DEFAULT_SUMMARY_TEMPLATE_PATH,
};
use studymate::ProviderConfig;
use tracing::info;

/// The file picked up from the working directory when no path is given.
pub const DEFAULT_CONFIG_FILE: &str = "config.yml";

/// The environment variable holding the completion API key.
pub const API_KEY_ENV_VAR: &str = "OPENAI_API_KEY";

/// A custom error type for configuration issues.
#[derive(Debug)]
pub enum ConfigError {
    /// Indicates an error from the underlying `config` crate.
    General(String),
    /// Indicates an explicitly requested configuration file was not found.
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
    /// The port for the server to listen on. Loaded from `PORT` env var.
    #[serde(default = "default_port")]
    pub port: u16,
    /// Where study sessions are appended. Loaded from `LOG_PATH` env var.
    #[serde(default = "default_log_path")]
    pub log_path: String,
    /// The word cap for uploaded documents. Loaded from `MAX_WORDS` env var.
    #[serde(default = "default_max_words")]
    pub max_words: usize,
    #[serde(default)]
    pub prompts: PromptsConfig,
    /// The completion provider.
    #[serde(default)]
    pub provider: ProviderConfig,
}

/// Locations of the two prompt template files.
#[derive(Debug, Deserialize, Clone)]
pub struct PromptsConfig {
    #[serde(default = "default_summary_template_path")]
    pub summary_template_path: String,
    #[serde(default = "default_qa_template_path")]
    pub qa_template_path: String,
}

impl Default for PromptsConfig {
    fn default() -> Self {
        Self {
            summary_template_path: default_summary_template_path(),
            qa_template_path: default_qa_template_path(),
        }
    }
}

fn default_port() -> u16 {
    8501
}

fn default_log_path() -> String {
    DEFAULT_LOG_PATH.to_string()
}

fn default_max_words() -> usize {
    DEFAULT_MAX_WORDS
}

fn default_summary_template_path() -> String {
    DEFAULT_SUMMARY_TEMPLATE_PATH.to_string()
}

fn default_qa_template_path() -> String {
    DEFAULT_QA_TEMPLATE_PATH.to_string()
}

// Helper to read a file, substitute env vars, and return its content.
// Returns Ok(None) if the file does not exist, or an error if it fails to read.
fn read_and_substitute(path: &str) -> Result<Option<String>, ConfigError> {
    if !Path::new(path).exists() {
        return Ok(None);
    }

    let content = fs::read_to_string(path)
        .map_err(|e| ConfigError::General(format!("Failed to read config file '{path}': {e}")))?;

    let re = Regex::new(r"\$\{(?P<var>[A-Z0-9_]+)\}")
        .map_err(|e| ConfigError::General(e.to_string()))?;
    let expanded_content = re.replace_all(&content, |caps: &regex::Captures| {
        let var_name = &caps["var"];
        env::var(var_name).unwrap_or_default()
    });

    Ok(Some(expanded_content.to_string()))
}

/// Loads the application configuration from an optional file and the environment.
///
/// An explicit `config_path_override` must exist; the default `config.yml` is optional.
pub fn get_config(config_path_override: Option<&str>) -> Result<AppConfig, ConfigError> {
    let mut builder = ConfigBuilder::builder();

    match config_path_override {
        Some(path) => {
            let content = read_and_substitute(path)?.ok_or_else(|| {
                ConfigError::NotFound(format!("Config file not found at '{path}'."))
            })?;
            info!("Loading configuration from '{path}'.");
            builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
        }
        None => {
            if let Some(content) = read_and_substitute(DEFAULT_CONFIG_FILE)? {
                info!("Loading configuration from '{DEFAULT_CONFIG_FILE}'.");
                builder = builder.add_source(File::from_str(&content, FileFormat::Yaml));
            }
        }
    }

    let settings = builder
        // Top-level keys like PORT and LOG_PATH.
        .add_source(Environment::default())
        // Prefixed variables for nested keys.
        .add_source(
            Environment::with_prefix("STUDYMATE")
                .prefix_separator("_")
                .try_parsing(true)
                .separator("__"),
        )
        .build()?;

    let mut config: AppConfig = settings.try_deserialize()?;

    // The key usually lives in the environment or `.env`, not in the file.
    let has_key = config
        .provider
        .api_key
        .as_deref()
        .is_some_and(|key| !key.trim().is_empty());
    if !has_key {
        if let Ok(key) = env::var(API_KEY_ENV_VAR) {
            if !key.trim().is_empty() {
                config.provider.api_key = Some(key);
            }
        }
    }

    Ok(config)
}
