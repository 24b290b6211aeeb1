use crate::error::{CosmosError, Result};
use crate::gateway::GatewayConfig;
use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

/// The base config directory name under ~/.config/
const CONFIG_DIR_NAME: &str = "cosmos";

/// The filename for the configuration file.
const CONFIG_FILENAME: &str = "config.toml";

/// The filename for the log file.
const LOG_FILENAME: &str = "cosmos.log";

/// Environment variables consulted for the API key, in order.
pub const API_KEY_ENV_VARS: &[&str] = &["GEMINI_API_KEY", "API_KEY"];

pub const DEFAULT_MODEL: &str = "gemini-2.5-flash";
pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com";
pub const DEFAULT_LOG_LEVEL: &str = "info";

const LOG_LEVELS: &[&str] = &["trace", "debug", "info", "warn", "error", "off"];

// ============================================================================
// Configuration
// ============================================================================

/// User configuration loaded from `~/.config/cosmos/config.toml`.
///
/// Missing fields fall back to their defaults, so a partial file is valid.
///
/// # Example
///
/// ```toml
/// api_key = "AIza..."
/// model = "gemini-2.5-flash"
/// api_base = "https://generativelanguage.googleapis.com"
/// log_level = "info"
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Config {
    /// Gemini API key. When absent the app runs in degraded mode.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub api_key: Option<String>,

    /// Model used for every request.
    #[serde(default = "default_model")]
    pub model: String,

    /// Base URL of the generative language API.
    #[serde(default = "default_api_base")]
    pub api_base: String,

    /// Log level written to `cosmos.log`.
    #[serde(default = "default_log_level")]
    pub log_level: String,
}

fn default_model() -> String {
    DEFAULT_MODEL.to_string()
}

fn default_api_base() -> String {
    DEFAULT_API_BASE.to_string()
}

fn default_log_level() -> String {
    DEFAULT_LOG_LEVEL.to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            api_key: None,
            model: default_model(),
            api_base: default_api_base(),
            log_level: default_log_level(),
        }
    }
}

impl Config {
    /// Fill in the API key from the environment when the file has none.
    pub fn with_env_overrides(mut self) -> Self {
        self.api_key = resolve_api_key(self.api_key.take(), |name| env::var(name).ok());
        self
    }

    /// Explicit gateway settings derived from this config.
    pub fn gateway_config(&self) -> GatewayConfig {
        GatewayConfig {
            api_key: self.api_key.clone(),
            model: self.model.clone(),
            api_base: self.api_base.clone(),
        }
    }

    pub fn has_api_key(&self) -> bool {
        self.api_key.as_deref().is_some_and(|k| !k.trim().is_empty())
    }
}

/// Pick the configured key, or the first non-blank environment variable.
fn resolve_api_key(
    configured: Option<String>,
    lookup: impl Fn(&str) -> Option<String>,
) -> Option<String> {
    let configured = configured
        .map(|k| k.trim().to_string())
        .filter(|k| !k.is_empty());
    if configured.is_some() {
        return configured;
    }
    API_KEY_ENV_VARS
        .iter()
        .filter_map(|name| lookup(name))
        .map(|k| k.trim().to_string())
        .find(|k| !k.is_empty())
}

// ============================================================================
// Config Validation
// ============================================================================

use std::error::Error;
use std::fmt;

/// Error type for configuration validation failures.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ConfigError {
    EmptyModel,
    InvalidApiBase(String),
    UnknownLogLevel(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyModel => write!(f, "`model` must not be empty"),
            ConfigError::InvalidApiBase(base) => write!(
                f,
                "`api_base` must start with http:// or https:// (got \"{}\")",
                base
            ),
            ConfigError::UnknownLogLevel(level) => write!(
                f,
                "`log_level` must be one of {} (got \"{}\")",
                LOG_LEVELS.join(", "),
                level
            ),
        }
    }
}

impl Error for ConfigError {}

impl From<ConfigError> for CosmosError {
    fn from(err: ConfigError) -> Self {
        CosmosError::Config(err.to_string())
    }
}

/// Validate a configuration for consistency.
pub fn validate_config(config: &Config) -> std::result::Result<(), ConfigError> {
    if config.model.trim().is_empty() {
        return Err(ConfigError::EmptyModel);
    }
    if !(config.api_base.starts_with("http://") || config.api_base.starts_with("https://")) {
        return Err(ConfigError::InvalidApiBase(config.api_base.clone()));
    }
    if !LOG_LEVELS.contains(&config.log_level.as_str()) {
        return Err(ConfigError::UnknownLogLevel(config.log_level.clone()));
    }
    Ok(())
}

// ============================================================================
// Config File Management
// ============================================================================

/// Written when creating a new config file so each option is explained in place.
const DEFAULT_CONFIG_WITH_COMMENTS: &str = r#"# Tô no Cosmos configuration

# Gemini API key. Leave unset to run without the oracle
# (GEMINI_API_KEY or API_KEY in the environment are used as a fallback).
# api_key = ""

# Model used for wisdom, dreams, star maps and the oracle chat.
model = "gemini-2.5-flash"

# Base URL of the generative language API.
api_base = "https://generativelanguage.googleapis.com"

# Log level for ~/.config/cosmos/cosmos.log (trace, debug, info, warn, error, off).
log_level = "info"
"#;

/// Get the cosmos config directory path (~/.config/cosmos/).
pub fn config_dir() -> Result<PathBuf> {
    let home = dirs::home_dir()
        .ok_or_else(|| CosmosError::Config("Could not determine home directory".to_string()))?;
    Ok(home.join(".config").join(CONFIG_DIR_NAME))
}

/// Ensure the config directory exists. Returns whether it was newly created.
pub fn ensure_config_dir() -> Result<(PathBuf, bool)> {
    let dir = config_dir()?;
    let created = !dir.exists();
    fs::create_dir_all(&dir)?;
    Ok((dir, created))
}

pub fn config_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(CONFIG_FILENAME))
}

pub fn log_path() -> Result<PathBuf> {
    Ok(config_dir()?.join(LOG_FILENAME))
}

/// Load `~/.config/cosmos/config.toml`, creating it with defaults if missing.
pub fn load_config() -> Result<Config> {
    let path = config_path()?;
    if !path.exists() {
        ensure_config_dir()?;
        fs::write(&path, DEFAULT_CONFIG_WITH_COMMENTS)?;
        return Ok(Config::default());
    }
    load_config_from_path(&path)
}

/// Load a config from a specific path without any fallback logic.
pub fn load_config_from_path(path: &Path) -> Result<Config> {
    let content = fs::read_to_string(path)?;
    toml::from_str(&content).map_err(|e| {
        CosmosError::Config(format!("Failed to parse config file at {:?}: {}", path, e))
    })
}

/// The configuration used at startup: file values, then environment, validated.
pub fn get_effective_config() -> Result<Config> {
    let config = load_config()?.with_env_overrides();
    validate_config(&config)?;
    Ok(config)
}

pub fn save_config(config: &Config) -> Result<()> {
    ensure_config_dir()?;
    save_config_to_path(config, &config_path()?)
}

pub fn save_config_to_path(config: &Config, path: &Path) -> Result<()> {
    fs::write(path, generate_config_with_comments(config))?;
    Ok(())
}

fn generate_config_with_comments(config: &Config) -> String {
    let api_key_line = match &config.api_key {
        Some(key) => format!("api_key = {}", toml_string(key)),
        None => "# api_key = \"\"".to_string(),
    };
    format!(
        r#"# Tô no Cosmos configuration

# Gemini API key. Leave unset to run without the oracle
# (GEMINI_API_KEY or API_KEY in the environment are used as a fallback).
{}

# Model used for wisdom, dreams, star maps and the oracle chat.
model = {}

# Base URL of the generative language API.
api_base = {}

# Log level for ~/.config/cosmos/cosmos.log (trace, debug, info, warn, error, off).
log_level = {}
"#,
        api_key_line,
        toml_string(&config.model),
        toml_string(&config.api_base),
        toml_string(&config.log_level)
    )
}

/// Quote a value as a TOML basic string. JSON string escapes are valid TOML.
fn toml_string(value: &str) -> String {
    serde_json::Value::String(value.to_string()).to_string()
}

/// Keys accepted by `cosmos config set`.
pub const VALID_KEYS: &[&str] = &["api_key", "model", "api_base", "log_level"];

/// Apply a `key = value` change and validate the result.
pub fn set_config_value(config: &mut Config, key: &str, value: &str) -> Result<()> {
    let mut updated = config.clone();
    match key {
        "api_key" => {
            let value = value.trim();
            updated.api_key = if value.is_empty() {
                None
            } else {
                Some(value.to_string())
            };
        }
        "model" => updated.model = value.trim().to_string(),
        "api_base" => updated.api_base = value.trim().trim_end_matches('/').to_string(),
        "log_level" => updated.log_level = value.trim().to_lowercase(),
        other => {
            return Err(CosmosError::Config(format!(
                "Unknown config key \"{}\". Valid keys: {}",
                other,
                VALID_KEYS.join(", ")
            )))
        }
    }
    validate_config(&updated)?;
    *config = updated;
    Ok(())
}

/// Hide all but the last four characters of a key.
pub fn mask_api_key(key: &str) -> String {
    let chars: Vec<char> = key.chars().collect();
    if chars.len() <= 4 {
        return "*".repeat(chars.len());
    }
    let tail: String = chars[chars.len() - 4..].iter().collect();
    format!("{}{}", "*".repeat(chars.len() - 4), tail)
}
