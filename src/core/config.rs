//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.recrutder/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::content::DEFAULT_LANGUAGE;
use crate::core::state::MAX_CONTEXT_MESSAGES;
use crate::transport::http::{DEFAULT_CONNECT_TIMEOUT_SECS, DEFAULT_ENDPOINT, DEFAULT_TIMEOUT_SECS};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct WidgetConfig {
    #[serde(default)]
    pub assistant: AssistantConfig,
    #[serde(default)]
    pub widget: PanelConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct AssistantConfig {
    pub endpoint: Option<String>,
    pub timeout_secs: Option<u64>,
    pub connect_timeout_secs: Option<u64>,
    pub context_window: Option<usize>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct PanelConfig {
    pub default_language: Option<String>,
    pub page: Option<String>,
    pub start_open: Option<bool>,
}

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone, PartialEq)]
pub struct ResolvedConfig {
    pub endpoint: String,
    pub timeout: Duration,
    pub connect_timeout: Duration,
    pub context_window: usize,
    /// Used when no language preference has been saved yet.
    pub default_language: String,
    /// Language forced from the command line; beats the saved preference.
    pub language_override: Option<String>,
    pub page: String,
    pub start_open: bool,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub endpoint: Option<String>,
    pub language: Option<String>,
    pub page: Option<String>,
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(std::io::Error),
    Parse(toml::de::Error),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::Io(e) => write!(f, "config I/O error: {e}"),
            ConfigError::Parse(e) => write!(f, "config parse error: {e}"),
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.recrutder/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".recrutder").join("config.toml"))
}

/// Load config from `~/.recrutder/config.toml`.
pub fn load_config() -> Result<WidgetConfig, ConfigError> {
    match config_path() {
        Some(path) => load_config_from(&path),
        None => {
            warn!("Could not determine home directory, using default config");
            Ok(WidgetConfig::default())
        }
    }
}

/// Load config from `path`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `WidgetConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config_from(path: &Path) -> Result<WidgetConfig, ConfigError> {
    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(path);
        return Ok(WidgetConfig::default());
    }

    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: WidgetConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

const DEFAULT_CONFIG_TEMPLATE: &str = r#"# Recrut'der assistant widget configuration
# All settings are optional. Defaults are used for anything left out.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [assistant]
# endpoint = "http://localhost:8000/api/support/chatbot"   # Or RECRUTDER_ENDPOINT
# timeout_secs = 20
# connect_timeout_secs = 5
# context_window = 5                 # Transcript entries sent with each message (1-5)

# [widget]
# default_language = "en"            # Or RECRUTDER_LANG; a saved selection wins
# page = "/"                         # Or RECRUTDER_PAGE
# start_open = false
"#;

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, DEFAULT_CONFIG_TEMPLATE) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &WidgetConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

fn resolve_with_env(
    config: &WidgetConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Endpoint: CLI → env → config → default
    let endpoint = cli
        .endpoint
        .clone()
        .or_else(|| env("RECRUTDER_ENDPOINT"))
        .or_else(|| config.assistant.endpoint.clone())
        .unwrap_or_else(|| DEFAULT_ENDPOINT.to_string());

    // Default language: env → config → "en" (CLI is an override, kept apart)
    let default_language = env("RECRUTDER_LANG")
        .or_else(|| config.widget.default_language.clone())
        .unwrap_or_else(|| DEFAULT_LANGUAGE.to_string());

    // Page: CLI → env → config → "/"
    let page = cli
        .page
        .clone()
        .or_else(|| env("RECRUTDER_PAGE"))
        .or_else(|| config.widget.page.clone())
        .unwrap_or_else(|| "/".to_string());

    let context_window = config
        .assistant
        .context_window
        .unwrap_or(MAX_CONTEXT_MESSAGES)
        .clamp(1, MAX_CONTEXT_MESSAGES);

    ResolvedConfig {
        endpoint,
        timeout: Duration::from_secs(
            config.assistant.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS),
        ),
        connect_timeout: Duration::from_secs(
            config
                .assistant
                .connect_timeout_secs
                .unwrap_or(DEFAULT_CONNECT_TIMEOUT_SECS),
        ),
        context_window,
        default_language,
        language_override: cli.language.clone(),
        page,
        start_open: config.widget.start_open.unwrap_or(false),
    }
}
