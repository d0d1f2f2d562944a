//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.navmenu/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{debug, info, warn};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::PathBuf;
use std::time::Duration;

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct NavConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub file: FileConfig,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub backend: Option<String>,
    pub long_press_ms: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct HttpConfig {
    pub base_url: Option<String>,
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct FileConfig {
    pub path: Option<String>,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_BACKEND: &str = "http";
pub const DEFAULT_BASE_URL: &str = "http://localhost:8081";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LONG_PRESS_MS: u64 = 500;
const DEFAULT_FILE_NAME: &str = "nav.json";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub backend: String,
    pub base_url: String,
    pub timeout: Duration,
    pub file_path: PathBuf,
    pub long_press: Duration,
}

/// Values given on the command line (None = not specified).
#[derive(Debug, Default, Clone)]
pub struct CliOverrides {
    pub backend: Option<String>,
    pub base_url: Option<String>,
    pub file: Option<String>,
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

/// Returns `~/.navmenu`.
pub fn config_dir() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".navmenu"))
}

/// Returns the path to `~/.navmenu/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    config_dir().map(|d| d.join("config.toml"))
}

/// Load config from `~/.navmenu/config.toml`.
///
/// If the file doesn't exist, generates a commented-out default and
/// returns `NavConfig::default()`. If it exists but is malformed,
/// returns `ConfigError::Parse`.
pub fn load_config() -> Result<NavConfig, ConfigError> {
    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(NavConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(NavConfig::default());
    }

    let contents = fs::read_to_string(&path).map_err(ConfigError::Io)?;
    let config: NavConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &PathBuf) {
    let default_content = r#"# navmenu configuration
# All settings are optional; defaults are used for anything not specified.
# Override hierarchy: defaults → this file → env vars → CLI flags.

# [general]
# backend = "http"                   # "http" or "file"
# long_press_ms = 500                # Hold time that enters edit mode

# [http]
# base_url = "http://localhost:8081" # Or set NAVMENU_BASE_URL env var
# timeout_secs = 10

# [file]
# path = "~/.navmenu/nav.json"       # Or set NAVMENU_FILE env var
"#;

    if let Some(parent) = path.parent() {
        if let Err(e) = fs::create_dir_all(parent) {
            warn!("Failed to create config directory: {}", e);
            return;
        }
    }
    if let Err(e) = fs::write(path, default_content) {
        warn!("Failed to write default config: {}", e);
    }
}

// ============================================================================
// Resolution
// ============================================================================

/// Resolve the final config by collapsing: defaults → config file → env vars → CLI.
pub fn resolve(config: &NavConfig, cli: &CliOverrides) -> ResolvedConfig {
    resolve_with_env(config, cli, |key| std::env::var(key).ok())
}

/// Same as [`resolve`], reading env vars through `env` so tests stay hermetic.
pub fn resolve_with_env(
    config: &NavConfig,
    cli: &CliOverrides,
    env: impl Fn(&str) -> Option<String>,
) -> ResolvedConfig {
    // Backend: CLI → env → config → default
    let backend = cli
        .backend
        .clone()
        .or_else(|| env("NAVMENU_BACKEND"))
        .or_else(|| config.general.backend.clone())
        .unwrap_or_else(|| DEFAULT_BACKEND.to_string());

    // Base URL: CLI → env → config → default
    let base_url = cli
        .base_url
        .clone()
        .or_else(|| env("NAVMENU_BASE_URL"))
        .or_else(|| config.http.base_url.clone())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());

    // Menu file: CLI → env → config → ~/.navmenu/nav.json
    let file_path = cli
        .file
        .clone()
        .or_else(|| env("NAVMENU_FILE"))
        .or_else(|| config.file.path.clone())
        .map(|p| expand_home(&p))
        .unwrap_or_else(default_file_path);

    ResolvedConfig {
        backend,
        base_url,
        timeout: Duration::from_secs(config.http.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
        file_path,
        long_press: Duration::from_millis(
            config.general.long_press_ms.unwrap_or(DEFAULT_LONG_PRESS_MS),
        ),
    }
}

fn default_file_path() -> PathBuf {
    config_dir()
        .map(|d| d.join(DEFAULT_FILE_NAME))
        .unwrap_or_else(|| PathBuf::from(DEFAULT_FILE_NAME))
}

/// Expands a leading `~/` to the home directory.
fn expand_home(path: &str) -> PathBuf {
    match (path.strip_prefix("~/"), dirs::home_dir()) {
        (Some(rest), Some(home)) => home.join(rest),
        _ => PathBuf::from(path),
    }
}
