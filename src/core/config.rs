//! # Configuration
//!
//! Centralizes all settings with a clear override hierarchy:
//! defaults → config file → env vars → CLI flags.
//!
//! Config lives at `~/.lensmith/config.toml`. If missing on first run, a
//! commented-out default is generated so users can discover all options.

use log::{LevelFilter, debug, info, warn};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::core::todo::{AppState, Todo, sample_state};

// ============================================================================
// Config Structs (all fields Option<T> for sparse TOML)
// ============================================================================

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct LensmithConfig {
    #[serde(default)]
    pub general: GeneralConfig,
    #[serde(default)]
    pub seed: Vec<SeedEntry>,
}

#[derive(Debug, Default, Deserialize, Serialize)]
pub struct GeneralConfig {
    pub log_level: Option<String>,
    pub log_file: Option<String>,
    /// Lists to render. Empty or missing means every list.
    pub lists: Option<Vec<String>>,
}

/// One initial todo.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct SeedEntry {
    pub list: String,
    pub name: String,
    #[serde(default)]
    pub complete: bool,
}

// ============================================================================
// Defaults
// ============================================================================

pub const DEFAULT_LOG_LEVEL: LevelFilter = LevelFilter::Debug;
pub const DEFAULT_LOG_FILE: &str = "lensmith.log";

// ============================================================================
// Resolved Config (concrete values, no Options)
// ============================================================================

#[derive(Debug, Clone)]
pub struct ResolvedConfig {
    pub log_level: LevelFilter,
    pub log_file: PathBuf,
    pub lists: Vec<String>,
    pub initial_state: AppState,
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

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::Io(e) => Some(e),
            ConfigError::Parse(e) => Some(e),
        }
    }
}

impl From<ConfigError> for std::io::Error {
    fn from(err: ConfigError) -> Self {
        match err {
            ConfigError::Io(e) => e,
            ConfigError::Parse(_) => std::io::Error::new(std::io::ErrorKind::InvalidData, err),
        }
    }
}

// ============================================================================
// Loading
// ============================================================================

/// Returns the path to `~/.lensmith/config.toml`.
pub fn config_path() -> Option<PathBuf> {
    dirs::home_dir().map(|h| h.join(".lensmith").join("config.toml"))
}

/// Load config from `explicit`, or from `~/.lensmith/config.toml`.
///
/// An explicit path must exist. The default path is generated with
/// commented-out defaults when missing, and `LensmithConfig::default()` is
/// returned. A malformed file returns `ConfigError::Parse`.
pub fn load_config(explicit: Option<&Path>) -> Result<LensmithConfig, ConfigError> {
    if let Some(path) = explicit {
        return read_config(path);
    }

    let path = match config_path() {
        Some(p) => p,
        None => {
            warn!("Could not determine home directory, using default config");
            return Ok(LensmithConfig::default());
        }
    };

    if !path.exists() {
        info!("No config file found, generating default at {}", path.display());
        generate_default_config(&path);
        return Ok(LensmithConfig::default());
    }

    read_config(&path)
}

fn read_config(path: &Path) -> Result<LensmithConfig, ConfigError> {
    let contents = fs::read_to_string(path).map_err(ConfigError::Io)?;
    let config: LensmithConfig = toml::from_str(&contents).map_err(ConfigError::Parse)?;
    info!("Loaded config from {}", path.display());
    debug!("Config: {:?}", config);
    Ok(config)
}

/// Generates a commented-out default config file at the given path.
fn generate_default_config(path: &Path) {
    let default_content = r#"# Lensmith Configuration
# All settings are optional. Defaults are used for anything not specified.
# Override hierarchy: defaults -> this file -> env vars -> CLI flags.

# [general]
# log_level = "debug"                # "off", "error", "warn", "info", "debug", "trace"
# log_file = "lensmith.log"          # Or set LENSMITH_LOG_FILE env var
# lists = ["home", "work"]           # Lists to render (default: all)

# Initial todos. Without any [[seed]] entries the built-in home/work lists are used.
# [[seed]]
# list = "home"
# name = "Buy dog food"
# complete = false

# [[seed]]
# list = "work"
# name = "Something something scrum"
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
///
/// `cli_log_level` and `cli_lists` are from CLI flags (None / empty = not specified).
pub fn resolve(
    config: &LensmithConfig,
    cli_log_level: Option<&str>,
    cli_lists: &[String],
) -> ResolvedConfig {
    // Log level: CLI → env → config → default
    let log_level = cli_log_level
        .map(|s| s.to_string())
        .or_else(|| std::env::var("LENSMITH_LOG_LEVEL").ok())
        .or_else(|| config.general.log_level.clone())
        .and_then(|s| parse_level(&s))
        .unwrap_or(DEFAULT_LOG_LEVEL);

    // Log file: env → config → default
    let log_file = std::env::var("LENSMITH_LOG_FILE")
        .ok()
        .or_else(|| config.general.log_file.clone())
        .unwrap_or_else(|| DEFAULT_LOG_FILE.to_string());

    let initial_state = seed_state(&config.seed);

    // Lists: CLI → config → every list in the initial state
    let lists = if !cli_lists.is_empty() {
        cli_lists.to_vec()
    } else {
        config
            .general
            .lists
            .clone()
            .filter(|lists| !lists.is_empty())
            .unwrap_or_else(|| initial_state.list_names())
    };

    ResolvedConfig {
        log_level,
        log_file: PathBuf::from(log_file),
        lists,
        initial_state,
    }
}

fn parse_level(raw: &str) -> Option<LevelFilter> {
    match raw.parse() {
        Ok(level) => Some(level),
        Err(_) => {
            warn!("Ignoring unknown log level {:?}", raw);
            None
        }
    }
}

/// Builds the initial state from seed entries, keeping their order within each list.
fn seed_state(seed: &[SeedEntry]) -> AppState {
    if seed.is_empty() {
        return sample_state();
    }
    let mut todos: BTreeMap<String, Vec<Todo>> = BTreeMap::new();
    for entry in seed {
        todos
            .entry(entry.list.clone())
            .or_default()
            .push(Todo::new(entry.name.clone(), entry.complete));
    }
    AppState { todos }
}
