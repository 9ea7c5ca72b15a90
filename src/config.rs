//! Configuration loading with env-var overrides.
//!
//! Looks for a TOML file (explicit path, `ANGOLA_GEO_CONFIG`,
//! `config/default.toml`, then the user config dir), and applies
//! `ANGOLA_GEO_DATA` and `ANGOLA_GEO_LOG_LEVEL` on top. With no file at all
//! the built-in defaults are used.

use std::{
    env, fs,
    path::{Path, PathBuf},
};

use serde::Deserialize;
use tracing::level_filters::LevelFilter;

use crate::error::GeoError;
use crate::loader::DataSource;
use crate::logger;

/// Fully-resolved configuration.
#[derive(Debug, Clone)]
pub struct Config {
    /// Dataset file (already expanded, no `~`). `None` means the embedded dataset.
    pub data_path: Option<PathBuf>,
    pub log_level: LevelFilter,
    /// File the config was read from, if any.
    pub source: Option<PathBuf>,
}

impl Config {
    pub fn data_source(&self) -> DataSource {
        match &self.data_path {
            Some(path) => DataSource::Path(path.clone()),
            None => DataSource::Embedded,
        }
    }
}

/// Raw TOML shape, the `serde` target before resolution.
#[derive(Deserialize, Default)]
struct RawConfig {
    #[serde(default)]
    data: RawData,
    #[serde(default)]
    logging: RawLogging,
}

#[derive(Deserialize, Default)]
struct RawData {
    #[serde(default)]
    path: Option<String>,
}

#[derive(Deserialize)]
struct RawLogging {
    #[serde(default = "default_log_level")]
    level: String,
}

impl Default for RawLogging {
    fn default() -> Self {
        Self { level: default_log_level() }
    }
}

fn default_log_level() -> String {
    "warn".to_string()
}

/// Resolve and load the configuration.
///
/// An `explicit` path must exist; the other candidates are skipped when absent.
pub fn load(explicit: Option<&Path>) -> Result<Config, GeoError> {
    let data_override = env::var("ANGOLA_GEO_DATA").ok();
    let log_level_override = env::var("ANGOLA_GEO_LOG_LEVEL").ok();

    let path = match explicit {
        Some(p) => Some(p.to_path_buf()),
        None => discover(env::var("ANGOLA_GEO_CONFIG").ok().as_deref()),
    };

    match path {
        Some(p) => load_from(&p, data_override.as_deref(), log_level_override.as_deref()),
        None => resolve(
            RawConfig::default(),
            None,
            data_override.as_deref(),
            log_level_override.as_deref(),
        ),
    }
}

/// First config file candidate. The env path is taken as-is so that a typo
/// there surfaces as a read error instead of silently falling through.
fn discover(env_path: Option<&str>) -> Option<PathBuf> {
    if let Some(p) = env_path {
        return Some(expand_home(p));
    }
    let local = PathBuf::from("config/default.toml");
    if local.is_file() {
        return Some(local);
    }
    dirs::config_dir()
        .map(|d| d.join("angola-geo").join("config.toml"))
        .filter(|p| p.is_file())
}

/// Internal loader. Accepts an explicit path and optional overrides.
/// Tests pass overrides directly instead of mutating env vars.
pub fn load_from(
    path: &Path,
    data_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, GeoError> {
    let raw = fs::read_to_string(path)
        .map_err(|e| GeoError::Config(format!("cannot read {}: {e}", path.display())))?;

    let parsed: RawConfig = toml::from_str(&raw)
        .map_err(|e| GeoError::Config(format!("parse error in {}: {e}", path.display())))?;

    resolve(parsed, Some(path), data_override, log_level_override)
}

fn resolve(
    raw: RawConfig,
    source: Option<&Path>,
    data_override: Option<&str>,
    log_level_override: Option<&str>,
) -> Result<Config, GeoError> {
    let log_level = logger::parse_level(log_level_override.unwrap_or(&raw.logging.level))
        .map_err(|e| GeoError::Config(e.to_string()))?;

    let data_path = data_override
        .map(str::to_string)
        .or(raw.data.path)
        .filter(|p| !p.trim().is_empty())
        .map(|p| expand_home(&p));

    Ok(Config {
        data_path,
        log_level,
        source: source.map(Path::to_path_buf),
    })
}

/// Problem with a `.env` load worth reporting. A missing file is normal and
/// yields `None`; one that exists but cannot be read or parsed does not.
pub fn dotenv_problem(outcome: &dotenvy::Result<PathBuf>) -> Option<String> {
    match outcome {
        Err(e) if !e.not_found() => Some(e.to_string()),
        _ => None,
    }
}

/// Expand a leading `~` to the user's home directory.
/// Absolute or relative paths without `~` are returned unchanged.
pub fn expand_home(path: &str) -> PathBuf {
    if let Some(rest) = path.strip_prefix("~/") {
        if let Some(home) = dirs::home_dir() {
            return home.join(rest);
        }
    }
    if path == "~" {
        if let Some(home) = dirs::home_dir() {
            return home;
        }
    }
    PathBuf::from(path)
}
