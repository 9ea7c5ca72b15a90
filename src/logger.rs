//! Diagnostics on stderr through `tracing`.
//!
//! stdout carries command output only. The subscriber is installed once, after
//! the config is resolved, so the configured level is the default and any
//! `RUST_LOG` directives are layered on top of it.

use tracing::level_filters::LevelFilter;
use tracing_subscriber::EnvFilter;

use crate::error::GeoError;

/// Install the global subscriber with `level` as the default directive.
pub fn init(level: LevelFilter) -> Result<(), GeoError> {
    let filter = filter_for(level, std::env::var("RUST_LOG").ok().as_deref())?;

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .try_init()
        .map_err(|e| GeoError::Logger(format!("failed to set subscriber: {e}")))
}

/// `level` followed by `directives` (`RUST_LOG` syntax). Later directives
/// win for the same target, so a bare `RUST_LOG=debug` replaces `level`.
/// A bad directive is an error rather than being dropped.
fn filter_for(level: LevelFilter, directives: Option<&str>) -> Result<EnvFilter, GeoError> {
    let spec = match directives.map(str::trim) {
        Some(extra) if !extra.is_empty() => format!("{level},{extra}"),
        _ => level.to_string(),
    };
    EnvFilter::builder()
        .parse(&spec)
        .map_err(|e| GeoError::Logger(format!("invalid RUST_LOG '{spec}': {e}")))
}

/// Parse a level name (`error`, `warn`, `info`, `debug`, `trace`, `off`).
pub fn parse_level(level: &str) -> Result<LevelFilter, GeoError> {
    if level.is_empty() {
        return Err(GeoError::Logger("log level must not be empty".into()));
    }
    level
        .parse::<LevelFilter>()
        .map_err(|_| GeoError::Logger(format!("unrecognised log level: '{level}'")))
}
