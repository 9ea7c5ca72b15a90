//! Dataset loading.
//!
//! The engine never goes looking for its data: callers hand it a
//! [`DataSource`] and [`load`] turns that into a [`Dataset`] exactly once.
//! Only structural problems are reported here (missing file, bad UTF-8, bad
//! JSON, schema mismatch). Count invariants are left to
//! [`AngolaGeo::audit`](crate::AngolaGeo::audit).

use std::fmt;
use std::fs;
use std::path::PathBuf;

use tracing::{debug, info};

use crate::error::{GeoError, Result};
use crate::model::Dataset;

/// The document compiled into the crate.
const EMBEDDED: &str = include_str!("../data/divisions.json");

/// Where the dataset comes from.
#[derive(Debug, Clone)]
pub enum DataSource {
    /// The dataset shipped with the crate.
    Embedded,
    /// A JSON file on disk.
    Path(PathBuf),
    /// A JSON document already in memory.
    Bytes(Vec<u8>),
    /// A tree that was parsed (or built) elsewhere.
    Parsed(Dataset),
}

impl fmt::Display for DataSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataSource::Embedded => f.write_str("embedded dataset"),
            DataSource::Path(p) => write!(f, "{}", p.display()),
            DataSource::Bytes(b) => write!(f, "in-memory buffer ({} bytes)", b.len()),
            DataSource::Parsed(_) => f.write_str("pre-parsed dataset"),
        }
    }
}

impl From<PathBuf> for DataSource {
    fn from(path: PathBuf) -> Self {
        DataSource::Path(path)
    }
}

impl From<Dataset> for DataSource {
    fn from(dataset: Dataset) -> Self {
        DataSource::Parsed(dataset)
    }
}

/// Load and parse the dataset.
pub fn load(source: DataSource) -> Result<Dataset> {
    let origin = source.to_string();
    debug!(source = %origin, "loading dataset");

    let dataset = match source {
        DataSource::Embedded => parse_str(EMBEDDED, &origin)?,
        DataSource::Path(path) => {
            let raw = fs::read(&path).map_err(|e| {
                GeoError::DataSource(format!("cannot read {}: {e}", path.display()))
            })?;
            parse_bytes(&raw, &origin)?
        }
        DataSource::Bytes(raw) => parse_bytes(&raw, &origin)?,
        DataSource::Parsed(dataset) => dataset,
    };

    info!(
        source = %origin,
        provinces = dataset.provinces.len(),
        data_version = %dataset.metadata.data_version,
        "dataset loaded"
    );
    Ok(dataset)
}

fn parse_bytes(raw: &[u8], origin: &str) -> Result<Dataset> {
    let text = std::str::from_utf8(raw)
        .map_err(|e| GeoError::DataSource(format!("{origin} is not valid UTF-8: {e}")))?;
    parse_str(text, origin)
}

fn parse_str(text: &str, origin: &str) -> Result<Dataset> {
    serde_json::from_str(text)
        .map_err(|e| GeoError::DataSource(format!("parse error in {origin}: {e}")))
}
