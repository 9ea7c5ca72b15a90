//! Angola Geo: provinces, municipalities and communes of Angola under
//! Lei n.º 14/24.
//!
//! Build an [`AngolaGeo`] from a [`DataSource`] and query it:
//!
//! ```no_run
//! use angola_geo::{AngolaGeo, DataSource};
//!
//! # fn main() -> angola_geo::Result<()> {
//! let geo = AngolaGeo::new(DataSource::Embedded)?;
//! let luanda = geo.get_province("luanda")?;
//! assert_eq!(luanda.capital, "Ingombota");
//!
//! let hits = geo.search("Bengo");
//! println!("{} provinces match", hits.provinces.len());
//! # Ok(())
//! # }
//! ```
//!
//! The binary entry point is src/main.rs.

pub mod cli;
pub mod config;
pub mod error;
pub mod loader;
pub mod logger;
pub mod model;
pub mod query;

pub use error::{GeoError, Result};
pub use loader::DataSource;
pub use model::{
    Commune, CommuneMatch, Coverage, DataIssue, Dataset, Metadata, Municipality,
    MunicipalityMatch, MunicipalityRecord, Province, ProvinceId, ProvinceRecord, SearchResults,
};
pub use query::{AngolaGeo, NEW_PROVINCES};
