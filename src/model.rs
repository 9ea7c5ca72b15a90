//! Dataset tree and the typed records the query engine hands out.
//!
//! Two layers:
//!
//! * The raw tree ([`Dataset`], [`Province`], [`Municipality`], [`Commune`],
//!   [`Metadata`]) mirrors the JSON document one-to-one and is what the
//!   loader deserializes. It is immutable once loaded.
//!
//! * Output records ([`ProvinceRecord`], [`MunicipalityRecord`],
//!   [`SearchResults`] and friends) are owned snapshots built per query.
//!   They carry context the raw tree only has implicitly, such as the owning
//!   province name on a municipality.

use std::fmt;

use serde::{Deserialize, Serialize};

// ── raw tree ─────────────────────────────────────────────────────────────────

/// Province identifier. The document uses integers today, but strings are
/// accepted so the schema can move to codes without a breaking change.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(untagged)]
pub enum ProvinceId {
    Number(u32),
    Code(String),
}

impl fmt::Display for ProvinceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ProvinceId::Number(n) => write!(f, "{n}"),
            ProvinceId::Code(c) => f.write_str(c),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Commune {
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Municipality {
    /// Empty while the municipality list of a province is still being filled in.
    pub name: String,
    #[serde(default)]
    pub communes: Vec<Commune>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Province {
    pub id: ProvinceId,
    pub name: String,
    pub capital: String,
    /// Declared number of municipalities. May exceed `municipalities.len()`
    /// for provinces whose data is incomplete.
    pub municipality_count: u32,
    pub municipalities: Vec<Municipality>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Metadata {
    pub law: String,
    pub publication_date: String,
    pub effective_date: String,
    pub total_provinces: u32,
    pub total_municipalities: u32,
    pub total_communes: u32,
    pub previous_provinces: u32,
    pub previous_municipalities: u32,
    pub sources: Vec<String>,
    pub data_version: String,
    pub last_updated: String,
}

/// Root of the document.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Dataset {
    pub metadata: Metadata,
    pub provinces: Vec<Province>,
}

// ── output records ───────────────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MunicipalityRecord {
    pub name: String,
    /// Name of the owning province.
    pub province: String,
    pub communes: Vec<Commune>,
}

impl MunicipalityRecord {
    pub(crate) fn from_raw(municipality: &Municipality, province: &str) -> Self {
        Self {
            name: municipality.name.clone(),
            province: province.to_string(),
            communes: municipality.communes.clone(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ProvinceRecord {
    pub id: ProvinceId,
    pub name: String,
    pub capital: String,
    pub municipality_count: u32,
    pub municipalities: Vec<MunicipalityRecord>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

impl ProvinceRecord {
    pub(crate) fn from_raw(province: &Province) -> Self {
        Self {
            id: province.id.clone(),
            name: province.name.clone(),
            capital: province.capital.clone(),
            municipality_count: province.municipality_count,
            municipalities: province
                .municipalities
                .iter()
                .map(|m| MunicipalityRecord::from_raw(m, &province.name))
                .collect(),
            notes: province.notes.clone(),
        }
    }
}

/// A municipality hit from [`search`](crate::AngolaGeo::search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MunicipalityMatch {
    pub name: String,
    pub province: String,
    pub province_capital: String,
}

/// A commune hit from [`search`](crate::AngolaGeo::search).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommuneMatch {
    pub name: String,
    pub municipality: String,
    pub province: String,
}

/// Three independent hit lists, each in dataset traversal order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct SearchResults {
    pub provinces: Vec<ProvinceRecord>,
    pub municipalities: Vec<MunicipalityMatch>,
    pub communes: Vec<CommuneMatch>,
}

impl SearchResults {
    pub fn total(&self) -> usize {
        self.provinces.len() + self.municipalities.len() + self.communes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.total() == 0
    }
}

/// How many municipalities have been populated versus how many are expected.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Coverage {
    /// Loaded municipalities with a non-empty name.
    pub named: u32,
    /// Declared count, per province or dataset-wide.
    pub expected: u32,
}

impl Coverage {
    pub fn percent(&self) -> f64 {
        if self.expected == 0 {
            return 0.0;
        }
        f64::from(self.named) / f64::from(self.expected) * 100.0
    }

    pub fn is_complete(&self) -> bool {
        self.named >= self.expected
    }
}

/// A data-quality finding from [`audit`](crate::AngolaGeo::audit).
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum DataIssue {
    CountMismatch { province: String, declared: u32, loaded: u32 },
    DuplicateId { id: ProvinceId },
    DuplicateName { name: String },
    TotalMismatch { field: String, declared: u64, actual: u64 },
    MissingCapital { province: String },
}

impl fmt::Display for DataIssue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DataIssue::CountMismatch { province, declared, loaded } => write!(
                f,
                "{province}: declares {declared} municipalities but lists {loaded}"
            ),
            DataIssue::DuplicateId { id } => write!(f, "province id {id} appears more than once"),
            DataIssue::DuplicateName { name } => {
                write!(f, "province name '{name}' appears more than once")
            }
            DataIssue::TotalMismatch { field, declared, actual } => {
                write!(f, "metadata.{field} is {declared} but the provinces add up to {actual}")
            }
            DataIssue::MissingCapital { province } => write!(f, "{province}: capital is empty"),
        }
    }
}
