//! Read-only query engine over a loaded [`Dataset`].
//!
//! Name comparisons fold both sides with [`str::to_lowercase`]; there is no
//! locale collation and no accent folding, so `"huila"` does not find
//! `"Huíla"`.

use std::collections::HashSet;

use tracing::debug;

use crate::error::{GeoError, Result};
use crate::loader::{self, DataSource};
use crate::model::{
    CommuneMatch, Coverage, DataIssue, Dataset, Metadata, MunicipalityMatch, MunicipalityRecord,
    Province, ProvinceRecord, SearchResults,
};

/// Provinces created by Lei n.º 14/24. The dataset has no "new" flag, so this
/// list has to be edited by hand whenever the reform history changes.
pub const NEW_PROVINCES: [&str; 3] = ["Icolo e Bengo", "Cuando", "Moxico Leste"];

/// The query engine. Holds the dataset for its whole lifetime and never
/// mutates it, so a shared reference is enough for concurrent readers.
#[derive(Debug, Clone)]
pub struct AngolaGeo {
    data: Dataset,
}

impl AngolaGeo {
    /// Load `source` and build an engine over it.
    pub fn new(source: DataSource) -> Result<Self> {
        Ok(Self { data: loader::load(source)? })
    }

    /// Engine over the dataset compiled into the crate.
    pub fn shipped() -> Result<Self> {
        Self::new(DataSource::Embedded)
    }

    pub fn from_dataset(data: Dataset) -> Self {
        Self { data }
    }

    pub fn metadata(&self) -> Metadata {
        self.data.metadata.clone()
    }

    /// Every province in dataset order, with nested municipalities.
    pub fn list_provinces(&self) -> Vec<ProvinceRecord> {
        self.data.provinces.iter().map(ProvinceRecord::from_raw).collect()
    }

    /// Case-insensitive exact lookup. The first match in dataset order wins.
    pub fn get_province(&self, name: &str) -> Result<ProvinceRecord> {
        self.find_province(name).map(ProvinceRecord::from_raw)
    }

    /// All municipalities, or only those of `province` when given.
    pub fn list_municipalities(&self, province: Option<&str>) -> Result<Vec<MunicipalityRecord>> {
        if let Some(name) = province {
            let p = self.find_province(name)?;
            return Ok(municipality_records(p).collect());
        }
        Ok(self.data.provinces.iter().flat_map(municipality_records).collect())
    }

    /// Declared municipality count.
    ///
    /// Reads `metadata.total_municipalities` for the whole country and the
    /// province's `municipality_count` otherwise. Neither is a recount of the
    /// loaded entries, which can be shorter while data is being filled in.
    pub fn count_municipalities(&self, province: Option<&str>) -> Result<u32> {
        match province {
            Some(name) => Ok(self.find_province(name)?.municipality_count),
            None => Ok(self.data.metadata.total_municipalities),
        }
    }

    /// Case-insensitive substring search over province, municipality and
    /// commune names. The empty term matches everything.
    pub fn search(&self, term: &str) -> SearchResults {
        let needle = term.to_lowercase();
        let hit = |name: &str| name.to_lowercase().contains(&needle);
        let mut results = SearchResults::default();

        for province in &self.data.provinces {
            if hit(&province.name) {
                results.provinces.push(ProvinceRecord::from_raw(province));
            }
            for municipality in &province.municipalities {
                if hit(&municipality.name) {
                    results.municipalities.push(MunicipalityMatch {
                        name: municipality.name.clone(),
                        province: province.name.clone(),
                        province_capital: province.capital.clone(),
                    });
                }
                for commune in &municipality.communes {
                    if hit(&commune.name) {
                        results.communes.push(CommuneMatch {
                            name: commune.name.clone(),
                            municipality: municipality.name.clone(),
                            province: province.name.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            term,
            provinces = results.provinces.len(),
            municipalities = results.municipalities.len(),
            communes = results.communes.len(),
            "search finished"
        );
        results
    }

    pub fn province_names(&self) -> Vec<&str> {
        self.data.provinces.iter().map(|p| p.name.as_str()).collect()
    }

    /// The provinces listed in [`NEW_PROVINCES`], in dataset order.
    pub fn new_provinces(&self) -> Vec<ProvinceRecord> {
        self.data
            .provinces
            .iter()
            .filter(|p| NEW_PROVINCES.contains(&p.name.as_str()))
            .map(ProvinceRecord::from_raw)
            .collect()
    }

    /// Named municipalities against the declared count.
    pub fn coverage(&self, province: Option<&str>) -> Result<Coverage> {
        let named = match province {
            Some(name) => named_municipalities(self.find_province(name)?),
            None => self
                .data
                .provinces
                .iter()
                .map(named_municipalities)
                .fold(0u32, u32::saturating_add),
        };
        Ok(Coverage { named, expected: self.count_municipalities(province)? })
    }

    /// Data-quality report. Purely informational: nothing here changes how
    /// the other queries behave.
    pub fn audit(&self) -> Vec<DataIssue> {
        let mut issues = Vec::new();
        let mut ids = HashSet::new();
        let mut names = HashSet::new();

        for p in &self.data.provinces {
            let loaded = len_u32(p.municipalities.len());
            if loaded > 0 && loaded != p.municipality_count {
                issues.push(DataIssue::CountMismatch {
                    province: p.name.clone(),
                    declared: p.municipality_count,
                    loaded,
                });
            }
            if !ids.insert(&p.id) {
                issues.push(DataIssue::DuplicateId { id: p.id.clone() });
            }
            if !names.insert(p.name.as_str()) {
                issues.push(DataIssue::DuplicateName { name: p.name.clone() });
            }
            if p.capital.trim().is_empty() {
                issues.push(DataIssue::MissingCapital { province: p.name.clone() });
            }
        }

        let meta = &self.data.metadata;
        let province_total = self.data.provinces.len() as u64;
        if u64::from(meta.total_provinces) != province_total {
            issues.push(DataIssue::TotalMismatch {
                field: "total_provinces".into(),
                declared: meta.total_provinces.into(),
                actual: province_total,
            });
        }
        // Widened: declared counts are arbitrary u32 values from the document.
        let declared_sum: u64 =
            self.data.provinces.iter().map(|p| u64::from(p.municipality_count)).sum();
        if u64::from(meta.total_municipalities) != declared_sum {
            issues.push(DataIssue::TotalMismatch {
                field: "total_municipalities".into(),
                declared: meta.total_municipalities.into(),
                actual: declared_sum,
            });
        }

        issues
    }

    fn find_province(&self, name: &str) -> Result<&Province> {
        let wanted = name.to_lowercase();
        let found = self.data.provinces.iter().find(|p| p.name.to_lowercase() == wanted);
        debug!(name, found = found.is_some(), "province lookup");
        found.ok_or_else(|| GeoError::ProvinceNotFound(name.to_string()))
    }
}

fn municipality_records(province: &Province) -> impl Iterator<Item = MunicipalityRecord> + '_ {
    province
        .municipalities
        .iter()
        .map(move |m| MunicipalityRecord::from_raw(m, &province.name))
}

fn named_municipalities(province: &Province) -> u32 {
    len_u32(province.municipalities.iter().filter(|m| !m.name.is_empty()).count())
}

fn len_u32(n: usize) -> u32 {
    u32::try_from(n).unwrap_or(u32::MAX)
}
