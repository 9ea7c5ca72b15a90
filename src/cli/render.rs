//! Plain-text rendering of query results.

use crate::model::{Coverage, DataIssue, Metadata, MunicipalityRecord, ProvinceRecord, SearchResults};

const RULE_WIDTH: usize = 60;

fn rule() -> String {
    "=".repeat(RULE_WIDTH)
}

/// One province block. `detailed` adds the municipality names.
pub fn province(p: &ProvinceRecord, detailed: bool) -> String {
    let mut lines = vec![
        String::new(),
        p.name.clone(),
        format!("   Capital: {}", p.capital),
        format!("   Municipalities: {}", p.municipality_count),
    ];
    if detailed && !p.municipalities.is_empty() {
        lines.push("   Municipality list:".to_string());
        lines.extend(p.municipalities.iter().map(|m| format!("     - {}", m.name)));
    }
    if let Some(notes) = &p.notes {
        lines.push(format!("   Note: {notes}"));
    }
    lines.join("\n")
}

pub fn province_list(provinces: &[ProvinceRecord], total_municipalities: u32, detailed: bool) -> String {
    let mut lines = vec![format!("Angola - {} provinces", provinces.len()), rule()];
    lines.extend(provinces.iter().map(|p| province(p, detailed)));
    lines.push(String::new());
    lines.push(rule());
    lines.push(format!(
        "Total: {} provinces, {total_municipalities} municipalities",
        provinces.len()
    ));
    lines.join("\n")
}

pub fn province_detail(p: &ProvinceRecord) -> String {
    [format!("Province of {}", p.name), rule(), province(p, true), rule()].join("\n")
}

/// Municipalities with a name. Empty placeholders are skipped; a coverage
/// line is added when `coverage` shows the list is incomplete.
pub fn municipality_list(
    title: &str,
    municipalities: &[MunicipalityRecord],
    coverage: Option<Coverage>,
) -> String {
    let named: Vec<_> = municipalities.iter().filter(|m| !m.name.is_empty()).collect();
    let mut lines = vec![title.to_string(), rule()];

    if named.is_empty() {
        lines.push(String::new());
        lines.push("Municipality data is not available yet for this selection.".to_string());
    } else {
        lines.extend(named.iter().map(|m| format!("  - {} ({})", m.name, m.province)));
    }

    lines.push(String::new());
    lines.push(rule());
    lines.push(format!("Total: {} municipalities with data", named.len()));

    if let Some(c) = coverage.filter(|c| !c.is_complete()) {
        lines.push(format!("Coverage: {}/{} ({:.1}%)", c.named, c.expected, c.percent()));
    }
    lines.join("\n")
}

pub fn search_results(term: &str, results: &SearchResults) -> String {
    let mut lines = vec![format!("Results for '{term}'"), rule()];

    if results.is_empty() {
        lines.push(String::new());
        lines.push("No results found.".to_string());
    }
    if !results.provinces.is_empty() {
        lines.push(String::new());
        lines.push(format!("Provinces ({}):", results.provinces.len()));
        lines.extend(
            results
                .provinces
                .iter()
                .map(|p| format!("  - {} (capital: {})", p.name, p.capital)),
        );
    }
    if !results.municipalities.is_empty() {
        lines.push(String::new());
        lines.push(format!("Municipalities ({}):", results.municipalities.len()));
        lines.extend(
            results
                .municipalities
                .iter()
                .map(|m| format!("  - {} - {}", m.name, m.province)),
        );
    }
    if !results.communes.is_empty() {
        lines.push(String::new());
        lines.push(format!("Communes ({}):", results.communes.len()));
        lines.extend(
            results
                .communes
                .iter()
                .map(|c| format!("  - {} ({}, {})", c.name, c.municipality, c.province)),
        );
    }

    lines.push(String::new());
    lines.push(rule());
    lines.push(format!("Total: {} results found", results.total()));
    lines.join("\n")
}

pub fn info(meta: &Metadata, new_provinces: &[ProvinceRecord]) -> String {
    let mut lines = vec![
        "Angola Geo - dataset information".to_string(),
        rule(),
        String::new(),
        format!("Law: {}", meta.law),
        format!("Publication date: {}", meta.publication_date),
        format!("Effective date: {}", meta.effective_date),
        String::new(),
        "Statistics:".to_string(),
        format!("   - Provinces: {}", meta.total_provinces),
        format!("   - Municipalities: {}", meta.total_municipalities),
        format!("   - Communes: {}", meta.total_communes),
        String::new(),
        "Changes:".to_string(),
        format!("   - Previous provinces: {}", meta.previous_provinces),
        format!("   - Previous municipalities: {}", meta.previous_municipalities),
        String::new(),
        format!("New provinces ({}):", new_provinces.len()),
    ];
    lines.extend(
        new_provinces
            .iter()
            .map(|p| format!("   - {} (capital: {})", p.name, p.capital)),
    );
    lines.push(String::new());
    lines.push("Sources:".to_string());
    lines.extend(meta.sources.iter().map(|s| format!("   - {s}")));
    lines.push(String::new());
    lines.push(format!("Data version: {}", meta.data_version));
    lines.push(format!("Last updated: {}", meta.last_updated));
    lines.push(String::new());
    lines.push(rule());
    lines.join("\n")
}

pub fn new_provinces(provinces: &[ProvinceRecord]) -> String {
    let mut lines = vec!["New provinces - Lei 14/24".to_string(), rule()];
    lines.extend(provinces.iter().map(|p| province(p, true)));
    lines.push(String::new());
    lines.push(rule());
    lines.push(format!("Total: {} new provinces", provinces.len()));
    lines.join("\n")
}

pub fn audit(issues: &[DataIssue]) -> String {
    if issues.is_empty() {
        return "Data check: no issues found".to_string();
    }
    let mut lines = vec![format!("Data check: {} issue(s)", issues.len())];
    lines.extend(issues.iter().map(|i| format!("  - {i}")));
    lines.join("\n")
}
