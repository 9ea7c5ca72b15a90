//! Query engine behaviour against the shipped dataset.

use std::collections::HashSet;

use angola_geo::{AngolaGeo, DataSource, GeoError};

// ── helpers ──────────────────────────────────────────────────────────────────

fn geo() -> AngolaGeo {
    AngolaGeo::shipped().expect("shipped dataset must load")
}

// ── metadata ─────────────────────────────────────────────────────────────────

#[test]
fn metadata_totals() {
    let meta = geo().metadata();
    assert_eq!(meta.total_provinces, 21);
    assert_eq!(meta.total_municipalities, 326);
    assert_eq!(meta.total_communes, 378);
    assert_eq!(meta.law, "Lei n.º 14/24");
    assert_eq!(meta.effective_date, "2025-01-01");
}

// ── provinces ────────────────────────────────────────────────────────────────

#[test]
fn list_provinces_returns_21() {
    assert_eq!(geo().list_provinces().len(), 21);
}

#[test]
fn luanda_details() {
    let luanda = geo().get_province("Luanda").unwrap();
    assert_eq!(luanda.name, "Luanda");
    assert_eq!(luanda.capital, "Ingombota");
    assert_eq!(luanda.municipality_count, 16);
    assert_eq!(luanda.municipalities.len(), 16);
    assert!(luanda.municipalities.iter().any(|m| m.name == "Belas"));
}

#[test]
fn get_province_case_insensitive_for_every_name() {
    let geo = geo();
    for name in geo.province_names() {
        let exact = geo.get_province(name).unwrap();
        let upper = geo.get_province(&name.to_uppercase()).unwrap();
        let lower = geo.get_province(&name.to_lowercase()).unwrap();
        assert_eq!(exact.name, name);
        assert_eq!(upper.name, exact.name);
        assert_eq!(lower.name, exact.name);
    }
}

#[test]
fn unknown_province_carries_name() {
    let err = geo().get_province("__not_a_real_name__").unwrap_err();
    match err {
        GeoError::ProvinceNotFound(name) => assert_eq!(name, "__not_a_real_name__"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn province_names_in_dataset_order() {
    let geo = geo();
    let names = geo.province_names();
    assert_eq!(names.len(), 21);
    assert_eq!(names[0], "Bengo");
    for expected in ["Luanda", "Bengo", "Icolo e Bengo"] {
        assert!(names.contains(&expected), "{expected} missing");
    }
}

#[test]
fn new_provinces_are_exactly_three() {
    let new = geo().new_provinces();
    assert_eq!(new.len(), 3);
    let names: HashSet<_> = new.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, HashSet::from(["Icolo e Bengo", "Cuando", "Moxico Leste"]));
}

// ── municipalities ───────────────────────────────────────────────────────────

#[test]
fn count_municipalities_reads_declared_counts() {
    let geo = geo();
    assert_eq!(geo.count_municipalities(None).unwrap(), 326);
    assert_eq!(geo.count_municipalities(Some("Luanda")).unwrap(), 16);
    assert_eq!(geo.count_municipalities(Some("Bengo")).unwrap(), 12);
    assert_eq!(geo.count_municipalities(Some("Icolo e Bengo")).unwrap(), 7);
}

#[test]
fn count_for_unpopulated_province_is_declared() {
    let geo = geo();
    let huila = geo.get_province("Huíla").unwrap();
    assert!(huila.municipalities.is_empty());
    assert_eq!(geo.count_municipalities(Some("huíla")).unwrap(), huila.municipality_count);
}

#[test]
fn all_named_municipalities() {
    let all = geo().list_municipalities(None).unwrap();
    let named = all.iter().filter(|m| !m.name.is_empty()).count();
    assert_eq!(named, 35);
}

#[test]
fn municipalities_filtered_by_province() {
    let geo = geo();
    for name in geo.province_names() {
        let munis = geo.list_municipalities(Some(name)).unwrap();
        assert!(munis.iter().all(|m| m.province == name));
    }
    assert_eq!(geo.list_municipalities(Some("luanda")).unwrap().len(), 16);
}

#[test]
fn municipalities_for_unknown_province_fail() {
    let err = geo().list_municipalities(Some("ProvinciaInvalida")).unwrap_err();
    assert!(matches!(err, GeoError::ProvinceNotFound(ref n) if n == "ProvinciaInvalida"));
}

#[test]
fn coverage_overall() {
    let c = geo().coverage(None).unwrap();
    assert_eq!(c.named, 35);
    assert_eq!(c.expected, 326);
}

// ── search ───────────────────────────────────────────────────────────────────

#[test]
fn search_bengo_finds_two_provinces() {
    let r = geo().search("Bengo");
    let names: Vec<_> = r.provinces.iter().map(|p| p.name.as_str()).collect();
    assert_eq!(names, vec!["Bengo", "Icolo e Bengo"]);
}

#[test]
fn search_finds_belas_in_luanda() {
    let r = geo().search("Belas");
    let belas = r.municipalities.iter().find(|m| m.name == "Belas").expect("Belas");
    assert_eq!(belas.province, "Luanda");
    assert_eq!(belas.province_capital, "Ingombota");
}

#[test]
fn search_is_case_insensitive() {
    let geo = geo();
    for term in ["luanda", "bengo", "ca", "Kilamba"] {
        let a = geo.search(term);
        let b = geo.search(&term.to_uppercase());
        assert_eq!(a.provinces.len(), b.provinces.len(), "{term}");
        assert_eq!(a.municipalities.len(), b.municipalities.len(), "{term}");
        assert_eq!(a.communes.len(), b.communes.len(), "{term}");
    }
}

#[test]
fn empty_search_returns_everything_once() {
    let geo = geo();
    let r = geo.search("");

    let provinces = geo.list_provinces();
    assert_eq!(r.provinces.len(), provinces.len());

    let municipality_total: usize = provinces.iter().map(|p| p.municipalities.len()).sum();
    assert_eq!(r.municipalities.len(), municipality_total);

    let commune_total: usize = provinces
        .iter()
        .flat_map(|p| &p.municipalities)
        .map(|m| m.communes.len())
        .sum();
    assert_eq!(r.communes.len(), commune_total);

    let triples: HashSet<_> = r
        .communes
        .iter()
        .map(|c| (&c.province, &c.municipality, &c.name))
        .collect();
    assert_eq!(triples.len(), commune_total);
}

#[test]
fn search_commune_carries_parents() {
    let r = geo().search("ilha de luanda");
    assert_eq!(r.communes.len(), 1);
    assert_eq!(r.communes[0].municipality, "Ingombota");
    assert_eq!(r.communes[0].province, "Luanda");
}

// ── data sources ─────────────────────────────────────────────────────────────

#[test]
fn path_and_embedded_sources_agree() {
    let path = concat!(env!("CARGO_MANIFEST_DIR"), "/data/divisions.json");
    let from_file = AngolaGeo::new(DataSource::Path(path.into())).unwrap();
    let shipped = geo();
    assert_eq!(from_file.metadata(), shipped.metadata());
    assert_eq!(from_file.list_provinces(), shipped.list_provinces());
}

#[test]
fn missing_data_file_fails_construction() {
    let err = AngolaGeo::new(DataSource::Path("/nonexistent/divisions.json".into())).unwrap_err();
    assert!(matches!(err, GeoError::DataSource(_)));
}

#[test]
fn shared_across_threads() {
    let geo = std::sync::Arc::new(geo());
    let handles: Vec<_> = (0..4)
        .map(|_| {
            let geo = std::sync::Arc::clone(&geo);
            std::thread::spawn(move || geo.search("a").total())
        })
        .collect();
    let totals: Vec<_> = handles.into_iter().map(|h| h.join().unwrap()).collect();
    assert!(totals.windows(2).all(|w| w[0] == w[1]));
}
