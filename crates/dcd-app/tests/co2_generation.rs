//! End-to-end CO2 emissions generation against in-memory and file stores.

use dcd_app::{AppError, Co2EmissionsGenerator, Settings, open_store};
use dcd_core::{CaseId, TimeSeries, Tolerances, nearly_equal, new_id};
use dcd_model::{
    DrainageStrategy, Profile, ProjectDocument, Well, WellCategory, WellProjectWell,
};
use dcd_store::{DrainageStrategyPersist, FileStore, MemoryStore, StoreError, StoreResult};

/// A starter document with production in 2020 and one well drilled that year.
///
/// Facility emissions are 60 kg (flaring 50, losses 10) and drilling adds
/// 3 wells * 10 days * 5 t.
fn producing_document() -> ProjectDocument {
    let mut doc = ProjectDocument::starter("Field", 2030);
    let project = &mut doc.project;
    project.flared_gas_per_produced_volume = 1.0;
    project.co2_emissions_from_flared_gas = 1.0;
    project.co2_removed_from_gas = 0.001;
    project.co2_vented = 1.0;
    project.average_development_drilling_days = 10.0;
    project.daily_emission_from_drilling_rig = 5.0;

    let strategy = &mut doc.drainage_strategies[0];
    strategy.production_profile_oil = Some(Profile::new(TimeSeries::new(2020, vec![40.0])));
    strategy.production_profile_gas = Some(Profile::new(TimeSeries::new(2020, vec![10_000.0])));

    let well = Well {
        id: new_id(),
        name: "A-1".to_string(),
        category: WellCategory::OilProducer,
        drilling_days: 10.0,
        well_cost: 0.0,
    };
    doc.well_projects[0].wells.push(WellProjectWell {
        well_id: well.id,
        drilling_schedule: Some(TimeSeries::new(2020, vec![3])),
    });
    doc.wells.push(well);
    doc
}

#[test]
fn generates_and_persists_total_emissions() {
    let doc = producing_document();
    let case_id = doc.cases[0].id;
    let store = MemoryStore::new(doc);

    let dto = Co2EmissionsGenerator::from_repository(&store)
        .generate(case_id)
        .unwrap();

    assert_eq!(dto.start_year, 2020);
    assert_eq!(dto.values.len(), 1);
    assert!(nearly_equal(dto.values[0], 150.06, Tolerances::default()));

    let stored = store.snapshot().drainage_strategies[0]
        .co2_emissions
        .clone()
        .unwrap();
    assert_eq!(stored.id, dto.id);
    assert_eq!(stored.series, dto.series());
    assert_eq!(store.write_count(), 1);
}

#[test]
fn regenerating_is_idempotent() {
    let doc = producing_document();
    let case_id = doc.cases[0].id;
    let store = MemoryStore::new(doc);
    let generator = Co2EmissionsGenerator::from_repository(&store);

    let first = generator.generate(case_id).unwrap();
    let after_first = store.snapshot().drainage_strategies[0].clone();
    let second = generator.generate(case_id).unwrap();
    let after_second = store.snapshot().drainage_strategies[0].clone();

    assert_eq!(first, second);
    assert_eq!(after_first, after_second);
}

#[test]
fn missing_case_writes_nothing() {
    let store = MemoryStore::new(producing_document());
    let err = Co2EmissionsGenerator::from_repository(&store)
        .generate(new_id())
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { entity: "case", .. }));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn missing_well_project_writes_nothing() {
    let mut doc = producing_document();
    let case_id = doc.cases[0].id;
    doc.well_projects.clear();
    let store = MemoryStore::new(doc);

    let err = Co2EmissionsGenerator::from_repository(&store)
        .generate(case_id)
        .unwrap_err();

    assert!(matches!(
        err,
        AppError::NotFound {
            entity: "well project",
            ..
        }
    ));
    assert!(store.snapshot().drainage_strategies[0].co2_emissions.is_none());
    assert_eq!(store.write_count(), 0);
}

fn assert_not_found_without_writes(doc: ProjectDocument, case_id: CaseId, label: &str) {
    let store = MemoryStore::new(doc);
    let err = Co2EmissionsGenerator::from_repository(&store)
        .generate(case_id)
        .unwrap_err();

    assert!(matches!(err, AppError::NotFound { entity, .. } if entity == label));
    assert_eq!(store.write_count(), 0);
}

#[test]
fn missing_topside_writes_nothing() {
    let mut doc = producing_document();
    let case_id = doc.cases[0].id;
    doc.topsides.clear();
    assert_not_found_without_writes(doc, case_id, "topside");
}

#[test]
fn missing_project_writes_nothing() {
    let mut doc = producing_document();
    let case_id = doc.cases[0].id;
    doc.cases[0].project_id = new_id();
    assert_not_found_without_writes(doc, case_id, "project");
}

#[test]
fn missing_drainage_strategy_writes_nothing() {
    let mut doc = producing_document();
    let case_id = doc.cases[0].id;
    doc.drainage_strategies.clear();
    assert_not_found_without_writes(doc, case_id, "drainage strategy");
}

struct RejectingPersist;

impl DrainageStrategyPersist for RejectingPersist {
    fn save_drainage_strategy(&self, strategy: &DrainageStrategy) -> StoreResult<()> {
        Err(StoreError::Conflict {
            entity: "drainage strategy",
            id: strategy.id,
        })
    }
}

#[test]
fn persistence_failure_is_surfaced_unchanged() {
    let doc = producing_document();
    let case_id = doc.cases[0].id;
    let store = MemoryStore::new(doc);
    let generator = Co2EmissionsGenerator {
        persist: &RejectingPersist,
        ..Co2EmissionsGenerator::from_repository(&store)
    };

    let err = generator.generate(case_id).unwrap_err();
    assert!(matches!(err, AppError::Storage(ref e) if e.is_conflict()));
    assert!(store.snapshot().drainage_strategies[0].co2_emissions.is_none());
}

#[test]
fn no_linked_wells_leaves_facility_emissions_only() {
    let mut doc = producing_document();
    doc.well_projects[0].wells.clear();
    let case_id = doc.cases[0].id;
    let store = MemoryStore::new(doc);

    let dto = Co2EmissionsGenerator::from_repository(&store)
        .generate(case_id)
        .unwrap();
    assert_eq!(dto.start_year, 2020);
    assert!(nearly_equal(dto.values[0], 0.06, Tolerances::default()));
}

#[test]
fn file_store_keeps_generated_emissions() {
    let dir = std::env::temp_dir().join("dcd_app_test_co2_file");
    let _ = std::fs::remove_dir_all(&dir);
    let path = dir.join("field.yaml");
    let doc = producing_document();
    let case_id = doc.cases[0].id;
    let strategy_id = doc.drainage_strategies[0].id;
    FileStore::create(&path, &doc, true).unwrap();

    let settings = Settings::default();
    let store = open_store(&path, &settings).unwrap();
    let dto = Co2EmissionsGenerator::from_repository(&store)
        .generate(case_id)
        .unwrap();

    let reopened = open_store(&path, &settings).unwrap();
    let stored = reopened
        .document()
        .unwrap()
        .drainage_strategy(strategy_id)
        .and_then(|d| d.co2_emissions.clone())
        .unwrap();
    assert_eq!(stored.id, dto.id);
    assert_eq!(stored.series.start_year, 2020);
}
