// Integration tests for catalog seed import

use ceosdb_core::model::{AltitudeClass, LstClass, OrbitType, RepeatCycleClass};
use ceosdb_store::db::open_in_memory;
use ceosdb_store::repo::hydration::{load_catalog, load_mission};
use ceosdb_store::repo::{CatalogTable, SqliteRepo};
use ceosdb_store::seed::{import_seed, parse_seed_file};
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

#[test]
fn test_import_small_catalog() {
    let mut conn = open_in_memory().unwrap();

    let report = import_seed(&fixtures_dir().join("catalog_small.yaml"), &mut conn).unwrap();

    assert_eq!(report.seed_digest.len(), 64);
    assert_eq!(report.missions, 4);
    assert_eq!(report.instruments, 4);
    assert_eq!(SqliteRepo::count(&conn, CatalogTable::Agencies).unwrap(), 2);
    assert!(SqliteRepo::instrument_type_exists(&conn, "Sounding GNSS receivers").unwrap());
}

#[test]
fn test_import_derives_orbit_classes() {
    let mut conn = open_in_memory().unwrap();
    import_seed(&fixtures_dir().join("catalog_small.yaml"), &mut conn).unwrap();

    let sentinel = load_mission(&conn, 10).unwrap().unwrap();
    assert_eq!(sentinel.classes.orbit_type, Some(OrbitType::SunSynchronous));
    assert_eq!(sentinel.classes.altitude, Some(AltitudeClass::High));
    assert_eq!(sentinel.classes.lst, Some(LstClass::Am));
    assert_eq!(sentinel.classes.repeat_cycle, Some(RepeatCycleClass::Long));

    let jason = load_mission(&conn, 11).unwrap().unwrap();
    assert_eq!(
        jason.classes.orbit_type,
        Some(OrbitType::InclinedNonSunSynchronous)
    );
    assert_eq!(jason.agency_ids, vec![1, 2]);

    let future = load_mission(&conn, 13).unwrap().unwrap();
    assert!(!future.has_known_orbit_type());
}

#[test]
fn test_import_failure_rollback() {
    let mut conn = open_in_memory().unwrap();

    let err = import_seed(&fixtures_dir().join("seed_invalid_dangling.yaml"), &mut conn)
        .unwrap_err();
    assert_eq!(err.code(), "ERR_DANGLING_REFERENCE");

    assert_eq!(SqliteRepo::count(&conn, CatalogTable::Missions).unwrap(), 0);
    let prov_count: i64 = conn
        .query_row("SELECT COUNT(*) FROM provenance_events", [], |row| row.get(0))
        .unwrap();
    assert_eq!(prov_count, 0, "Rollback should remove provenance events");
}

#[test]
fn test_cross_seed_references() {
    let mut conn = open_in_memory().unwrap();
    let extension = fixtures_dir().join("seed_extension.yaml");

    // On its own the extension references missing records
    assert!(parse_seed_file(&extension).is_err());

    import_seed(&fixtures_dir().join("catalog_small.yaml"), &mut conn).unwrap();
    import_seed(&extension, &mut conn).unwrap();

    let catalog = load_catalog(&conn).unwrap();
    assert_eq!(catalog.instrument_count(), 5);
    assert_eq!(catalog.get_instrument(104).unwrap().mission_ids, vec![10]);
}

#[test]
fn test_missing_file_is_reported() {
    let mut conn = open_in_memory().unwrap();
    let err = import_seed(&fixtures_dir().join("does_not_exist.yaml"), &mut conn).unwrap_err();
    assert_eq!(err.code(), "ERR_INVALID_INPUT");
}
