// Integration tests for persist -> hydrate stability

use ceosdb_core::model::{Agency, Instrument, Measurement, Mission, OrbitDetails, OrbitType};
use ceosdb_core::Catalog;
use ceosdb_store::db::{open, open_in_memory};
use ceosdb_store::repo::hydration::load_catalog;
use ceosdb_store::repo::SqliteRepo;
use chrono::{NaiveDate, NaiveTime};

fn sample_catalog() -> Catalog {
    let mut catalog = Catalog::with_default_types();
    catalog.insert_agency(Agency::new(1, "JAXA"));

    let mut measurement = Measurement::new(3, "Precipitation profile");
    measurement.category = Some("Atmosphere".to_string());
    catalog.insert_measurement(measurement);

    let mut gpm = Mission::new(20, "GPM Core").with_orbit(OrbitDetails {
        orbit_type: Some(OrbitType::InclinedNonSunSynchronous),
        inclination_deg: Some(65.0),
        altitude_km: Some(407.0),
        ..OrbitDetails::default()
    });
    gpm.launch_date = NaiveDate::from_ymd_opt(2014, 2, 27);
    gpm.agency_ids = vec![1];
    catalog.insert_mission(gpm);

    catalog.insert_mission(Mission::new(21, "GCOM-C").with_orbit(OrbitDetails {
        orbit_type: Some(OrbitType::SunSynchronous),
        lst: NaiveTime::from_hms_opt(10, 30, 0),
        altitude_km: Some(798.0),
        repeat_cycle_days: Some(34.0),
        ..OrbitDetails::default()
    }));

    catalog.insert_mission(Mission::new(22, "Odd").with_orbit(OrbitDetails {
        orbit_type: Some(OrbitType::Other("Lagrange point".to_string())),
        ..OrbitDetails::default()
    }));

    catalog.insert_instrument(
        Instrument::new(200, "DPR")
            .with_technology("Cloud and precipitation radar")
            .with_type("Cloud profile and rain radars")
            .with_measurement(3)
            .carried_by([20]),
    );
    catalog
}

#[test]
fn test_persist_then_hydrate_is_identical() {
    let conn = open_in_memory().unwrap();
    let catalog = sample_catalog();

    SqliteRepo::persist_catalog(&conn, &catalog).unwrap();
    let hydrated = load_catalog(&conn).unwrap();

    assert_eq!(
        hydrated.missions().collect::<Vec<_>>(),
        catalog.missions().collect::<Vec<_>>()
    );
    assert_eq!(
        hydrated.instruments().collect::<Vec<_>>(),
        catalog.instruments().collect::<Vec<_>>()
    );
    assert_eq!(
        hydrated.instrument_types().collect::<Vec<_>>(),
        catalog.instrument_types().collect::<Vec<_>>()
    );
}

#[test]
fn test_reload_is_stable_on_disk() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("catalog.db");

    {
        let conn = open(&path).unwrap();
        SqliteRepo::persist_catalog(&conn, &sample_catalog()).unwrap();
    }

    let conn = open(&path).unwrap();
    let first = load_catalog(&conn).unwrap();
    let second = load_catalog(&conn).unwrap();

    assert_eq!(
        first.missions().collect::<Vec<_>>(),
        second.missions().collect::<Vec<_>>()
    );
    assert_eq!(first.mission_count(), 3);
}
