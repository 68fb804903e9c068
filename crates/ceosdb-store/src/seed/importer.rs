//! Seed importer orchestration
//!
//! Parses and validates a seed, converts its records into catalog models and
//! upserts them in one transaction together with provenance events.

use crate::errors::{from_rusqlite, io_error, Result};
use crate::repo::SqliteRepo;
use crate::seed::format_v0::SeedV0;
use crate::seed::provenance::{emit_applied, emit_completed, emit_started};
use crate::seed::{compute_seed_digest, parse_seed_file_with_db, parse_seed_str_with_db};
use ceosdb_core::model::DEFAULT_INSTRUMENT_TYPES;
use rusqlite::Connection;
use serde::Serialize;
use std::path::{Path, PathBuf};
use tracing::debug;
use uuid::Uuid;

/// Summary of one seed import
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportReport {
    pub seed_digest: String,
    /// Correlation id of the provenance events written by this import
    pub correlation_id: String,
    pub agencies: usize,
    pub instrument_types: usize,
    pub measurements: usize,
    pub missions: usize,
    pub instruments: usize,
}

/// Import a seed file into the database
///
/// 1. Parses and validates the seed (references may resolve against the database)
/// 2. Computes the seed digest
/// 3. Converts raw records, deriving mission orbit classes
/// 4. Upserts everything within one transaction, with provenance events
///
/// On error nothing is written.
pub fn import_seed(path: &Path, conn: &mut Connection) -> Result<ImportReport> {
    let seed = parse_seed_file_with_db(path, Some(&*conn))?;
    import_parsed(&seed, conn)
}

/// Import a seed held in memory
pub fn import_seed_str(content: &str, conn: &mut Connection) -> Result<ImportReport> {
    let seed = parse_seed_str_with_db(content, Some(&*conn))?;
    import_parsed(&seed, conn)
}

/// Resolve a seed path to the files to import
///
/// A file is returned as-is; a directory yields its `.yaml`/`.yml` entries
/// sorted by file name. Subdirectories are not searched.
pub fn seed_files(path: &Path) -> Result<Vec<PathBuf>> {
    if !path.is_dir() {
        return Ok(vec![path.to_path_buf()]);
    }

    let mut files = Vec::new();
    for entry in std::fs::read_dir(path).map_err(|e| io_error("seed_files", e))? {
        let entry_path = entry.map_err(|e| io_error("seed_files", e))?.path();
        let is_yaml = entry_path
            .extension()
            .and_then(|ext| ext.to_str())
            .is_some_and(|ext| ext == "yaml" || ext == "yml");
        if entry_path.is_file() && is_yaml {
            files.push(entry_path);
        }
    }
    files.sort();
    Ok(files)
}

fn import_parsed(seed: &SeedV0, conn: &mut Connection) -> Result<ImportReport> {
    let seed_digest = compute_seed_digest(seed)?;
    let correlation_id = Uuid::now_v7().to_string();

    let agencies: Vec<_> = seed.agencies.iter().map(|a| a.to_agency()).collect();
    let measurements: Vec<_> = seed.measurements.iter().map(|m| m.to_measurement()).collect();
    let missions = seed
        .missions
        .iter()
        .map(|m| m.to_mission())
        .collect::<Result<Vec<_>>>()?;
    let instruments: Vec<_> = seed.instruments.iter().map(|i| i.to_instrument()).collect();

    let tx = conn.transaction().map_err(from_rusqlite)?;

    emit_started(&tx, &correlation_id, &seed_digest)?;

    let type_names: Vec<&str> = DEFAULT_INSTRUMENT_TYPES
        .iter()
        .copied()
        .chain(seed.instrument_types.iter().map(|name| name.trim()))
        .collect();
    for name in &type_names {
        SqliteRepo::persist_instrument_type(&tx, name)?;
    }
    emit_applied(&tx, &correlation_id, "instrument_types", type_names.len())?;

    for agency in &agencies {
        SqliteRepo::persist_agency(&tx, agency)?;
    }
    emit_applied(&tx, &correlation_id, "agencies", agencies.len())?;

    for measurement in &measurements {
        SqliteRepo::persist_measurement(&tx, measurement)?;
    }
    emit_applied(&tx, &correlation_id, "measurements", measurements.len())?;

    for mission in &missions {
        debug!(
            mission_id = mission.id,
            orbit_type = mission.classes.orbit_type.as_ref().map(|t| t.as_str()),
            "persisting mission"
        );
        SqliteRepo::persist_mission(&tx, mission)?;
    }
    emit_applied(&tx, &correlation_id, "missions", missions.len())?;

    for instrument in &instruments {
        SqliteRepo::persist_instrument(&tx, instrument)?;
    }
    emit_applied(&tx, &correlation_id, "instruments", instruments.len())?;

    emit_completed(&tx, &correlation_id, &seed_digest)?;

    tx.commit().map_err(from_rusqlite)?;

    debug!(seed_digest = %seed_digest, "seed import committed");

    Ok(ImportReport {
        seed_digest,
        correlation_id,
        agencies: agencies.len(),
        instrument_types: seed.instrument_types.len(),
        measurements: measurements.len(),
        missions: missions.len(),
        instruments: instruments.len(),
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;
    use crate::repo::CatalogTable;
    use crate::seed::provenance::count_events;

    const SEED: &str = r#"
schema_version: 0
agencies:
  - id: 1
    name: ESA
missions:
  - id: 10
    name: Sentinel-3A
    agencies: [1]
    orbit:
      type: Sun-synchronous
      altitude: "814 km"
instruments:
  - id: 100
    name: SRAL
    technology: Radar altimeter
    types: ["Radar altimeters"]
    missions: [10]
"#;

    #[test]
    fn test_import_writes_records_and_provenance() {
        let mut conn = open_in_memory().unwrap();

        let report = import_seed_str(SEED, &mut conn).unwrap();

        assert_eq!(report.missions, 1);
        assert_eq!(report.instruments, 1);
        assert_eq!(SqliteRepo::count(&conn, CatalogTable::Missions).unwrap(), 1);
        // started + 5 applied + completed
        assert_eq!(count_events(&conn, &report.correlation_id).unwrap(), 7);
    }

    #[test]
    fn test_default_types_always_registered() {
        let mut conn = open_in_memory().unwrap();
        import_seed_str("schema_version: 0\n", &mut conn).unwrap();

        for name in DEFAULT_INSTRUMENT_TYPES {
            assert!(SqliteRepo::instrument_type_exists(&conn, name).unwrap());
        }
    }

    #[test]
    fn test_reimport_is_an_upsert() {
        let mut conn = open_in_memory().unwrap();
        let first = import_seed_str(SEED, &mut conn).unwrap();
        let second = import_seed_str(SEED, &mut conn).unwrap();

        assert_eq!(first.seed_digest, second.seed_digest);
        assert_ne!(first.correlation_id, second.correlation_id);
        assert_eq!(SqliteRepo::count(&conn, CatalogTable::Missions).unwrap(), 1);
        assert_eq!(SqliteRepo::count(&conn, CatalogTable::Instruments).unwrap(), 1);
    }

    #[test]
    fn test_seed_files_sorted_yaml_only() {
        let dir = tempfile::tempdir().unwrap();
        for name in ["b.yml", "a.yaml", "notes.txt"] {
            std::fs::write(dir.path().join(name), "schema_version: 0\n").unwrap();
        }

        let files = seed_files(dir.path()).unwrap();
        let names: Vec<_> = files
            .iter()
            .map(|p| p.file_name().unwrap().to_str().unwrap().to_string())
            .collect();
        assert_eq!(names, vec!["a.yaml", "b.yml"]);
    }

    #[test]
    fn test_bad_quantity_writes_nothing() {
        let mut conn = open_in_memory().unwrap();
        let yaml = r#"
schema_version: 0
missions:
  - id: 10
    name: Broken
    orbit:
      altitude: "very high"
"#;

        assert!(import_seed_str(yaml, &mut conn).is_err());
        assert_eq!(SqliteRepo::count(&conn, CatalogTable::Missions).unwrap(), 0);
        let events: i64 = conn
            .query_row("SELECT COUNT(*) FROM provenance_events", [], |row| row.get(0))
            .unwrap();
        assert_eq!(events, 0);
    }
}
