//! Seed parser with validation
//!
//! Parses YAML and validates schema version, id uniqueness, and referential
//! integrity. With a database connection, references may also point at
//! records imported by an earlier seed.

use crate::errors::{seed_error, seed_validation, Result};
use crate::repo::{CatalogTable, SqliteRepo};
use crate::seed::format_v0::SeedV0;
use ceosdb_core::model::DEFAULT_INSTRUMENT_TYPES;
use ceosdb_core::{CeosError, ExError};
use rusqlite::Connection;
use std::collections::HashSet;
use std::fs;
use std::path::Path;

/// Parse a seed file from a path
pub fn parse_seed_file(path: &Path) -> Result<SeedV0> {
    parse_seed_file_with_db(path, None)
}

/// Parse a seed file from a path with optional database context for cross-seed validation
pub fn parse_seed_file_with_db(path: &Path, conn: Option<&Connection>) -> Result<SeedV0> {
    let content = fs::read_to_string(path).map_err(|e| {
        seed_validation(&format!("Failed to read seed file: {}", e))
            .with_entity_id(path.display().to_string())
    })?;

    parse_seed_str_with_db(&content, conn)
}

/// Parse a seed from a string
pub fn parse_seed_str(content: &str) -> Result<SeedV0> {
    parse_seed_str_with_db(content, None)
}

/// Parse a seed from a string with optional database context for cross-seed validation
pub fn parse_seed_str_with_db(content: &str, conn: Option<&Connection>) -> Result<SeedV0> {
    let seed: SeedV0 = serde_yaml::from_str(content)
        .map_err(|e| seed_validation(&format!("YAML parse error: {}", e)))?;

    validate_seed(&seed, conn)?;

    Ok(seed)
}

/// Ids declared by the seed, with the database as fallback
struct KnownIds<'a> {
    seed: HashSet<i64>,
    table: CatalogTable,
    conn: Option<&'a Connection>,
}

impl KnownIds<'_> {
    fn contains(&self, id: i64) -> Result<bool> {
        if self.seed.contains(&id) {
            return Ok(true);
        }
        match self.conn {
            Some(conn) => SqliteRepo::exists(conn, self.table, id),
            None => Ok(false),
        }
    }
}

fn unique_ids(entity: &'static str, ids: impl Iterator<Item = i64>) -> Result<HashSet<i64>> {
    let mut seen = HashSet::new();
    for id in ids {
        if !seen.insert(id) {
            return Err(seed_error(CeosError::DuplicateId {
                entity,
                id: id.to_string(),
            }));
        }
    }
    Ok(seen)
}

fn dangling(
    entity: &'static str,
    id: i64,
    target: &'static str,
    target_id: impl ToString,
) -> ExError {
    seed_error(CeosError::DanglingReference {
        entity,
        id: id.to_string(),
        target,
        target_id: target_id.to_string(),
    })
}

/// Validate a parsed seed
fn validate_seed(seed: &SeedV0, conn: Option<&Connection>) -> Result<()> {
    if seed.schema_version != 0 {
        return Err(seed_validation(&format!(
            "Unsupported schema_version: {}. Expected 0",
            seed.schema_version
        )));
    }

    let agencies = KnownIds {
        seed: unique_ids("agency", seed.agencies.iter().map(|a| a.id))?,
        table: CatalogTable::Agencies,
        conn,
    };
    let measurements = KnownIds {
        seed: unique_ids("measurement", seed.measurements.iter().map(|m| m.id))?,
        table: CatalogTable::Measurements,
        conn,
    };
    let missions = KnownIds {
        seed: unique_ids("mission", seed.missions.iter().map(|m| m.id))?,
        table: CatalogTable::Missions,
        conn,
    };
    unique_ids("instrument", seed.instruments.iter().map(|i| i.id))?;

    for name in &seed.instrument_types {
        if name.trim().is_empty() {
            return Err(seed_validation("Instrument type name must not be blank"));
        }
    }
    let types: HashSet<&str> = DEFAULT_INSTRUMENT_TYPES
        .iter()
        .copied()
        .chain(seed.instrument_types.iter().map(String::as_str))
        .collect();

    for mission in &seed.missions {
        for &agency_id in &mission.agencies {
            if !agencies.contains(agency_id)? {
                return Err(dangling("mission", mission.id, "agency", agency_id));
            }
        }
    }

    for instrument in &seed.instruments {
        for &mission_id in &instrument.missions {
            if !missions.contains(mission_id)? {
                return Err(dangling("instrument", instrument.id, "mission", mission_id));
            }
        }
        for &measurement_id in &instrument.measurements {
            if !measurements.contains(measurement_id)? {
                return Err(dangling(
                    "instrument",
                    instrument.id,
                    "measurement",
                    measurement_id,
                ));
            }
        }
        for &agency_id in &instrument.agencies {
            if !agencies.contains(agency_id)? {
                return Err(dangling("instrument", instrument.id, "agency", agency_id));
            }
        }
        for type_name in &instrument.types {
            let registered = types.contains(type_name.as_str())
                || match conn {
                    Some(conn) => SqliteRepo::instrument_type_exists(conn, type_name)?,
                    None => false,
                };
            if !registered {
                return Err(dangling(
                    "instrument",
                    instrument.id,
                    "instrument type",
                    type_name,
                ));
            }
        }
    }

    Ok(())
}
