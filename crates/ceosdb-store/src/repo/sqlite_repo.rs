//! SQLite repository implementation
//!
//! Upserts catalog records by id. Link tables of a mission or instrument are
//! rewritten on every upsert so they always mirror the in-memory record.
//! Every function takes a `&Connection`, so a `&Transaction` works too.

use crate::errors::{from_rusqlite, Result};
use ceosdb_core::model::{Agency, Instrument, Measurement, Mission, OrbitType};
use ceosdb_core::Catalog;
use rusqlite::{params, Connection};

pub(crate) const DATE_FORMAT: &str = "%Y-%m-%d";
pub(crate) const TIME_FORMAT: &str = "%H:%M:%S";

/// SQLite repository for catalog records
pub struct SqliteRepo;

impl SqliteRepo {
    /// Persist an agency
    pub fn persist_agency(conn: &Connection, agency: &Agency) -> Result<()> {
        conn.execute(
            "INSERT INTO agencies (id, name, country, website)
             VALUES (?1, ?2, ?3, ?4)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                country = excluded.country,
                website = excluded.website",
            params![agency.id, agency.name, agency.country, agency.website],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Register an instrument type name
    pub fn persist_instrument_type(conn: &Connection, name: &str) -> Result<()> {
        conn.execute(
            "INSERT OR IGNORE INTO instrument_types (name) VALUES (?1)",
            [name],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Persist a measurement
    pub fn persist_measurement(conn: &Connection, measurement: &Measurement) -> Result<()> {
        conn.execute(
            "INSERT INTO measurements (id, name, category)
             VALUES (?1, ?2, ?3)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                category = excluded.category",
            params![measurement.id, measurement.name, measurement.category],
        )
        .map_err(from_rusqlite)?;
        Ok(())
    }

    /// Persist a mission with its raw orbit values, derived classes and
    /// agency links
    pub fn persist_mission(conn: &Connection, mission: &Mission) -> Result<()> {
        let orbit = &mission.orbit;
        let classes = &mission.classes;
        conn.execute(
            "INSERT INTO missions (
                id, name, full_name, status, launch_date, eol_date, applications,
                orbit_type, orbit_period, orbit_sense, orbit_inclination_deg,
                orbit_altitude_km, orbit_longitude, orbit_lst, repeat_cycle_days,
                orbit_inclination_class, orbit_altitude_class, orbit_lst_class,
                repeat_cycle_class)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11, ?12, ?13, ?14,
                     ?15, ?16, ?17, ?18, ?19)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                full_name = excluded.full_name,
                status = excluded.status,
                launch_date = excluded.launch_date,
                eol_date = excluded.eol_date,
                applications = excluded.applications,
                orbit_type = excluded.orbit_type,
                orbit_period = excluded.orbit_period,
                orbit_sense = excluded.orbit_sense,
                orbit_inclination_deg = excluded.orbit_inclination_deg,
                orbit_altitude_km = excluded.orbit_altitude_km,
                orbit_longitude = excluded.orbit_longitude,
                orbit_lst = excluded.orbit_lst,
                repeat_cycle_days = excluded.repeat_cycle_days,
                orbit_inclination_class = excluded.orbit_inclination_class,
                orbit_altitude_class = excluded.orbit_altitude_class,
                orbit_lst_class = excluded.orbit_lst_class,
                repeat_cycle_class = excluded.repeat_cycle_class",
            params![
                mission.id,
                mission.name,
                mission.full_name,
                mission.status,
                mission.launch_date.map(|d| d.format(DATE_FORMAT).to_string()),
                mission.eol_date.map(|d| d.format(DATE_FORMAT).to_string()),
                mission.applications,
                classes.orbit_type.as_ref().map(OrbitType::as_str),
                orbit.period,
                orbit.sense,
                orbit.inclination_deg,
                orbit.altitude_km,
                orbit.longitude,
                orbit.lst.map(|t| t.format(TIME_FORMAT).to_string()),
                orbit.repeat_cycle_days,
                classes.inclination.map(|c| c.as_str()),
                classes.altitude.map(|c| c.as_str()),
                classes.lst.map(|c| c.as_str()),
                classes.repeat_cycle.map(|c| c.as_str()),
            ],
        )
        .map_err(from_rusqlite)?;

        conn.execute(
            "DELETE FROM mission_agencies WHERE mission_id = ?1",
            [mission.id],
        )
        .map_err(from_rusqlite)?;
        for agency_id in &mission.agency_ids {
            conn.execute(
                "INSERT OR IGNORE INTO mission_agencies (mission_id, agency_id) VALUES (?1, ?2)",
                params![mission.id, agency_id],
            )
            .map_err(from_rusqlite)?;
        }

        Ok(())
    }

    /// Persist an instrument and rewrite its type, measurement, mission and
    /// agency links
    pub fn persist_instrument(conn: &Connection, instrument: &Instrument) -> Result<()> {
        conn.execute(
            "INSERT INTO instruments (id, name, full_name, status, technology)
             VALUES (?1, ?2, ?3, ?4, ?5)
             ON CONFLICT(id) DO UPDATE SET
                name = excluded.name,
                full_name = excluded.full_name,
                status = excluded.status,
                technology = excluded.technology",
            params![
                instrument.id,
                instrument.name,
                instrument.full_name,
                instrument.status,
                instrument.technology,
            ],
        )
        .map_err(from_rusqlite)?;

        for table in [
            "instrument_types_link",
            "instrument_measurements",
            "instrument_missions",
            "instrument_agencies",
        ] {
            conn.execute(
                &format!("DELETE FROM {table} WHERE instrument_id = ?1"),
                [instrument.id],
            )
            .map_err(from_rusqlite)?;
        }

        for type_name in &instrument.types {
            conn.execute(
                "INSERT OR IGNORE INTO instrument_types_link (instrument_id, type_name) VALUES (?1, ?2)",
                params![instrument.id, type_name],
            )
            .map_err(from_rusqlite)?;
        }
        for measurement_id in &instrument.measurement_ids {
            conn.execute(
                "INSERT OR IGNORE INTO instrument_measurements (instrument_id, measurement_id) VALUES (?1, ?2)",
                params![instrument.id, measurement_id],
            )
            .map_err(from_rusqlite)?;
        }
        for mission_id in &instrument.mission_ids {
            conn.execute(
                "INSERT OR IGNORE INTO instrument_missions (instrument_id, mission_id) VALUES (?1, ?2)",
                params![instrument.id, mission_id],
            )
            .map_err(from_rusqlite)?;
        }
        for agency_id in &instrument.agency_ids {
            conn.execute(
                "INSERT OR IGNORE INTO instrument_agencies (instrument_id, agency_id) VALUES (?1, ?2)",
                params![instrument.id, agency_id],
            )
            .map_err(from_rusqlite)?;
        }

        Ok(())
    }

    /// Persist every record of a catalog in dependency order
    ///
    /// Not transactional on its own; callers wrap it in a transaction.
    pub fn persist_catalog(conn: &Connection, catalog: &Catalog) -> Result<()> {
        for agency in catalog.agencies() {
            Self::persist_agency(conn, agency)?;
        }
        for name in catalog.instrument_types() {
            Self::persist_instrument_type(conn, name)?;
        }
        for measurement in catalog.measurements() {
            Self::persist_measurement(conn, measurement)?;
        }
        for mission in catalog.missions() {
            Self::persist_mission(conn, mission)?;
        }
        for instrument in catalog.instruments() {
            Self::persist_instrument(conn, instrument)?;
        }
        Ok(())
    }

    /// Whether a row with `id` exists in one of the id-keyed catalog tables
    pub fn exists(conn: &Connection, table: CatalogTable, id: i64) -> Result<bool> {
        let sql = format!("SELECT COUNT(*) FROM {} WHERE id = ?1", table.as_str());
        let count: i64 = conn
            .query_row(&sql, [id], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(count > 0)
    }

    /// Whether an instrument type name is registered
    pub fn instrument_type_exists(conn: &Connection, name: &str) -> Result<bool> {
        let count: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM instrument_types WHERE name = ?1",
                [name],
                |row| row.get(0),
            )
            .map_err(from_rusqlite)?;
        Ok(count > 0)
    }

    /// Number of rows in one of the id-keyed catalog tables
    pub fn count(conn: &Connection, table: CatalogTable) -> Result<usize> {
        let sql = format!("SELECT COUNT(*) FROM {}", table.as_str());
        let count: i64 = conn
            .query_row(&sql, [], |row| row.get(0))
            .map_err(from_rusqlite)?;
        Ok(usize::try_from(count).unwrap_or_default())
    }
}

/// Catalog tables keyed by an integer id
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CatalogTable {
    Agencies,
    Missions,
    Measurements,
    Instruments,
}

impl CatalogTable {
    pub fn as_str(&self) -> &'static str {
        match self {
            CatalogTable::Agencies => "agencies",
            CatalogTable::Missions => "missions",
            CatalogTable::Measurements => "measurements",
            CatalogTable::Instruments => "instruments",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::open_in_memory;

    #[test]
    fn test_upsert_replaces_fields() {
        let conn = open_in_memory().unwrap();
        let mut agency = Agency::new(1, "ESA");
        SqliteRepo::persist_agency(&conn, &agency).unwrap();
        agency.country = Some("Europe".to_string());
        SqliteRepo::persist_agency(&conn, &agency).unwrap();

        assert_eq!(SqliteRepo::count(&conn, CatalogTable::Agencies).unwrap(), 1);
        let country: Option<String> = conn
            .query_row("SELECT country FROM agencies WHERE id = 1", [], |row| row.get(0))
            .unwrap();
        assert_eq!(country.as_deref(), Some("Europe"));
    }

    #[test]
    fn test_instrument_links_are_rewritten() {
        let conn = open_in_memory().unwrap();
        SqliteRepo::persist_mission(&conn, &Mission::new(1, "A")).unwrap();
        SqliteRepo::persist_mission(&conn, &Mission::new(2, "B")).unwrap();

        let instrument = Instrument::new(10, "ALT").carried_by([1, 2]);
        SqliteRepo::persist_instrument(&conn, &instrument).unwrap();
        let instrument = Instrument::new(10, "ALT").carried_by([2]);
        SqliteRepo::persist_instrument(&conn, &instrument).unwrap();

        let links: i64 = conn
            .query_row(
                "SELECT COUNT(*) FROM instrument_missions WHERE instrument_id = 10",
                [],
                |row| row.get(0),
            )
            .unwrap();
        assert_eq!(links, 1);
    }

    #[test]
    fn test_foreign_keys_are_enforced() {
        let conn = open_in_memory().unwrap();
        let instrument = Instrument::new(10, "ALT").carried_by([404]);
        let err = SqliteRepo::persist_instrument(&conn, &instrument).unwrap_err();
        assert_eq!(err.code(), "ERR_PERSISTENCE");
    }
}
