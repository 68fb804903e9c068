//! Hydration layer - loads the catalog from SQLite
//!
//! Rows are read in id order and link lists in ascending order so a reload
//! always yields the same catalog. Stored class columns are taken as-is; they
//! are not re-derived from the raw values.

use crate::errors::{corrupt_row, from_rusqlite, Result};
use crate::repo::sqlite_repo::{DATE_FORMAT, TIME_FORMAT};
use ceosdb_core::model::{
    Agency, Instrument, Measurement, Mission, OrbitClasses, OrbitDetails, OrbitType,
};
use ceosdb_core::Catalog;
use chrono::{NaiveDate, NaiveTime};
use rusqlite::{Connection, OptionalExtension, Row};
use std::collections::BTreeMap;
use std::str::FromStr;

/// Load the full catalog
pub fn load_catalog(conn: &Connection) -> Result<Catalog> {
    let mut catalog = Catalog::new();

    for name in load_instrument_types(conn)? {
        catalog.insert_instrument_type(name);
    }
    for agency in load_agencies(conn)? {
        catalog.insert_agency(agency);
    }
    for measurement in load_measurements(conn)? {
        catalog.insert_measurement(measurement);
    }
    for mission in load_missions(conn)? {
        catalog.insert_mission(mission);
    }
    for instrument in load_instruments(conn)? {
        catalog.insert_instrument(instrument);
    }

    Ok(catalog)
}

/// Load a single mission, if present
pub fn load_mission(conn: &Connection, mission_id: i64) -> Result<Option<Mission>> {
    let row = conn
        .query_row(
            &format!("{MISSION_SELECT} WHERE id = ?1"),
            [mission_id],
            MissionRow::from_row,
        )
        .optional()
        .map_err(from_rusqlite)?;
    let Some(row) = row else {
        return Ok(None);
    };

    let mut stmt = conn
        .prepare("SELECT agency_id FROM mission_agencies WHERE mission_id = ?1 ORDER BY agency_id")
        .map_err(from_rusqlite)?;
    let agency_ids = stmt
        .query_map([mission_id], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<i64>, _>>()
        .map_err(from_rusqlite)?;

    row.into_mission(agency_ids).map(Some)
}

fn load_instrument_types(conn: &Connection) -> Result<Vec<String>> {
    let mut stmt = conn
        .prepare("SELECT name FROM instrument_types ORDER BY name")
        .map_err(from_rusqlite)?;
    let names = stmt
        .query_map([], |row| row.get(0))
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<String>, _>>()
        .map_err(from_rusqlite)?;
    Ok(names)
}

fn load_agencies(conn: &Connection) -> Result<Vec<Agency>> {
    let mut stmt = conn
        .prepare("SELECT id, name, country, website FROM agencies ORDER BY id")
        .map_err(from_rusqlite)?;
    let agencies = stmt
        .query_map([], |row| {
            Ok(Agency {
                id: row.get(0)?,
                name: row.get(1)?,
                country: row.get(2)?,
                website: row.get(3)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(agencies)
}

fn load_measurements(conn: &Connection) -> Result<Vec<Measurement>> {
    let mut stmt = conn
        .prepare("SELECT id, name, category FROM measurements ORDER BY id")
        .map_err(from_rusqlite)?;
    let measurements = stmt
        .query_map([], |row| {
            Ok(Measurement {
                id: row.get(0)?,
                name: row.get(1)?,
                category: row.get(2)?,
            })
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;
    Ok(measurements)
}

const MISSION_SELECT: &str = "SELECT id, name, full_name, status, launch_date, eol_date,
        applications, orbit_type, orbit_period, orbit_sense, orbit_inclination_deg,
        orbit_altitude_km, orbit_longitude, orbit_lst, repeat_cycle_days,
        orbit_inclination_class, orbit_altitude_class, orbit_lst_class, repeat_cycle_class
    FROM missions";

/// Raw mission row before text columns are parsed
struct MissionRow {
    id: i64,
    name: String,
    full_name: Option<String>,
    status: Option<String>,
    launch_date: Option<String>,
    eol_date: Option<String>,
    applications: Option<String>,
    orbit_type: Option<String>,
    orbit_period: Option<String>,
    orbit_sense: Option<String>,
    inclination_deg: Option<f64>,
    altitude_km: Option<f64>,
    longitude: Option<String>,
    lst: Option<String>,
    repeat_cycle_days: Option<f64>,
    inclination_class: Option<String>,
    altitude_class: Option<String>,
    lst_class: Option<String>,
    repeat_cycle_class: Option<String>,
}

impl MissionRow {
    fn from_row(row: &Row<'_>) -> rusqlite::Result<Self> {
        Ok(Self {
            id: row.get(0)?,
            name: row.get(1)?,
            full_name: row.get(2)?,
            status: row.get(3)?,
            launch_date: row.get(4)?,
            eol_date: row.get(5)?,
            applications: row.get(6)?,
            orbit_type: row.get(7)?,
            orbit_period: row.get(8)?,
            orbit_sense: row.get(9)?,
            inclination_deg: row.get(10)?,
            altitude_km: row.get(11)?,
            longitude: row.get(12)?,
            lst: row.get(13)?,
            repeat_cycle_days: row.get(14)?,
            inclination_class: row.get(15)?,
            altitude_class: row.get(16)?,
            lst_class: row.get(17)?,
            repeat_cycle_class: row.get(18)?,
        })
    }

    fn into_mission(self, agency_ids: Vec<i64>) -> Result<Mission> {
        let id = self.id;
        let orbit_type = self.orbit_type.as_deref().and_then(OrbitType::parse_optional);

        let orbit = OrbitDetails {
            orbit_type: orbit_type.clone(),
            period: self.orbit_period,
            sense: self.orbit_sense,
            inclination_deg: self.inclination_deg,
            altitude_km: self.altitude_km,
            longitude: self.longitude,
            lst: parse_column(id, "orbit_lst", self.lst, |s| {
                NaiveTime::parse_from_str(s, TIME_FORMAT).map_err(|e| e.to_string())
            })?,
            repeat_cycle_days: self.repeat_cycle_days,
        };
        let classes = OrbitClasses {
            orbit_type,
            inclination: parse_class(id, "orbit_inclination_class", self.inclination_class)?,
            altitude: parse_class(id, "orbit_altitude_class", self.altitude_class)?,
            lst: parse_class(id, "orbit_lst_class", self.lst_class)?,
            repeat_cycle: parse_class(id, "repeat_cycle_class", self.repeat_cycle_class)?,
        };

        let mut mission = Mission::new(id, self.name);
        mission.full_name = self.full_name;
        mission.status = self.status;
        mission.launch_date = parse_column(id, "launch_date", self.launch_date, parse_date)?;
        mission.eol_date = parse_column(id, "eol_date", self.eol_date, parse_date)?;
        mission.applications = self.applications;
        mission.agency_ids = agency_ids;
        mission.orbit = orbit;
        mission.classes = classes;
        Ok(mission)
    }
}

fn parse_date(text: &str) -> std::result::Result<NaiveDate, String> {
    NaiveDate::parse_from_str(text, DATE_FORMAT).map_err(|e| e.to_string())
}

fn parse_column<T>(
    mission_id: i64,
    column: &str,
    value: Option<String>,
    parse: impl Fn(&str) -> std::result::Result<T, String>,
) -> Result<Option<T>> {
    value
        .map(|text| {
            parse(&text).map_err(|reason| {
                corrupt_row("missions", mission_id, &format!("{column} {text:?}: {reason}"))
            })
        })
        .transpose()
}

fn parse_class<T: FromStr>(mission_id: i64, column: &str, value: Option<String>) -> Result<Option<T>>
where
    T::Err: std::fmt::Display,
{
    parse_column(mission_id, column, value, |text| {
        text.parse::<T>().map_err(|e| e.to_string())
    })
}

fn load_missions(conn: &Connection) -> Result<Vec<Mission>> {
    let agency_links = load_links(
        conn,
        "SELECT mission_id, agency_id FROM mission_agencies ORDER BY mission_id, agency_id",
    )?;

    let mut stmt = conn
        .prepare(&format!("{MISSION_SELECT} ORDER BY id"))
        .map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], MissionRow::from_row)
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    rows.into_iter()
        .map(|row| {
            let agency_ids = agency_links.get(&row.id).cloned().unwrap_or_default();
            row.into_mission(agency_ids)
        })
        .collect()
}

fn load_instruments(conn: &Connection) -> Result<Vec<Instrument>> {
    let mut types: BTreeMap<i64, Vec<String>> = BTreeMap::new();
    {
        let mut stmt = conn
            .prepare(
                "SELECT instrument_id, type_name FROM instrument_types_link
                 ORDER BY instrument_id, type_name",
            )
            .map_err(from_rusqlite)?;
        let rows = stmt
            .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, String>(1)?)))
            .map_err(from_rusqlite)?;
        for row in rows {
            let (instrument_id, type_name) = row.map_err(from_rusqlite)?;
            types.entry(instrument_id).or_default().push(type_name);
        }
    }
    let measurements = load_links(
        conn,
        "SELECT instrument_id, measurement_id FROM instrument_measurements
         ORDER BY instrument_id, measurement_id",
    )?;
    let missions = load_links(
        conn,
        "SELECT instrument_id, mission_id FROM instrument_missions
         ORDER BY instrument_id, mission_id",
    )?;
    let agencies = load_links(
        conn,
        "SELECT instrument_id, agency_id FROM instrument_agencies
         ORDER BY instrument_id, agency_id",
    )?;

    let mut stmt = conn
        .prepare("SELECT id, name, full_name, status, technology FROM instruments ORDER BY id")
        .map_err(from_rusqlite)?;
    let instruments = stmt
        .query_map([], |row| {
            let mut instrument = Instrument::new(row.get(0)?, row.get::<_, String>(1)?);
            instrument.full_name = row.get(2)?;
            instrument.status = row.get(3)?;
            instrument.technology = row.get(4)?;
            Ok(instrument)
        })
        .map_err(from_rusqlite)?
        .collect::<std::result::Result<Vec<_>, _>>()
        .map_err(from_rusqlite)?;

    Ok(instruments
        .into_iter()
        .map(|mut instrument| {
            let id = instrument.id;
            instrument.types = types.get(&id).cloned().unwrap_or_default();
            instrument.measurement_ids = measurements.get(&id).cloned().unwrap_or_default();
            instrument.mission_ids = missions.get(&id).cloned().unwrap_or_default();
            instrument.agency_ids = agencies.get(&id).cloned().unwrap_or_default();
            instrument
        })
        .collect())
}

/// Group a two-column integer link table by its first column
fn load_links(conn: &Connection, sql: &str) -> Result<BTreeMap<i64, Vec<i64>>> {
    let mut stmt = conn.prepare(sql).map_err(from_rusqlite)?;
    let rows = stmt
        .query_map([], |row| Ok((row.get::<_, i64>(0)?, row.get::<_, i64>(1)?)))
        .map_err(from_rusqlite)?;

    let mut links: BTreeMap<i64, Vec<i64>> = BTreeMap::new();
    for row in rows {
        let (owner, target) = row.map_err(from_rusqlite)?;
        links.entry(owner).or_default().push(target);
    }
    Ok(links)
}
