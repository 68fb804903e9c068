//! Seed Format v0 schema
//!
//! Defines the YAML structure for catalog import. Missions carry the raw
//! handbook values; classes are derived at import.

use crate::errors::{seed_error, seed_validation, Result};
use crate::repo::sqlite_repo::DATE_FORMAT;
use ceosdb_core::model::derive::{parse_lst, parse_quantity};
use ceosdb_core::model::{Agency, Instrument, Measurement, Mission, OrbitDetails, OrbitType};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Top-level seed file structure
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedV0 {
    /// Schema version (must be 0 for this format)
    pub schema_version: u32,

    #[serde(default)]
    pub agencies: Vec<SeedAgency>,

    /// Instrument type names beyond the built-in defaults
    #[serde(default)]
    pub instrument_types: Vec<String>,

    #[serde(default)]
    pub measurements: Vec<SeedMeasurement>,

    #[serde(default)]
    pub missions: Vec<SeedMission>,

    #[serde(default)]
    pub instruments: Vec<SeedInstrument>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedAgency {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub country: Option<String>,
    #[serde(default)]
    pub website: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMeasurement {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
}

/// Mission definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedMission {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    /// `YYYY-MM-DD`
    #[serde(default)]
    pub launch_date: Option<String>,
    #[serde(default)]
    pub eol_date: Option<String>,
    #[serde(default)]
    pub applications: Option<String>,
    /// Owning agency ids
    #[serde(default)]
    pub agencies: Vec<i64>,
    #[serde(default)]
    pub orbit: SeedOrbit,
}

/// Raw orbit values as published
///
/// Numeric fields accept either a number or handbook text such as
/// `"705 km"`; both are normalized to text here and parsed at import.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SeedOrbit {
    #[serde(default, rename = "type")]
    pub orbit_type: Option<String>,
    #[serde(default)]
    pub period: Option<String>,
    #[serde(default)]
    pub sense: Option<String>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub inclination: Option<String>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub altitude: Option<String>,
    #[serde(default)]
    pub longitude: Option<String>,
    #[serde(default)]
    pub lst: Option<String>,
    #[serde(default, deserialize_with = "deserialize_quantity")]
    pub repeat_cycle: Option<String>,
}

/// Instrument definition in seed
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SeedInstrument {
    pub id: i64,
    pub name: String,
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub technology: Option<String>,
    /// Instrument type names
    #[serde(default)]
    pub types: Vec<String>,
    /// Measurement ids
    #[serde(default)]
    pub measurements: Vec<i64>,
    /// Carrying mission ids
    #[serde(default)]
    pub missions: Vec<i64>,
    #[serde(default)]
    pub agencies: Vec<i64>,
}

impl SeedAgency {
    pub fn to_agency(&self) -> Agency {
        Agency {
            id: self.id,
            name: self.name.clone(),
            country: self.country.clone(),
            website: self.website.clone(),
        }
    }
}

impl SeedMeasurement {
    pub fn to_measurement(&self) -> Measurement {
        Measurement {
            id: self.id,
            name: self.name.clone(),
            category: self.category.clone(),
        }
    }
}

impl SeedMission {
    /// Build the mission, parsing raw values and deriving its orbit classes
    pub fn to_mission(&self) -> Result<Mission> {
        let mut mission = Mission::new(self.id, self.name.clone()).with_orbit(
            self.orbit
                .to_details()
                .map_err(|e| e.with_entity_id(self.id.to_string()))?,
        );
        mission.full_name = self.full_name.clone();
        mission.status = self.status.clone();
        mission.launch_date = parse_date(self.id, "launch_date", self.launch_date.as_deref())?;
        mission.eol_date = parse_date(self.id, "eol_date", self.eol_date.as_deref())?;
        mission.applications = self.applications.clone();
        mission.agency_ids = self.agencies.clone();
        Ok(mission)
    }
}

impl SeedOrbit {
    pub fn to_details(&self) -> Result<OrbitDetails> {
        Ok(OrbitDetails {
            orbit_type: self.orbit_type.as_deref().and_then(OrbitType::parse_optional),
            period: self.period.clone(),
            sense: self.sense.clone(),
            inclination_deg: optional_quantity("orbit_inclination", self.inclination.as_deref(), "deg")?,
            altitude_km: optional_quantity("orbit_altitude", self.altitude.as_deref(), "km")?,
            longitude: self.longitude.clone(),
            lst: self.lst.as_deref().and_then(parse_lst),
            repeat_cycle_days: optional_quantity("repeat_cycle", self.repeat_cycle.as_deref(), "days")?,
        })
    }
}

impl SeedInstrument {
    pub fn to_instrument(&self) -> Instrument {
        let mut instrument = Instrument::new(self.id, self.name.clone());
        instrument.full_name = self.full_name.clone();
        instrument.status = self.status.clone();
        instrument.technology = self.technology.clone();
        instrument.types = self.types.clone();
        instrument.measurement_ids = self.measurements.clone();
        instrument.mission_ids = self.missions.clone();
        instrument.agency_ids = self.agencies.clone();
        instrument
    }
}

fn optional_quantity(field: &'static str, text: Option<&str>, unit: &str) -> Result<Option<f64>> {
    text.map(|t| parse_quantity(field, t, unit))
        .transpose()
        .map_err(seed_error)
}

fn parse_date(mission_id: i64, field: &str, text: Option<&str>) -> Result<Option<NaiveDate>> {
    text.map(str::trim)
        .filter(|t| !t.is_empty())
        .map(|t| {
            NaiveDate::parse_from_str(t, DATE_FORMAT).map_err(|e| {
                seed_validation(&format!("Invalid {} {:?}: {}", field, t, e))
                    .with_entity_id(mission_id.to_string())
            })
        })
        .transpose()
}

/// Normalize a number-or-text quantity to its text form
fn deserialize_quantity<'de, D>(deserializer: D) -> std::result::Result<Option<String>, D::Error>
where
    D: serde::Deserializer<'de>,
{
    use serde::de::{self, Visitor};
    use std::fmt;

    struct QuantityVisitor;

    impl<'de> Visitor<'de> for QuantityVisitor {
        type Value = Option<String>;

        fn expecting(&self, formatter: &mut fmt::Formatter) -> fmt::Result {
            formatter.write_str("a number or a string such as \"705 km\"")
        }

        fn visit_none<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_unit<E>(self) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(None)
        }

        fn visit_i64<E>(self, value: i64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_u64<E>(self, value: u64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_f64<E>(self, value: f64) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            Ok(Some(value.to_string()))
        }

        fn visit_str<E>(self, value: &str) -> std::result::Result<Self::Value, E>
        where
            E: de::Error,
        {
            let trimmed = value.trim();
            if trimmed.is_empty() {
                Ok(None)
            } else {
                Ok(Some(trimmed.to_string()))
            }
        }
    }

    deserializer.deserialize_any(QuantityVisitor)
}
