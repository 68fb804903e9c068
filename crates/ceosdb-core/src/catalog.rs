//! In-memory catalog of agencies, missions, instruments and registries
//!
//! The catalog is the finalized input population handed over by ingest. It is
//! hydrated from the store (or built directly in tests) and then frozen into a
//! [`MissionAttributeIndex`](crate::index::MissionAttributeIndex).

use std::collections::{BTreeMap, BTreeSet};

use crate::errors::{CeosError, Result};
use crate::model::{Agency, Instrument, Measurement, Mission, DEFAULT_INSTRUMENT_TYPES};

/// Ordered maps keep every listing deterministic.
/// Not thread-safe; built once per run on a single thread.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    agencies: BTreeMap<i64, Agency>,
    missions: BTreeMap<i64, Mission>,
    instruments: BTreeMap<i64, Instrument>,
    measurements: BTreeMap<i64, Measurement>,
    instrument_types: BTreeSet<String>,
}

impl Catalog {
    /// Create an empty catalog with an empty type registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty catalog whose type registry holds the handbook types
    pub fn with_default_types() -> Self {
        let mut catalog = Self::new();
        for name in DEFAULT_INSTRUMENT_TYPES {
            catalog.insert_instrument_type(name);
        }
        catalog
    }

    /// Insert or replace an agency
    pub fn insert_agency(&mut self, agency: Agency) {
        self.agencies.insert(agency.id, agency);
    }

    /// Insert or replace a mission
    pub fn insert_mission(&mut self, mission: Mission) {
        self.missions.insert(mission.id, mission);
    }

    /// Insert or replace an instrument
    pub fn insert_instrument(&mut self, instrument: Instrument) {
        self.instruments.insert(instrument.id, instrument);
    }

    /// Insert or replace a measurement
    pub fn insert_measurement(&mut self, measurement: Measurement) {
        self.measurements.insert(measurement.id, measurement);
    }

    /// Register an instrument type; returns false if it was already known
    pub fn insert_instrument_type(&mut self, name: impl Into<String>) -> bool {
        self.instrument_types.insert(name.into())
    }

    /// Get a mission by id
    ///
    /// # Errors
    ///
    /// Returns `MissionNotFound` if the mission doesn't exist.
    pub fn get_mission(&self, id: i64) -> Result<&Mission> {
        self.missions
            .get(&id)
            .ok_or(CeosError::MissionNotFound { mission_id: id })
    }

    /// Get an instrument by id
    ///
    /// # Errors
    ///
    /// Returns `InstrumentNotFound` if the instrument doesn't exist.
    pub fn get_instrument(&self, id: i64) -> Result<&Instrument> {
        self.instruments
            .get(&id)
            .ok_or(CeosError::InstrumentNotFound { instrument_id: id })
    }

    /// Get a measurement by id
    ///
    /// # Errors
    ///
    /// Returns `MeasurementNotFound` if the measurement doesn't exist.
    pub fn get_measurement(&self, id: i64) -> Result<&Measurement> {
        self.measurements
            .get(&id)
            .ok_or(CeosError::MeasurementNotFound { measurement_id: id })
    }

    pub fn contains_instrument_type(&self, name: &str) -> bool {
        self.instrument_types.contains(name)
    }

    pub fn agencies(&self) -> impl Iterator<Item = &Agency> {
        self.agencies.values()
    }

    /// Missions in id order
    pub fn missions(&self) -> impl Iterator<Item = &Mission> {
        self.missions.values()
    }

    /// Instruments in id order
    pub fn instruments(&self) -> impl Iterator<Item = &Instrument> {
        self.instruments.values()
    }

    /// Measurements in id order
    pub fn measurements(&self) -> impl Iterator<Item = &Measurement> {
        self.measurements.values()
    }

    /// Registered instrument type names, sorted
    pub fn instrument_types(&self) -> impl Iterator<Item = &str> {
        self.instrument_types.iter().map(String::as_str)
    }

    /// Distinct technology tags present on instruments, sorted
    pub fn technologies(&self) -> BTreeSet<&str> {
        self.instruments
            .values()
            .filter_map(|i| i.technology.as_deref())
            .collect()
    }

    pub fn mission_count(&self) -> usize {
        self.missions.len()
    }

    pub fn instrument_count(&self) -> usize {
        self.instruments.len()
    }

    /// Check referential integrity across the catalog
    ///
    /// # Errors
    ///
    /// Returns `DanglingReference` for the first reference (in id order) to a
    /// mission, agency, measurement or instrument type that is not present.
    pub fn validate(&self) -> Result<()> {
        for mission in self.missions.values() {
            for agency_id in &mission.agency_ids {
                if !self.agencies.contains_key(agency_id) {
                    return Err(dangling("mission", mission.id, "agency", agency_id));
                }
            }
        }

        for instrument in self.instruments.values() {
            for mission_id in &instrument.mission_ids {
                if !self.missions.contains_key(mission_id) {
                    return Err(dangling("instrument", instrument.id, "mission", mission_id));
                }
            }
            for measurement_id in &instrument.measurement_ids {
                if !self.measurements.contains_key(measurement_id) {
                    return Err(dangling(
                        "instrument",
                        instrument.id,
                        "measurement",
                        measurement_id,
                    ));
                }
            }
            for type_name in &instrument.types {
                if !self.instrument_types.contains(type_name) {
                    return Err(dangling(
                        "instrument",
                        instrument.id,
                        "instrument type",
                        type_name,
                    ));
                }
            }
            for agency_id in &instrument.agency_ids {
                if !self.agencies.contains_key(agency_id) {
                    return Err(dangling("instrument", instrument.id, "agency", agency_id));
                }
            }
        }

        Ok(())
    }
}

fn dangling(
    entity: &'static str,
    id: i64,
    target: &'static str,
    target_id: impl ToString,
) -> CeosError {
    CeosError::DanglingReference {
        entity,
        id: id.to_string(),
        target,
        target_id: target_id.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_types_registered() {
        let catalog = Catalog::with_default_types();
        assert_eq!(catalog.instrument_types().count(), DEFAULT_INSTRUMENT_TYPES.len());
        assert!(catalog.contains_instrument_type("Lidars"));
    }

    #[test]
    fn test_technologies_are_distinct_and_sorted() {
        let mut catalog = Catalog::new();
        catalog.insert_instrument(Instrument::new(1, "A").with_technology("Radar"));
        catalog.insert_instrument(Instrument::new(2, "B").with_technology("Lidar"));
        catalog.insert_instrument(Instrument::new(3, "C").with_technology("Radar"));
        catalog.insert_instrument(Instrument::new(4, "D"));

        let techs: Vec<_> = catalog.technologies().into_iter().collect();
        assert_eq!(techs, vec!["Lidar", "Radar"]);
    }

    #[test]
    fn test_get_missing_mission() {
        let catalog = Catalog::new();
        assert!(matches!(
            catalog.get_mission(5),
            Err(CeosError::MissionNotFound { mission_id: 5 })
        ));
    }

    #[test]
    fn test_validate_flags_unknown_mission() {
        let mut catalog = Catalog::new();
        catalog.insert_instrument(Instrument::new(1, "ALT").carried_by([42]));
        let err = catalog.validate().unwrap_err();
        assert!(matches!(
            err,
            CeosError::DanglingReference { target: "mission", .. }
        ));
    }

    #[test]
    fn test_validate_flags_unregistered_type() {
        let mut catalog = Catalog::new();
        catalog.insert_mission(Mission::new(1, "SAT"));
        catalog.insert_instrument(
            Instrument::new(1, "ALT")
                .carried_by([1])
                .with_type("Radar altimeters"),
        );
        assert!(catalog.validate().is_err());

        catalog.insert_instrument_type("Radar altimeters");
        assert!(catalog.validate().is_ok());
    }
}
