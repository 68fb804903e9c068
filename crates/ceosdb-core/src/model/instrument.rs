use serde::{Deserialize, Serialize};

/// Instrument - a sensor carried by one or more missions
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instrument {
    /// Handbook instrument id
    pub id: i64,

    pub name: String,
    pub full_name: Option<String>,
    pub status: Option<String>,

    /// Technology tag (e.g. "Radar altimeter")
    pub technology: Option<String>,

    /// Instrument type names, from the type registry
    pub types: Vec<String>,

    /// Measurement ids
    pub measurement_ids: Vec<i64>,

    /// Missions carrying this instrument
    pub mission_ids: Vec<i64>,

    pub agency_ids: Vec<i64>,
}

impl Instrument {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            full_name: None,
            status: None,
            technology: None,
            types: Vec::new(),
            measurement_ids: Vec::new(),
            mission_ids: Vec::new(),
            agency_ids: Vec::new(),
        }
    }

    pub fn with_technology(mut self, technology: impl Into<String>) -> Self {
        self.technology = Some(technology.into());
        self
    }

    pub fn with_type(mut self, type_name: impl Into<String>) -> Self {
        self.types.push(type_name.into());
        self
    }

    pub fn with_measurement(mut self, measurement_id: i64) -> Self {
        self.measurement_ids.push(measurement_id);
        self
    }

    pub fn carried_by(mut self, mission_ids: impl IntoIterator<Item = i64>) -> Self {
        self.mission_ids.extend(mission_ids);
        self
    }
}
