use serde::{Deserialize, Serialize};

/// Space agency
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Agency {
    pub id: i64,
    pub name: String,
    pub country: Option<String>,
    pub website: Option<String>,
}

impl Agency {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            country: None,
            website: None,
        }
    }
}

/// Geophysical measurement (e.g. "Sea surface temperature")
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Measurement {
    pub id: i64,
    pub name: String,
    /// Measurement category name
    pub category: Option<String>,
}

impl Measurement {
    pub fn new(id: i64, name: impl Into<String>) -> Self {
        Self {
            id,
            name: name.into(),
            category: None,
        }
    }
}

/// Instrument types listed by the handbook
pub const DEFAULT_INSTRUMENT_TYPES: [&str; 24] = [
    "Atmospheric chemistry",
    "Atmospheric temperature and humidity sounders",
    "Cloud profile and rain radars",
    "Communications",
    "Data collection",
    "Earth radiation budget radiometers",
    "Gravity instruments",
    "High resolution optical imagers",
    "Hyperspectral imagers",
    "Imaging microwave radars",
    "Imaging multi-spectral radiometers (passive microwave)",
    "Imaging multi-spectral radiometers (vis/IR)",
    "In situ",
    "Lidars",
    "Lightning sensors",
    "Magnetic field",
    "Multiple direction/polarisation radiometers",
    "Ocean colour instruments",
    "Other",
    "Precision orbit",
    "Radar altimeters",
    "Scatterometers",
    "Space environment",
    "TBD",
];
