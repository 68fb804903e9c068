//! Categorical orbit vocabularies
//!
//! Each enum knows its handbook spelling (`as_str`, used for persistence), the
//! suffix it contributes to a composite orbit label, and the fixed order in
//! which the classifier tests its values (`ALL`).

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CeosError;

/// Orbit type as published by the handbook
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum OrbitType {
    Geostationary,
    SunSynchronous,
    InclinedNonSunSynchronous,
    HighlyElliptical,
    /// Announced but not yet decided
    Tbd,
    /// Any other published value, kept verbatim
    Other(String),
}

impl OrbitType {
    pub fn as_str(&self) -> &str {
        match self {
            OrbitType::Geostationary => "Geostationary",
            OrbitType::SunSynchronous => "Sun-synchronous",
            OrbitType::InclinedNonSunSynchronous => "Inclined non-sun-synchronous",
            OrbitType::HighlyElliptical => "Highly elliptical",
            OrbitType::Tbd => "TBD",
            OrbitType::Other(raw) => raw,
        }
    }

    /// Whether the mission counts towards the classifier population.
    pub fn is_known(&self) -> bool {
        !matches!(self, OrbitType::Tbd)
    }

    /// Parse an optional handbook value; blank text means "no orbit data".
    pub fn parse_optional(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return None;
        }
        trimmed.parse().ok()
    }
}

impl FromStr for OrbitType {
    type Err = CeosError;

    /// Never fails for non-blank input: unrecognised values become `Other`.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        if trimmed.is_empty() {
            return Err(CeosError::UnknownCategory {
                attribute: "orbit_type",
                value: s.to_string(),
            });
        }
        let normalized = trimmed.to_ascii_lowercase().replace(',', "");
        let parsed = match normalized.as_str() {
            "geostationary" => OrbitType::Geostationary,
            "sun-synchronous" => OrbitType::SunSynchronous,
            "inclined non-sun-synchronous" => OrbitType::InclinedNonSunSynchronous,
            "highly elliptical" => OrbitType::HighlyElliptical,
            "tbd" => OrbitType::Tbd,
            _ => OrbitType::Other(trimmed.to_string()),
        };
        Ok(parsed)
    }
}

impl fmt::Display for OrbitType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inclination band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum InclinationClass {
    Equatorial,
    NearEquatorial,
    MidLatitude,
    NearPolar,
    Polar,
}

impl InclinationClass {
    /// Classifier test order
    pub const ALL: [InclinationClass; 5] = [
        InclinationClass::Equatorial,
        InclinationClass::NearEquatorial,
        InclinationClass::MidLatitude,
        InclinationClass::NearPolar,
        InclinationClass::Polar,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            InclinationClass::Equatorial => "Equatorial",
            InclinationClass::NearEquatorial => "Near Equatorial",
            InclinationClass::MidLatitude => "Mid Latitude",
            InclinationClass::NearPolar => "Near Polar",
            InclinationClass::Polar => "Polar",
        }
    }

    pub fn label_suffix(&self) -> &'static str {
        match self {
            InclinationClass::Equatorial => "Eq",
            InclinationClass::NearEquatorial => "NearEq",
            InclinationClass::MidLatitude => "MidLat",
            InclinationClass::NearPolar => "NearPo",
            InclinationClass::Polar => "Po",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_label_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label_suffix() == suffix)
    }
}

impl FromStr for InclinationClass {
    type Err = CeosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let compact: String = s.split_whitespace().collect::<String>().to_ascii_lowercase();
        match compact.as_str() {
            "equatorial" => Ok(InclinationClass::Equatorial),
            "nearequatorial" => Ok(InclinationClass::NearEquatorial),
            "midlatitude" => Ok(InclinationClass::MidLatitude),
            "nearpolar" => Ok(InclinationClass::NearPolar),
            "polar" => Ok(InclinationClass::Polar),
            _ => Err(CeosError::UnknownCategory {
                attribute: "orbit_inclination_class",
                value: s.to_string(),
            }),
        }
    }
}

/// Altitude band
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum AltitudeClass {
    VeryLow,
    Low,
    Medium,
    High,
    VeryHigh,
}

impl AltitudeClass {
    /// Classifier test order
    pub const ALL: [AltitudeClass; 5] = [
        AltitudeClass::VeryLow,
        AltitudeClass::Low,
        AltitudeClass::Medium,
        AltitudeClass::High,
        AltitudeClass::VeryHigh,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AltitudeClass::VeryLow => "VL",
            AltitudeClass::Low => "L",
            AltitudeClass::Medium => "M",
            AltitudeClass::High => "H",
            AltitudeClass::VeryHigh => "VH",
        }
    }

    pub fn label_suffix(&self) -> &'static str {
        self.as_str()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_label_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label_suffix() == suffix)
    }
}

impl FromStr for AltitudeClass {
    type Err = CeosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CeosError::UnknownCategory {
                attribute: "orbit_altitude_class",
                value: s.to_string(),
            })
    }
}

/// Local solar time class of a sun-synchronous orbit
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum LstClass {
    DawnDusk,
    Am,
    Noon,
    Pm,
}

impl LstClass {
    pub const ALL: [LstClass; 4] = [LstClass::DawnDusk, LstClass::Am, LstClass::Noon, LstClass::Pm];

    /// Classifier test order; a later admitted class overrides an earlier one.
    pub const TEST_ORDER: [LstClass; 4] = [LstClass::DawnDusk, LstClass::Am, LstClass::Noon, LstClass::Pm];

    pub fn as_str(&self) -> &'static str {
        match self {
            LstClass::DawnDusk => "DD",
            LstClass::Am => "AM",
            LstClass::Noon => "Noon",
            LstClass::Pm => "PM",
        }
    }

    pub fn label_suffix(&self) -> &'static str {
        self.as_str()
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_label_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label_suffix() == suffix)
    }
}

impl FromStr for LstClass {
    type Err = CeosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CeosError::UnknownCategory {
                attribute: "orbit_lst_class",
                value: s.to_string(),
            })
    }
}

/// Repeat cycle class; a mission without one has no class at all
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum RepeatCycleClass {
    Short,
    Long,
}

impl RepeatCycleClass {
    pub fn as_str(&self) -> &'static str {
        match self {
            RepeatCycleClass::Short => "Short",
            RepeatCycleClass::Long => "Long",
        }
    }
}

impl FromStr for RepeatCycleClass {
    type Err = CeosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "short" => Ok(RepeatCycleClass::Short),
            "long" => Ok(RepeatCycleClass::Long),
            _ => Err(CeosError::UnknownCategory {
                attribute: "repeat_cycle_class",
                value: s.to_string(),
            }),
        }
    }
}
