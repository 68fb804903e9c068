//! Composite orbit labels
//!
//! A label is a path through the orbit taxonomy. The nesting makes invalid
//! combinations unrepresentable: LST classes only exist under SSO, repeat
//! cycles only exist under an altitude class.
//!
//! The text form joins suffixes with `-`, e.g. `LEO-SSO-DD` or
//! `LEO-NearPo-VL-NRC`.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::errors::CeosError;
use crate::model::{AltitudeClass, InclinationClass, LstClass, RepeatCycleClass};

/// Most common orbit label of a subject group
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(into = "String", try_from = "String")]
pub enum OrbitLabel {
    Geo,
    Heo,
    Leo(LeoRefinement),
}

/// Refinement below LEO
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum LeoRefinement {
    SunSynchronous {
        lst: Option<LstClass>,
    },
    NonSunSynchronous {
        inclination: Option<InclinationClass>,
        altitude: Option<AltitudeRefinement>,
    },
}

/// Altitude class with its optional repeat-cycle refinement
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AltitudeRefinement {
    pub altitude: AltitudeClass,
    pub repeat_cycle: Option<RepeatCycleLabel>,
}

/// Repeat-cycle node of the taxonomy. Unlike [`RepeatCycleClass`] this has a
/// value for missions without a repeat cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum RepeatCycleLabel {
    NoRepeatCycle,
    Short,
    Long,
}

impl RepeatCycleLabel {
    /// Classifier test order
    pub const ALL: [RepeatCycleLabel; 3] = [
        RepeatCycleLabel::NoRepeatCycle,
        RepeatCycleLabel::Short,
        RepeatCycleLabel::Long,
    ];

    pub fn of(class: Option<RepeatCycleClass>) -> Self {
        match class {
            None => RepeatCycleLabel::NoRepeatCycle,
            Some(RepeatCycleClass::Short) => RepeatCycleLabel::Short,
            Some(RepeatCycleClass::Long) => RepeatCycleLabel::Long,
        }
    }

    pub fn matches(&self, class: Option<RepeatCycleClass>) -> bool {
        Self::of(class) == *self
    }

    pub fn label_suffix(&self) -> &'static str {
        match self {
            RepeatCycleLabel::NoRepeatCycle => "NRC",
            RepeatCycleLabel::Short => "SRC",
            RepeatCycleLabel::Long => "LRC",
        }
    }

    pub fn index(&self) -> usize {
        *self as usize
    }

    pub fn from_label_suffix(suffix: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|c| c.label_suffix() == suffix)
    }
}

impl OrbitLabel {
    /// Plain LEO with no admitted refinement
    pub const LEO: OrbitLabel = OrbitLabel::Leo(LeoRefinement::NonSunSynchronous {
        inclination: None,
        altitude: None,
    });

    /// Top-level node: `GEO`, `LEO` or `HEO`
    pub fn top_level(&self) -> &'static str {
        match self {
            OrbitLabel::Geo => "GEO",
            OrbitLabel::Heo => "HEO",
            OrbitLabel::Leo(_) => "LEO",
        }
    }

    /// Number of taxonomy levels in the label, counting the top level
    pub fn depth(&self) -> usize {
        match self {
            OrbitLabel::Geo | OrbitLabel::Heo => 1,
            OrbitLabel::Leo(LeoRefinement::SunSynchronous { lst }) => 2 + usize::from(lst.is_some()),
            OrbitLabel::Leo(LeoRefinement::NonSunSynchronous {
                inclination,
                altitude,
            }) => {
                1 + usize::from(inclination.is_some())
                    + altitude.map_or(0, |a| 1 + usize::from(a.repeat_cycle.is_some()))
            }
        }
    }
}

impl fmt::Display for OrbitLabel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.top_level())?;
        let OrbitLabel::Leo(refinement) = self else {
            return Ok(());
        };
        match refinement {
            LeoRefinement::SunSynchronous { lst } => {
                f.write_str("-SSO")?;
                if let Some(lst) = lst {
                    write!(f, "-{}", lst.label_suffix())?;
                }
            }
            LeoRefinement::NonSunSynchronous {
                inclination,
                altitude,
            } => {
                if let Some(inclination) = inclination {
                    write!(f, "-{}", inclination.label_suffix())?;
                }
                if let Some(altitude) = altitude {
                    write!(f, "-{}", altitude.altitude.label_suffix())?;
                    if let Some(repeat_cycle) = altitude.repeat_cycle {
                        write!(f, "-{}", repeat_cycle.label_suffix())?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl FromStr for OrbitLabel {
    type Err = CeosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = |reason: &str| CeosError::InvalidLabel {
            label: s.to_string(),
            reason: reason.to_string(),
        };

        let mut parts = s.trim().split('-').peekable();
        let top = match parts.next() {
            Some("GEO") => OrbitLabel::Geo,
            Some("HEO") => OrbitLabel::Heo,
            Some("LEO") => OrbitLabel::LEO,
            _ => return Err(invalid("expected GEO, LEO or HEO")),
        };
        if top != OrbitLabel::LEO {
            return match parts.next() {
                None => Ok(top),
                Some(_) => Err(invalid("GEO and HEO have no refinements")),
            };
        }

        if parts.peek() == Some(&"SSO") {
            parts.next();
            let lst = match parts.next() {
                None => None,
                Some(suffix) => Some(
                    LstClass::from_label_suffix(suffix)
                        .ok_or_else(|| invalid("unknown LST class"))?,
                ),
            };
            if parts.next().is_some() {
                return Err(invalid("trailing suffix after LST class"));
            }
            return Ok(OrbitLabel::Leo(LeoRefinement::SunSynchronous { lst }));
        }

        let inclination = parts
            .peek()
            .and_then(|suffix| InclinationClass::from_label_suffix(suffix));
        if inclination.is_some() {
            parts.next();
        }

        let altitude = match parts.next() {
            None => None,
            Some(suffix) => {
                let altitude = AltitudeClass::from_label_suffix(suffix)
                    .ok_or_else(|| invalid("unknown inclination or altitude class"))?;
                let repeat_cycle = match parts.next() {
                    None => None,
                    Some(suffix) => Some(
                        RepeatCycleLabel::from_label_suffix(suffix)
                            .ok_or_else(|| invalid("unknown repeat cycle class"))?,
                    ),
                };
                Some(AltitudeRefinement {
                    altitude,
                    repeat_cycle,
                })
            }
        };
        if parts.next().is_some() {
            return Err(invalid("trailing suffix after repeat cycle"));
        }

        Ok(OrbitLabel::Leo(LeoRefinement::NonSunSynchronous {
            inclination,
            altitude,
        }))
    }
}

impl From<OrbitLabel> for String {
    fn from(label: OrbitLabel) -> Self {
        label.to_string()
    }
}

impl TryFrom<String> for OrbitLabel {
    type Error = CeosError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
