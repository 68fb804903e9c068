use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

use crate::classifier::label::OrbitLabel;
use crate::errors::CeosError;

/// The three disjoint universes of subject groups
///
/// Declaration order is the order in which groups are classified and reported.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SubjectKind {
    Technology,
    InstrumentType,
    Measurement,
}

impl SubjectKind {
    pub const ALL: [SubjectKind; 3] = [
        SubjectKind::Technology,
        SubjectKind::InstrumentType,
        SubjectKind::Measurement,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SubjectKind::Technology => "technology",
            SubjectKind::InstrumentType => "instrument_type",
            SubjectKind::Measurement => "measurement",
        }
    }
}

impl FromStr for SubjectKind {
    type Err = CeosError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().replace('-', "_").as_str() {
            "technology" | "tech" => Ok(SubjectKind::Technology),
            "instrument_type" | "type" => Ok(SubjectKind::InstrumentType),
            "measurement" => Ok(SubjectKind::Measurement),
            _ => Err(CeosError::UnknownCategory {
                attribute: "subject_kind",
                value: s.to_string(),
            }),
        }
    }
}

impl fmt::Display for SubjectKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Identity of one subject group: its kind plus the technology text, type
/// name or measurement name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SubjectKey {
    pub kind: SubjectKind,
    pub id: String,
}

impl SubjectKey {
    pub fn new(kind: SubjectKind, id: impl Into<String>) -> Self {
        Self {
            kind,
            id: id.into(),
        }
    }

    pub fn technology(id: impl Into<String>) -> Self {
        Self::new(SubjectKind::Technology, id)
    }

    pub fn instrument_type(id: impl Into<String>) -> Self {
        Self::new(SubjectKind::InstrumentType, id)
    }

    pub fn measurement(id: impl Into<String>) -> Self {
        Self::new(SubjectKind::Measurement, id)
    }
}

impl fmt::Display for SubjectKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}", self.kind, self.id)
    }
}

/// Most common orbit of one subject group; `None` when no branch of the
/// taxonomy was confidently admitted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClassificationResult {
    pub subject: SubjectKey,
    pub label: Option<OrbitLabel>,
}

impl ClassificationResult {
    pub fn new(subject: SubjectKey, label: Option<OrbitLabel>) -> Self {
        Self { subject, label }
    }

    /// Label rendered for storage or display
    pub fn label_text(&self) -> Option<String> {
        self.label.as_ref().map(ToString::to_string)
    }
}
