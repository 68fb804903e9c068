use thiserror::Error;

/// Result type alias using CeosError
pub type Result<T> = std::result::Result<T, CeosError>;

// ========== Error Facility ==========

/// Canonical error kind taxonomy
///
/// Each kind maps to a stable error code that the CLI prints and tests assert on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ExErrorKind {
    // Structural/Validation
    InvalidInput,
    NotFound,
    DuplicateId,
    DanglingReference,
    UnknownCategory,
    InvalidLabel,
    ConstraintViolation,

    // Integration/IO
    Io,
    Serialization,
    Persistence,
    Config,
}

impl ExErrorKind {
    /// Get the stable error code for this kind
    pub fn code(&self) -> &'static str {
        match self {
            ExErrorKind::InvalidInput => "ERR_INVALID_INPUT",
            ExErrorKind::NotFound => "ERR_NOT_FOUND",
            ExErrorKind::DuplicateId => "ERR_DUPLICATE_ID",
            ExErrorKind::DanglingReference => "ERR_DANGLING_REFERENCE",
            ExErrorKind::UnknownCategory => "ERR_UNKNOWN_CATEGORY",
            ExErrorKind::InvalidLabel => "ERR_INVALID_LABEL",
            ExErrorKind::ConstraintViolation => "ERR_CONSTRAINT_VIOLATION",
            ExErrorKind::Io => "ERR_IO",
            ExErrorKind::Serialization => "ERR_SERIALIZATION",
            ExErrorKind::Persistence => "ERR_PERSISTENCE",
            ExErrorKind::Config => "ERR_CONFIG",
        }
    }
}

/// Canonical structured error type
///
/// Carries a classification kind for programmatic handling plus the operation
/// and entity that failed.
#[derive(Debug, Clone)]
pub struct ExError {
    kind: ExErrorKind,
    op: Option<String>,
    entity_id: Option<String>,
    message: String,
    source: Option<Box<ExError>>,
}

impl ExError {
    /// Create a new error with the specified kind
    pub fn new(kind: ExErrorKind) -> Self {
        Self {
            kind,
            op: None,
            entity_id: None,
            message: String::new(),
            source: None,
        }
    }

    /// Add operation context
    pub fn with_op(mut self, op: impl Into<String>) -> Self {
        self.op = Some(op.into());
        self
    }

    /// Add entity ID context (mission id, instrument id, subject id, ...)
    pub fn with_entity_id(mut self, id: impl Into<String>) -> Self {
        self.entity_id = Some(id.into());
        self
    }

    /// Add custom message
    pub fn with_message(mut self, message: impl Into<String>) -> Self {
        self.message = message.into();
        self
    }

    /// Add source error
    pub fn with_source(mut self, source: ExError) -> Self {
        self.source = Some(Box::new(source));
        self
    }

    pub fn kind(&self) -> ExErrorKind {
        self.kind
    }

    pub fn code(&self) -> &'static str {
        self.kind.code()
    }

    pub fn op(&self) -> Option<&str> {
        self.op.as_deref()
    }

    pub fn entity_id(&self) -> Option<&str> {
        self.entity_id.as_deref()
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn source_error(&self) -> Option<&ExError> {
        self.source.as_deref()
    }
}

impl std::fmt::Display for ExError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "[{}]", self.code())?;
        if let Some(op) = &self.op {
            write!(f, " in operation '{}'", op)?;
        }
        if !self.message.is_empty() {
            write!(f, ": {}", self.message)?;
        }
        if let Some(entity_id) = &self.entity_id {
            write!(f, " (entity_id: {})", entity_id)?;
        }
        if let Some(source) = &self.source {
            write!(f, " <- {}", source)?;
        }
        Ok(())
    }
}

impl std::error::Error for ExError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        self.source
            .as_deref()
            .map(|s| s as &(dyn std::error::Error + 'static))
    }
}

// ========== End Error Facility ==========

/// Domain errors raised by the catalog and the classifier
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CeosError {
    /// Mission not present in the catalog
    #[error("Mission not found: {mission_id}")]
    MissionNotFound { mission_id: i64 },

    /// Instrument not present in the catalog
    #[error("Instrument not found: {instrument_id}")]
    InstrumentNotFound { instrument_id: i64 },

    /// Measurement not present in the catalog
    #[error("Measurement not found: {measurement_id}")]
    MeasurementNotFound { measurement_id: i64 },

    /// The same id was inserted twice
    #[error("Duplicate {entity} id: {id}")]
    DuplicateId { entity: &'static str, id: String },

    /// A record references another record that does not exist
    #[error("{entity} {id} references missing {target} {target_id}")]
    DanglingReference {
        entity: &'static str,
        id: String,
        target: &'static str,
        target_id: String,
    },

    /// A categorical value outside the known vocabulary
    #[error("Unknown {attribute} value: {value:?}")]
    UnknownCategory {
        attribute: &'static str,
        value: String,
    },

    /// A raw orbit value that could not be interpreted
    #[error("Invalid {field} value {value:?}: {reason}")]
    InvalidRawValue {
        field: &'static str,
        value: String,
        reason: String,
    },

    /// A persisted orbit label that does not follow the taxonomy
    #[error("Invalid orbit label {label:?}: {reason}")]
    InvalidLabel { label: String, reason: String },

    /// Configuration could not be read or parsed
    #[error("Configuration error: {message}")]
    Config { message: String },

    /// IO failure
    #[error("IO error: {message}")]
    Io { message: String },

    /// Serialization failure
    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl From<CeosError> for ExError {
    fn from(err: CeosError) -> Self {
        match err {
            CeosError::MissionNotFound { mission_id } => ExError::new(ExErrorKind::NotFound)
                .with_entity_id(mission_id.to_string())
                .with_message("Mission not found"),

            CeosError::InstrumentNotFound { instrument_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(instrument_id.to_string())
                    .with_message("Instrument not found")
            }

            CeosError::MeasurementNotFound { measurement_id } => {
                ExError::new(ExErrorKind::NotFound)
                    .with_entity_id(measurement_id.to_string())
                    .with_message("Measurement not found")
            }

            CeosError::DuplicateId { entity, id } => ExError::new(ExErrorKind::DuplicateId)
                .with_entity_id(id)
                .with_message(format!("Duplicate {} id", entity)),

            CeosError::DanglingReference {
                entity,
                id,
                target,
                target_id,
            } => ExError::new(ExErrorKind::DanglingReference)
                .with_entity_id(id)
                .with_message(format!("{} references missing {} {}", entity, target, target_id)),

            CeosError::UnknownCategory { attribute, value } => {
                ExError::new(ExErrorKind::UnknownCategory)
                    .with_message(format!("Unknown {} value {:?}", attribute, value))
            }

            CeosError::InvalidRawValue {
                field,
                value,
                reason,
            } => ExError::new(ExErrorKind::InvalidInput)
                .with_message(format!("Invalid {} value {:?}: {}", field, value, reason)),

            CeosError::InvalidLabel { label, reason } => ExError::new(ExErrorKind::InvalidLabel)
                .with_entity_id(label)
                .with_message(reason),

            CeosError::Config { message } => {
                ExError::new(ExErrorKind::Config).with_message(message)
            }

            CeosError::Io { message } => ExError::new(ExErrorKind::Io).with_message(message),

            CeosError::Serialization { message } => {
                ExError::new(ExErrorKind::Serialization).with_message(message)
            }
        }
    }
}

impl From<std::io::Error> for CeosError {
    fn from(err: std::io::Error) -> Self {
        CeosError::Io {
            message: err.to_string(),
        }
    }
}

impl From<serde_json::Error> for CeosError {
    fn from(err: serde_json::Error) -> Self {
        CeosError::Serialization {
            message: err.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_kind_codes_are_stable() {
        let cases = [
            (ExErrorKind::InvalidInput, "ERR_INVALID_INPUT"),
            (ExErrorKind::DuplicateId, "ERR_DUPLICATE_ID"),
            (ExErrorKind::DanglingReference, "ERR_DANGLING_REFERENCE"),
            (ExErrorKind::InvalidLabel, "ERR_INVALID_LABEL"),
            (ExErrorKind::ConstraintViolation, "ERR_CONSTRAINT_VIOLATION"),
            (ExErrorKind::Persistence, "ERR_PERSISTENCE"),
            (ExErrorKind::Config, "ERR_CONFIG"),
        ];
        for (kind, expected_code) in cases {
            assert_eq!(kind.code(), expected_code, "Wrong code for {:?}", kind);
        }
    }

    #[test]
    fn test_mission_not_found_maps_to_not_found() {
        let ex: ExError = CeosError::MissionNotFound { mission_id: 7 }.into();
        assert_eq!(ex.kind(), ExErrorKind::NotFound);
        assert_eq!(ex.entity_id(), Some("7"));
    }

    #[test]
    fn test_dangling_reference_keeps_both_ends() {
        let ex: ExError = CeosError::DanglingReference {
            entity: "instrument",
            id: "12".to_string(),
            target: "mission",
            target_id: "99".to_string(),
        }
        .into();
        assert_eq!(ex.code(), "ERR_DANGLING_REFERENCE");
        assert_eq!(ex.entity_id(), Some("12"));
        assert!(ex.message().contains("mission 99"));
    }

    #[test]
    fn test_display_includes_op_and_source() {
        let inner = ExError::new(ExErrorKind::Io).with_message("disk gone");
        let outer = ExError::new(ExErrorKind::Persistence)
            .with_op("load_catalog")
            .with_message("read failed")
            .with_source(inner);
        let text = outer.to_string();
        assert!(text.starts_with("[ERR_PERSISTENCE] in operation 'load_catalog'"));
        assert!(text.contains("disk gone"));
        assert_eq!(outer.source_error().map(|s| s.kind()), Some(ExErrorKind::Io));
    }
}
