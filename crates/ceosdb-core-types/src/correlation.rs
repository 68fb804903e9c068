//! Correlation types for classification runs
//!
//! Every classification run is tagged with a [`RunId`] so that persisted
//! results and log events from the same run can be tied together.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Unique identifier for one classification or import run
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct RunId(String);

impl RunId {
    /// Generate a new RunId using UUIDv7 (time ordered)
    pub fn new() -> Self {
        Self(Uuid::now_v7().to_string())
    }

    /// Get the string representation
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Create from an existing string (e.g. a value read back from the store)
    pub fn from_string(s: String) -> Self {
        Self(s)
    }
}

impl Default for RunId {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Display for RunId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// Context carried through a run
#[derive(Debug, Clone)]
pub struct RunContext {
    pub run_id: RunId,
    /// Wall-clock start of the run, seconds since the epoch
    pub started_at: i64,
}

impl RunContext {
    /// Create a new context with a fresh RunId
    pub fn new(started_at: i64) -> Self {
        Self {
            run_id: RunId::new(),
            started_at,
        }
    }

    /// Create a context for a known run id
    pub fn with_run_id(run_id: RunId, started_at: i64) -> Self {
        Self { run_id, started_at }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_run_ids_are_unique() {
        let a = RunId::new();
        let b = RunId::new();
        assert_ne!(a, b);
    }

    #[test]
    fn test_run_id_round_trips_through_json() {
        let id = RunId::from_string("run-1".to_string());
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, "\"run-1\"");
        let back: RunId = serde_json::from_str(&json).unwrap();
        assert_eq!(back, id);
    }

    #[test]
    fn test_context_keeps_run_id() {
        let id = RunId::from_string("run-2".to_string());
        let ctx = RunContext::with_run_id(id.clone(), 42);
        assert_eq!(ctx.run_id, id);
        assert_eq!(ctx.started_at, 42);
    }
}
