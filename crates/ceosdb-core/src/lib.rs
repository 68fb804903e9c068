//! CEOS DB Core - orbit classification kernel
//!
//! This crate provides:
//! - Mission, instrument and registry models with orbit attribute derivation
//! - The in-memory `Catalog` handed over by ingest
//! - The Mission Attribute Index (arena + per-subject membership)
//! - The confidence gate, decision-tree walker and group orchestrator
//! - Error and logging facilities shared by every crate in the workspace
//!
//! Everything here is synchronous and free of I/O apart from reading the
//! settings file.

pub mod catalog;
pub mod classifier;
pub mod config;
pub mod errors;
pub mod index;
pub mod logging_facility;
pub mod model;

pub use ceosdb_core_types as types;

// Re-export commonly used types
pub use catalog::Catalog;
pub use classifier::{classify_all, DecisionTreeWalker, GateThresholds, GroupOrchestrator, OrbitLabel};
pub use config::Settings;
pub use errors::{CeosError, ExError, ExErrorKind, Result};
pub use index::{MissionAttributeIndex, SubgroupProfile};
pub use model::{ClassificationResult, Instrument, Mission, SubjectKey, SubjectKind};
