//! Hierarchical, confidence-gated orbit classification

pub mod gate;
pub mod label;
pub mod orchestrator;
pub mod walker;

pub use gate::{admit, GateCounts, GateThresholds};
pub use label::{AltitudeRefinement, LeoRefinement, OrbitLabel, RepeatCycleLabel};
pub use orchestrator::{classify_all, GroupOrchestrator};
pub use walker::DecisionTreeWalker;
