//! Command orchestration layer.
//!
//! ## Logging Ownership
//!
//! The engine layer owns lifecycle logging:
//! - `log_op_start!` at entry
//! - `log_op_end!` on success
//! - `log_op_error!` on failure
//!
//! Lower layers (store, core) use only `tracing::debug!()` and
//! `tracing::trace!()` for internal details.

pub mod classify;
pub mod engine_command;
pub mod engine_query;
pub mod seed;
