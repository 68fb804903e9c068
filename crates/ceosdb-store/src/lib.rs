//! CEOS DB Store - SQLite persistence and catalog seed import
//!
//! Provides:
//! - SQLite schema with a checksummed migrations framework
//! - Catalog Seed Format v0 parser and importer
//! - Repository layer persisting and hydrating catalog models
//! - Replace-all storage of most-common-orbit results

pub mod db;
pub mod errors;
pub mod migrations;
pub mod repo;
pub mod seed;

// Re-export key types
pub use errors::Result;
