//! Subcommand handlers

pub mod classify;
pub mod results;
pub mod seed;

use anyhow::Context as _;
use ceosdb_core::Settings;
use rusqlite::Connection;
use std::path::{Path, PathBuf};

/// Settings resolved for this invocation
pub struct Context {
    pub settings: Settings,
}

impl Context {
    /// Resolve settings: file, then `CEOSDB_DB`, then `--db`
    pub fn load(config: Option<&Path>, db: Option<PathBuf>) -> anyhow::Result<Self> {
        let mut settings = Settings::discover(config).context("failed to load settings")?;
        if let Some(db) = db {
            settings.store.path = db;
        }
        Ok(Self { settings })
    }

    /// Open (creating and migrating as needed) the configured store
    pub fn open_store(&self) -> anyhow::Result<Connection> {
        let path = &self.settings.store.path;
        ceosdb_store::db::open(path)
            .with_context(|| format!("failed to open store {}", path.display()))
    }
}
