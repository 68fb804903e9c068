//! Engine-level commands that write to the store.

use crate::commands::classify::{classify_catalog, ClassifyOptions, ClassifyOutcome};
use crate::commands::seed::import_seed_path;
use ceosdb_store::errors::Result;
use ceosdb_store::seed::ImportReport;
use rusqlite::Connection;
use std::path::PathBuf;

/// Engine-level commands that require database writes.
#[derive(Debug, Clone)]
pub enum EngineCommand {
    /// Import a seed file or a directory of seed files.
    SeedImport { path: PathBuf },
    /// Classify every subject group and replace the stored results.
    Classify(ClassifyOptions),
}

/// Result of applying an engine command.
#[derive(Debug, Clone)]
pub enum EngineCommandResult {
    /// One report per imported file, in import order.
    SeedImport(Vec<ImportReport>),
    Classify(ClassifyOutcome),
}

/// Apply an engine command.
pub fn apply_engine_command(cmd: EngineCommand, conn: &mut Connection) -> Result<EngineCommandResult> {
    match cmd {
        EngineCommand::SeedImport { path } => {
            import_seed_path(&path, conn).map(EngineCommandResult::SeedImport)
        }
        EngineCommand::Classify(options) => {
            classify_catalog(conn, &options).map(EngineCommandResult::Classify)
        }
    }
}
