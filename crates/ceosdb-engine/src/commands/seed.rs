//! Seed import command.

use ceosdb_core::errors::{ExError, ExErrorKind};
use ceosdb_core::{log_op_end, log_op_error, log_op_start};
use ceosdb_store::errors::Result;
use ceosdb_store::seed::{import_seed, seed_files, ImportReport};
use rusqlite::Connection;
use std::path::Path;
use tracing::debug;

/// Import a seed file, or every `.yaml`/`.yml` file of a directory in file
/// name order
///
/// Each file is imported in its own transaction, so later files may refer
/// to records of earlier ones. Import stops at the first failing file; files
/// before it stay imported.
///
/// ## Errors
///
/// - `NotFound`: the directory holds no seed files
/// - `InvalidInput`, `DuplicateId`, `DanglingReference`: a seed failed validation
/// - `Persistence`: database error
pub fn import_seed_path(path: &Path, conn: &mut Connection) -> Result<Vec<ImportReport>> {
    let path_text = path.display().to_string();
    log_op_start!("seed_import", path = %path_text);
    let start = std::time::Instant::now();

    let result = import_impl(path, conn).map_err(|e| {
        log_op_error!(
            "seed_import",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            path = %path_text
        );
        e
    })?;

    log_op_end!(
        "seed_import",
        duration_ms = start.elapsed().as_millis() as u64,
        file_count = result.len()
    );

    Ok(result)
}

fn import_impl(path: &Path, conn: &mut Connection) -> Result<Vec<ImportReport>> {
    let files = seed_files(path)?;
    if files.is_empty() {
        return Err(ExError::new(ExErrorKind::NotFound)
            .with_op("seed_import")
            .with_entity_id(path.display().to_string())
            .with_message("No .yaml or .yml seed files found"));
    }

    let mut reports = Vec::with_capacity(files.len());
    for file in &files {
        debug!(file = %file.display(), "importing seed file");
        reports.push(import_seed(file, conn)?);
    }
    Ok(reports)
}
