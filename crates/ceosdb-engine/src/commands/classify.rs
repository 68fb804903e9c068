//! Classification run.
//!
//! Hydrates the catalog, builds the mission attribute index, labels every
//! subject group and replaces the stored results. The run is all-or-nothing:
//! a failure before or during the write leaves the previous results intact.

use ceosdb_core::model::ClassificationResult;
use ceosdb_core::types::{RunContext, RunId};
use ceosdb_core::{classify_all, log_op_end, log_op_error, log_op_start};
use ceosdb_core::{GateThresholds, MissionAttributeIndex};
use ceosdb_store::errors::Result;
use ceosdb_store::repo::hydration::load_catalog;
use ceosdb_store::repo::results::replace_results;
use rusqlite::Connection;
use serde::Serialize;

/// Options for a classification run
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct ClassifyOptions {
    pub thresholds: GateThresholds,
    /// Compute labels without writing them
    pub dry_run: bool,
}

/// Outcome of a classification run
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ClassifyOutcome {
    pub run_id: RunId,
    pub started_at: i64,
    /// Missions with a known orbit type
    pub population: usize,
    pub group_count: usize,
    /// Groups that received a label
    pub labelled_count: usize,
    /// Whether the results were written to the store
    pub persisted: bool,
    pub results: Vec<ClassificationResult>,
}

/// Run the classifier over the stored catalog
///
/// ## Errors
///
/// - `Persistence`: the catalog could not be read or the results could not
///   be written. Nothing is committed in either case.
pub fn classify_catalog(conn: &mut Connection, options: &ClassifyOptions) -> Result<ClassifyOutcome> {
    let run = RunContext::new(chrono::Utc::now().timestamp());
    log_op_start!(
        "classify",
        run_id = run.run_id.as_str(),
        dry_run = options.dry_run
    );
    let start = std::time::Instant::now();

    let outcome = classify_impl(conn, options, &run).map_err(|e| {
        log_op_error!(
            "classify",
            e.clone(),
            duration_ms = start.elapsed().as_millis() as u64,
            run_id = run.run_id.as_str()
        );
        e
    })?;

    log_op_end!(
        "classify",
        duration_ms = start.elapsed().as_millis() as u64,
        run_id = run.run_id.as_str(),
        population = outcome.population,
        group_count = outcome.group_count,
        labelled_count = outcome.labelled_count
    );

    Ok(outcome)
}

fn classify_impl(
    conn: &mut Connection,
    options: &ClassifyOptions,
    run: &RunContext,
) -> Result<ClassifyOutcome> {
    let catalog = load_catalog(conn)?;
    let index = MissionAttributeIndex::build(&catalog);
    let results = classify_all(&index, options.thresholds);

    let persisted = if options.dry_run {
        false
    } else {
        replace_results(conn, &results, run)?;
        true
    };

    Ok(ClassifyOutcome {
        run_id: run.run_id.clone(),
        started_at: run.started_at,
        population: index.population_count(),
        group_count: results.len(),
        labelled_count: results.iter().filter(|r| r.label.is_some()).count(),
        persisted,
        results,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use ceosdb_store::db::open_in_memory;
    use ceosdb_store::repo::results::list_results;

    #[test]
    fn test_empty_catalog_classifies_nothing() {
        let mut conn = open_in_memory().unwrap();

        let outcome = classify_catalog(&mut conn, &ClassifyOptions::default()).unwrap();

        assert_eq!(outcome.population, 0);
        assert!(outcome.results.is_empty());
        assert!(outcome.persisted);
    }

    #[test]
    fn test_dry_run_writes_nothing() {
        let mut conn = open_in_memory().unwrap();
        let options = ClassifyOptions {
            dry_run: true,
            ..ClassifyOptions::default()
        };

        let outcome = classify_catalog(&mut conn, &options).unwrap();

        assert!(!outcome.persisted);
        assert!(list_results(&conn, None).unwrap().is_empty());
    }
}
