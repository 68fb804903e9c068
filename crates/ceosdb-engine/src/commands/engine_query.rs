//! Engine-level read-only query surface.
//!
//! `apply_engine_query` accepts a shared connection and never writes.

use ceosdb_core::errors::{ExError, ExErrorKind};
use ceosdb_core::model::{SubjectKey, SubjectKind};
use ceosdb_core::{log_op_end, log_op_error, log_op_start, MissionAttributeIndex};
use ceosdb_store::errors::Result;
use ceosdb_store::repo::hydration::load_catalog;
use ceosdb_store::repo::results::{get_result, list_results};
use ceosdb_store::repo::StoredResult;
use rusqlite::Connection;
use serde::Serialize;

/// Read-only queries supported by the engine.
#[derive(Debug, Clone)]
pub enum EngineQuery {
    /// Stored results, optionally of one subject kind.
    ResultsList { kind: Option<SubjectKind> },
    /// The stored result of one subject.
    ResultGet { subject: SubjectKey },
    /// Size of the stored catalog as the classifier sees it.
    CatalogSummary,
}

/// Result of applying an engine query.
#[derive(Debug, Clone)]
pub enum EngineQueryResult {
    ResultsList(Vec<StoredResult>),
    ResultGet(StoredResult),
    CatalogSummary(CatalogSummary),
}

/// Catalog counts, including the classifier population
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CatalogSummary {
    pub missions: usize,
    /// Missions with a known orbit type
    pub population: usize,
    pub instruments: usize,
    pub technologies: usize,
    pub instrument_types: usize,
    pub measurements: usize,
}

/// Apply a read-only engine query.
///
/// ## Errors
///
/// - `NotFound`: `ResultGet` for a subject without a stored result
/// - `Persistence`: database error or an undecodable stored row
pub fn apply_engine_query(query: EngineQuery, conn: &Connection) -> Result<EngineQueryResult> {
    let op = match &query {
        EngineQuery::ResultsList { .. } => "results_list",
        EngineQuery::ResultGet { .. } => "result_get",
        EngineQuery::CatalogSummary => "catalog_summary",
    };
    log_op_start!(op);
    let start = std::time::Instant::now();

    let result = match query {
        EngineQuery::ResultsList { kind } => {
            list_results(conn, kind).map(EngineQueryResult::ResultsList)
        }
        EngineQuery::ResultGet { subject } => get_result(conn, &subject).and_then(|found| {
            found.map(EngineQueryResult::ResultGet).ok_or_else(|| {
                ExError::new(ExErrorKind::NotFound)
                    .with_op("result_get")
                    .with_entity_id(subject.to_string())
                    .with_message("No stored result for subject")
            })
        }),
        EngineQuery::CatalogSummary => catalog_summary(conn).map(EngineQueryResult::CatalogSummary),
    };

    let elapsed = start.elapsed().as_millis() as u64;
    match &result {
        Ok(_) => log_op_end!(op, duration_ms = elapsed),
        Err(e) => {
            let e_clone = e.clone();
            log_op_error!(op, e_clone, duration_ms = elapsed);
        }
    }
    result
}

fn catalog_summary(conn: &Connection) -> Result<CatalogSummary> {
    let catalog = load_catalog(conn)?;
    let index = MissionAttributeIndex::build(&catalog);
    let subjects = |kind: SubjectKind| index.subjects_of(kind).count();

    Ok(CatalogSummary {
        missions: catalog.mission_count(),
        population: index.population_count(),
        instruments: catalog.instrument_count(),
        technologies: subjects(SubjectKind::Technology),
        instrument_types: subjects(SubjectKind::InstrumentType),
        measurements: subjects(SubjectKind::Measurement),
    })
}
