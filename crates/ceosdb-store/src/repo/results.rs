//! Persistence of most-common-orbit results
//!
//! The table only ever holds the output of one run: each write deletes every
//! previous row and inserts the new set inside a single transaction.

use crate::errors::{corrupt_row, from_rusqlite, Result};
use ceosdb_core::model::{ClassificationResult, SubjectKey, SubjectKind};
use ceosdb_core::OrbitLabel;
use ceosdb_core_types::{RunContext, RunId};
use rusqlite::{params, Connection, OptionalExtension, Transaction};
use serde::Serialize;

/// A result row as stored
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct StoredResult {
    pub subject: SubjectKey,
    pub label: Option<OrbitLabel>,
    pub run_id: RunId,
    pub computed_at: i64,
}

/// Replace all stored results with `results` in one transaction
///
/// Returns the number of rows written. On error nothing changes.
pub fn replace_results(
    conn: &mut Connection,
    results: &[ClassificationResult],
    run: &RunContext,
) -> Result<usize> {
    let tx = conn.transaction().map_err(from_rusqlite)?;
    let written = replace_results_tx(&tx, results, run)?;
    tx.commit().map_err(from_rusqlite)?;
    Ok(written)
}

/// Replace all stored results within an open transaction
pub fn replace_results_tx(
    tx: &Transaction,
    results: &[ClassificationResult],
    run: &RunContext,
) -> Result<usize> {
    tx.execute("DELETE FROM most_common_orbits", [])
        .map_err(from_rusqlite)?;

    let mut stmt = tx
        .prepare(
            "INSERT INTO most_common_orbits (subject_kind, subject_id, label, run_id, computed_at)
             VALUES (?1, ?2, ?3, ?4, ?5)",
        )
        .map_err(from_rusqlite)?;
    for result in results {
        stmt.execute(params![
            result.subject.kind.as_str(),
            result.subject.id,
            result.label_text(),
            run.run_id.as_str(),
            run.started_at,
        ])
        .map_err(from_rusqlite)?;
    }

    Ok(results.len())
}

const RESULT_SELECT: &str =
    "SELECT subject_kind, subject_id, label, run_id, computed_at FROM most_common_orbits";

const KIND_ORDER: &str = "CASE subject_kind
        WHEN 'technology' THEN 0
        WHEN 'instrument_type' THEN 1
        ELSE 2
    END";

/// List stored results, optionally of one kind, in classification order
pub fn list_results(conn: &Connection, kind: Option<SubjectKind>) -> Result<Vec<StoredResult>> {
    let (sql, filter) = match kind {
        Some(kind) => (
            format!("{RESULT_SELECT} WHERE subject_kind = ?1 ORDER BY subject_id"),
            Some(kind.as_str()),
        ),
        None => (
            format!("{RESULT_SELECT} ORDER BY {KIND_ORDER}, subject_id"),
            None,
        ),
    };

    let mut stmt = conn.prepare(&sql).map_err(from_rusqlite)?;
    let rows = match filter {
        Some(kind) => stmt.query_map([kind], read_row),
        None => stmt.query_map([], read_row),
    }
    .map_err(from_rusqlite)?
    .collect::<std::result::Result<Vec<_>, _>>()
    .map_err(from_rusqlite)?;

    rows.into_iter().map(RawResult::decode).collect()
}

/// Fetch the stored result of one subject
pub fn get_result(conn: &Connection, subject: &SubjectKey) -> Result<Option<StoredResult>> {
    conn.query_row(
        &format!("{RESULT_SELECT} WHERE subject_kind = ?1 AND subject_id = ?2"),
        params![subject.kind.as_str(), subject.id],
        read_row,
    )
    .optional()
    .map_err(from_rusqlite)?
    .map(RawResult::decode)
    .transpose()
}

struct RawResult {
    kind: String,
    id: String,
    label: Option<String>,
    run_id: String,
    computed_at: i64,
}

fn read_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<RawResult> {
    Ok(RawResult {
        kind: row.get(0)?,
        id: row.get(1)?,
        label: row.get(2)?,
        run_id: row.get(3)?,
        computed_at: row.get(4)?,
    })
}

impl RawResult {
    fn decode(self) -> Result<StoredResult> {
        let row_id = format!("{}:{}", self.kind, self.id);
        let kind: SubjectKind = self
            .kind
            .parse()
            .map_err(|e: ceosdb_core::CeosError| corrupt_row("most_common_orbits", &row_id, &e.to_string()))?;
        let label = self
            .label
            .map(|text| text.parse::<OrbitLabel>())
            .transpose()
            .map_err(|e| corrupt_row("most_common_orbits", &row_id, &e.to_string()))?;

        Ok(StoredResult {
            subject: SubjectKey::new(kind, self.id),
            label,
            run_id: RunId::from_string(self.run_id),
            computed_at: self.computed_at,
        })
    }
}
