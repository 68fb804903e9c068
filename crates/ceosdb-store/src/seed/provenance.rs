//! Provenance event tracking for seed imports
//!
//! Records events in the provenance_events table

use crate::errors::{from_rusqlite, Result};
use rusqlite::Connection;
use serde_json::Value;

/// Provenance event kind
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProvenanceKind {
    /// Seed import started
    ImportStarted,
    /// Records of one kind written
    RecordsApplied,
    /// Seed import completed
    ImportCompleted,
}

impl ProvenanceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ProvenanceKind::ImportStarted => "seed_import_started",
            ProvenanceKind::RecordsApplied => "seed_records_applied",
            ProvenanceKind::ImportCompleted => "seed_import_completed",
        }
    }
}

/// Emit a provenance event
///
/// Takes a `&Connection` so the event lands in whatever transaction the
/// caller has open.
pub fn emit_event(
    conn: &Connection,
    kind: ProvenanceKind,
    correlation_id: &str,
    metadata: Option<Value>,
) -> Result<()> {
    let now = chrono::Utc::now().timestamp();
    let metadata = metadata.unwrap_or_else(|| Value::Object(Default::default()));

    conn.execute(
        "INSERT INTO provenance_events (kind, correlation_id, timestamp, metadata) VALUES (?1, ?2, ?3, ?4)",
        rusqlite::params![kind.as_str(), correlation_id, now, metadata.to_string()],
    )
    .map_err(from_rusqlite)?;

    Ok(())
}

/// Emit "seed import started" event
pub fn emit_started(conn: &Connection, correlation_id: &str, seed_digest: &str) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportStarted,
        correlation_id,
        Some(serde_json::json!({
            "seed_digest": seed_digest,
        })),
    )
}

/// Emit "records applied" event for one record kind
pub fn emit_applied(
    conn: &Connection,
    correlation_id: &str,
    record_kind: &str,
    count: usize,
) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::RecordsApplied,
        correlation_id,
        Some(serde_json::json!({
            "record_kind": record_kind,
            "count": count,
        })),
    )
}

/// Emit "seed import completed" event
pub fn emit_completed(conn: &Connection, correlation_id: &str, seed_digest: &str) -> Result<()> {
    emit_event(
        conn,
        ProvenanceKind::ImportCompleted,
        correlation_id,
        Some(serde_json::json!({
            "seed_digest": seed_digest,
        })),
    )
}

/// Number of provenance events recorded under a correlation id
pub fn count_events(conn: &Connection, correlation_id: &str) -> Result<usize> {
    let count: i64 = conn
        .query_row(
            "SELECT COUNT(*) FROM provenance_events WHERE correlation_id = ?1",
            [correlation_id],
            |row| row.get(0),
        )
        .map_err(from_rusqlite)?;
    Ok(usize::try_from(count).unwrap_or_default())
}
