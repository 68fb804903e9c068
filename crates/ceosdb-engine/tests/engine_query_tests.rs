// Integration tests for the engine command and query surfaces

use ceosdb_core::model::{SubjectKey, SubjectKind};
use ceosdb_engine::commands::classify::ClassifyOptions;
use ceosdb_engine::{
    apply_engine_command, apply_engine_query, EngineCommand, EngineCommandResult, EngineQuery,
    EngineQueryResult,
};
use ceosdb_store::db::open_in_memory;
use rusqlite::Connection;
use std::path::PathBuf;

fn fixtures_dir() -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
}

fn classified_store() -> Connection {
    let mut conn = open_in_memory().unwrap();
    apply_engine_command(
        EngineCommand::SeedImport {
            path: fixtures_dir().join("catalog_classify.yaml"),
        },
        &mut conn,
    )
    .unwrap();
    apply_engine_command(EngineCommand::Classify(ClassifyOptions::default()), &mut conn).unwrap();
    conn
}

#[test]
fn test_seed_import_directory() {
    let mut conn = open_in_memory().unwrap();

    let result = apply_engine_command(
        EngineCommand::SeedImport {
            path: fixtures_dir(),
        },
        &mut conn,
    )
    .unwrap();

    let EngineCommandResult::SeedImport(reports) = result else {
        panic!("expected seed import result");
    };
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].missions, 27);
}

#[test]
fn test_seed_import_empty_directory_fails() {
    let mut conn = open_in_memory().unwrap();
    let dir = tempfile::tempdir().unwrap();

    let err = apply_engine_command(
        EngineCommand::SeedImport {
            path: dir.path().to_path_buf(),
        },
        &mut conn,
    )
    .unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_results_list_by_kind() {
    let conn = classified_store();

    let EngineQueryResult::ResultsList(rows) = apply_engine_query(
        EngineQuery::ResultsList {
            kind: Some(SubjectKind::Measurement),
        },
        &conn,
    )
    .unwrap() else {
        panic!("expected results list");
    };

    let ids: Vec<_> = rows.iter().map(|r| r.subject.id.as_str()).collect();
    assert_eq!(ids, vec!["Cloud imagery", "Magnetic field strength", "Ocean colour"]);
}

#[test]
fn test_result_get_found_and_missing() {
    let conn = classified_store();

    let EngineQueryResult::ResultGet(row) = apply_engine_query(
        EngineQuery::ResultGet {
            subject: SubjectKey::measurement("Ocean colour"),
        },
        &conn,
    )
    .unwrap() else {
        panic!("expected result");
    };
    assert_eq!(row.label.map(|l| l.to_string()).as_deref(), Some("LEO-SSO-AM"));

    let err = apply_engine_query(
        EngineQuery::ResultGet {
            subject: SubjectKey::technology("Telepathy"),
        },
        &conn,
    )
    .unwrap_err();
    assert_eq!(err.code(), "ERR_NOT_FOUND");
}

#[test]
fn test_catalog_summary() {
    let conn = classified_store();

    let EngineQueryResult::CatalogSummary(summary) =
        apply_engine_query(EngineQuery::CatalogSummary, &conn).unwrap()
    else {
        panic!("expected summary");
    };
    assert_eq!(summary.missions, 27);
    assert_eq!(summary.population, 26);
    assert_eq!(summary.instruments, 4);
    assert_eq!(summary.technologies, 4);
    assert_eq!(summary.measurements, 3);
}
