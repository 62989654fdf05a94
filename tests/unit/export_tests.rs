//! Unit tests for the exporter: input detection, file reading and batches

use std::io::Write;
use std::path::PathBuf;

use pretty_assertions::assert_eq;
use tempfile::{NamedTempFile, TempDir};

use rust_sqlschema::export::PARALLEL_THRESHOLD;
use rust_sqlschema::{DiagnosticKind, Input, SchemaError};

/// Helper to create a temp SQL file with content
fn create_sql_file(content: &[u8]) -> NamedTempFile {
    let mut file = NamedTempFile::with_suffix(".sql").unwrap();
    file.write_all(content).unwrap();
    file.flush().unwrap();
    file
}

/// Get the path to a test fixture
fn fixture_path(name: &str) -> PathBuf {
    PathBuf::from(env!("CARGO_MANIFEST_DIR"))
        .join("tests")
        .join("fixtures")
        .join(name)
}

// ============================================================================
// Input Detection
// ============================================================================

#[test]
fn test_detect_existing_file_as_path() {
    let file = create_sql_file(b"CREATE TABLE t (a int)");
    let input = file.path().to_str().unwrap();
    assert_eq!(Input::detect(input), Input::Path(file.path().to_path_buf()));
}

#[test]
fn test_detect_directory_as_text() {
    let dir = TempDir::new().unwrap();
    let input = dir.path().to_str().unwrap();
    assert_eq!(Input::detect(input), Input::Text(input.to_string()));
}

#[test]
fn test_from_accepts_text_and_path() {
    let sql = "CREATE TABLE `t` (`a` int)";
    let file = create_sql_file(sql.as_bytes());

    let from_text = rust_sqlschema::from(sql).unwrap();
    let from_path = rust_sqlschema::from(file.path().to_str().unwrap()).unwrap();
    assert_eq!(from_text, from_path);
    assert_eq!(from_text[0].name, "t");
}

// ============================================================================
// File Input
// ============================================================================

#[test]
fn test_fixture_file() {
    let export = rust_sqlschema::export_file(&fixture_path("user_schema.sql")).unwrap();

    assert_eq!(export.tables.len(), 1);
    let table = &export.tables[0];
    assert_eq!(table.name, "user");
    assert_eq!(table.columns.len(), 7);
    assert_eq!(table.constraints.len(), 3);
    assert_eq!(table.columns[1].constraint.comment, "学号");

    // the trailing INSERT
    assert_eq!(export.diagnostics.len(), 1);
    assert_eq!(
        export.diagnostics.iter().next().unwrap().kind,
        DiagnosticKind::Unsupported
    );
}

#[test]
fn test_utf8_bom_is_stripped() {
    let file = create_sql_file(b"\xEF\xBB\xBFCREATE TABLE t (a int)");
    let tables = rust_sqlschema::from_file(file.path()).unwrap();
    assert_eq!(tables[0].name, "t");
}

#[test]
fn test_windows_1252_fallback() {
    // 0xE9 is e-acute in Windows-1252 and invalid as UTF-8 here
    let file = create_sql_file(b"CREATE TABLE t (a int COMMENT 'caf\xE9')");
    let tables = rust_sqlschema::from_file(file.path()).unwrap();
    assert_eq!(tables[0].columns[0].constraint.comment, "café");
}

#[test]
fn test_missing_file_is_read_error() {
    let dir = TempDir::new().unwrap();
    let result = rust_sqlschema::from_file(&dir.path().join("missing.sql"));
    assert!(matches!(result, Err(SchemaError::SqlFileReadError { .. })));
}

#[test]
fn test_syntax_error_names_file() {
    let file = create_sql_file(b"CREATE TABLE t (\n  a int,\n  b varchar(\n)");
    match rust_sqlschema::from_file(file.path()) {
        Err(SchemaError::SqlParseError { path, line, .. }) => {
            assert_eq!(path, file.path());
            assert_eq!(line, 4);
        }
        other => panic!("expected SqlParseError, got {:?}", other),
    }
}

#[test]
fn test_syntax_error_returns_no_partial_result() {
    let result = rust_sqlschema::from_text("CREATE TABLE ok (a int); CREATE TABLE bad (a int");
    assert!(matches!(result, Err(SchemaError::SyntaxError { .. })));
}

// ============================================================================
// Batches
// ============================================================================

fn batch(count: usize) -> (TempDir, Vec<PathBuf>) {
    let dir = TempDir::new().unwrap();
    let paths = (0..count)
        .map(|i| {
            let path = dir.path().join(format!("t{}.sql", i));
            std::fs::write(&path, format!("CREATE TABLE t{} (a int);", i)).unwrap();
            path
        })
        .collect();
    (dir, paths)
}

#[test]
fn test_export_files_sequential_keeps_order() {
    let (_dir, paths) = batch(3);
    let export = rust_sqlschema::export_files(&paths).unwrap();
    let names: Vec<_> = export.tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["t0", "t1", "t2"]);
}

#[test]
fn test_export_files_parallel_keeps_order() {
    let (_dir, paths) = batch(PARALLEL_THRESHOLD + 4);
    let export = rust_sqlschema::export_files(&paths).unwrap();
    let names: Vec<_> = export.tables.iter().map(|t| t.name.clone()).collect();
    let expected: Vec<_> = (0..PARALLEL_THRESHOLD + 4).map(|i| format!("t{}", i)).collect();
    assert_eq!(names, expected);
}

#[test]
fn test_export_files_fails_on_any_bad_file() {
    let (dir, mut paths) = batch(2);
    let bad = dir.path().join("bad.sql");
    std::fs::write(&bad, "CREATE TABLE (").unwrap();
    paths.push(bad);

    assert!(matches!(
        rust_sqlschema::export_files(&paths),
        Err(SchemaError::SqlParseError { .. })
    ));
}

// ============================================================================
// Serialization
// ============================================================================

#[test]
fn test_export_serializes_to_json() {
    let export = rust_sqlschema::export_text("CREATE TABLE t (a int NOT NULL); DELETE FROM t;")
        .unwrap();
    let json = serde_json::to_value(&export).unwrap();

    assert_eq!(json["tables"][0]["name"], "t");
    assert_eq!(json["tables"][0]["columns"][0]["constraint"]["not_null"], true);
    assert_eq!(json["diagnostics"][0]["kind"], "Unsupported");
}
