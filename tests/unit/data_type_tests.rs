//! Unit tests for data type resolution
//!
//! Every case goes through the public fragment parser and resolver, the same
//! path a column definition takes inside CREATE TABLE.

use pretty_assertions::assert_eq;
use rust_sqlschema::parser::keywords::TypeKeyword;
use rust_sqlschema::parser::parse_data_type;
use rust_sqlschema::resolve::{resolve_data_type, DiagnosticKind, Diagnostics};
use rust_sqlschema::DataType;

fn resolve(sql: &str) -> DataType {
    let node = parse_data_type(sql).unwrap_or_else(|e| panic!("failed to parse {}: {}", sql, e));
    let mut diags = Diagnostics::new();
    let dt = resolve_data_type(&node, &mut diags);
    assert!(diags.is_empty(), "unexpected diagnostics for {}: {:?}", sql, diags);
    dt
}

fn plain(keyword: TypeKeyword, source: &str) -> DataType {
    DataType {
        name: keyword.as_str().to_string(),
        number: keyword.token_type(),
        source: source.to_string(),
        ..Default::default()
    }
}

fn with_length(keyword: TypeKeyword, source: &str, length: u32) -> DataType {
    DataType {
        has_length: true,
        length,
        ..plain(keyword, source)
    }
}

// ============================================================================
// String Types
// ============================================================================

#[test]
fn test_string_types() {
    let cases = [
        ("CHAR(10)", with_length(TypeKeyword::CHAR, "CHAR(10)", 10)),
        (
            "CHARACTER(10)",
            with_length(TypeKeyword::CHARACTER, "CHARACTER(10)", 10),
        ),
        ("varchar(10)", with_length(TypeKeyword::VARCHAR, "VARCHAR(10)", 10)),
        ("TINYTEXT", plain(TypeKeyword::TINYTEXT, "TINYTEXT")),
        ("text", plain(TypeKeyword::TEXT, "TEXT")),
        ("MEDIUMTEXT", plain(TypeKeyword::MEDIUMTEXT, "MEDIUMTEXT")),
        ("LONGTEXT", plain(TypeKeyword::LONGTEXT, "LONGTEXT")),
        ("NCHAR(20)", with_length(TypeKeyword::NCHAR, "NCHAR(20)", 20)),
        (
            "NVARCHAR(20)",
            with_length(TypeKeyword::NVARCHAR, "NVARCHAR(20)", 20),
        ),
        ("LONG", plain(TypeKeyword::LONG, "LONG")),
    ];

    for (sql, expected) in cases {
        assert_eq!(resolve(sql), expected, "{}", sql);
    }
}

#[test]
fn test_string_charset_and_collation_not_in_source() {
    let dt = resolve("varchar(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_0900_ai_ci");
    assert_eq!(dt, with_length(TypeKeyword::VARCHAR, "VARCHAR(255)", 255));
}

#[test]
fn test_int_and_integer_have_distinct_numbers() {
    assert_ne!(resolve("INT").number, resolve("INTEGER").number);
    assert_ne!(resolve("INT").number, 0);
}

// ============================================================================
// National Types
// ============================================================================

#[test]
fn test_national_string() {
    assert_eq!(
        resolve("NATIONAL VARCHAR(255)"),
        DataType {
            is_national: true,
            ..with_length(TypeKeyword::VARCHAR, "NATIONAL VARCHAR(255)", 255)
        }
    );
    assert_eq!(
        resolve("NCHAR VARCHAR(200)"),
        DataType {
            is_nchar: true,
            ..with_length(TypeKeyword::VARCHAR, "NCHAR VARCHAR(200)", 200)
        }
    );
    assert_eq!(
        resolve("NCHAR VARCHAR(255) BINARY"),
        DataType {
            is_nchar: true,
            is_binary: true,
            ..with_length(TypeKeyword::VARCHAR, "NCHAR VARCHAR(255) BINARY", 255)
        }
    );
}

#[test]
fn test_national_varying_string() {
    assert_eq!(
        resolve("NATIONAL CHAR VARYING (255)"),
        DataType {
            is_national: true,
            is_varying: true,
            ..with_length(TypeKeyword::CHAR, "NATIONAL CHAR(255) VARYING", 255)
        }
    );
    assert_eq!(
        resolve("NATIONAL CHARACTER VARYING (255) BINARY"),
        DataType {
            is_national: true,
            is_binary: true,
            is_varying: true,
            ..with_length(
                TypeKeyword::CHARACTER,
                "NATIONAL CHARACTER(255) BINARY VARYING",
                255
            )
        }
    );
}

// ============================================================================
// Numeric Types
// ============================================================================

#[test]
fn test_integer_types() {
    assert_eq!(
        resolve("tinyint(1) unsigned"),
        DataType {
            is_unsigned: true,
            ..with_length(TypeKeyword::TINYINT, "TINYINT(1) UNSIGNED", 1)
        }
    );
    assert_eq!(
        resolve("MEDIUMINT SIGNED ZEROFILL"),
        DataType {
            is_signed: true,
            is_zero_fill: true,
            ..plain(TypeKeyword::MEDIUMINT, "MEDIUMINT SIGNED ZEROFILL")
        }
    );
    assert_eq!(resolve("int8"), plain(TypeKeyword::INT8, "INT8"));
}

#[test]
fn test_real_and_decimal_types() {
    assert_eq!(
        resolve("REAL(8,2) UNSIGNED"),
        DataType {
            has_two_length: true,
            len1: 8,
            len2: 2,
            is_unsigned: true,
            ..plain(TypeKeyword::REAL, "REAL(8,2) UNSIGNED")
        }
    );
    assert_eq!(
        resolve("numeric(12, 4)"),
        DataType {
            has_two_length: true,
            len1: 12,
            len2: 4,
            ..plain(TypeKeyword::NUMERIC, "NUMERIC(12,4)")
        }
    );
    assert_eq!(resolve("FLOAT"), plain(TypeKeyword::FLOAT, "FLOAT"));
}

// ============================================================================
// Temporal, Simple, Collection and Spatial Types
// ============================================================================

#[test]
fn test_temporal_types() {
    assert_eq!(
        resolve("datetime(6)"),
        with_length(TypeKeyword::DATETIME, "DATETIME(6)", 6)
    );
    assert_eq!(resolve("TIMESTAMP"), plain(TypeKeyword::TIMESTAMP, "TIMESTAMP"));
    assert_eq!(
        resolve("varbinary(16)"),
        with_length(TypeKeyword::VARBINARY, "VARBINARY(16)", 16)
    );
    assert_eq!(resolve("YEAR"), plain(TypeKeyword::YEAR, "YEAR"));
}

#[test]
fn test_simple_types() {
    for (sql, keyword) in [
        ("date", TypeKeyword::DATE),
        ("TINYBLOB", TypeKeyword::TINYBLOB),
        ("longblob", TypeKeyword::LONGBLOB),
        ("BOOLEAN", TypeKeyword::BOOLEAN),
        ("serial", TypeKeyword::SERIAL),
    ] {
        assert_eq!(resolve(sql), plain(keyword, keyword.as_str()), "{}", sql);
    }
}

#[test]
fn test_collection_types() {
    assert_eq!(
        resolve("enum('small', 'large')"),
        DataType {
            collection_options: vec!["small".to_string(), "large".to_string()],
            ..plain(TypeKeyword::ENUM, "ENUM('small','large')")
        }
    );
}

#[test]
fn test_spatial_types() {
    assert_eq!(resolve("POINT"), plain(TypeKeyword::POINT, "POINT"));
    assert_eq!(resolve("json"), plain(TypeKeyword::JSON, "JSON"));
    assert_eq!(resolve("geometry"), plain(TypeKeyword::GEOMETRY, "GEOMETRY"));
}

// ============================================================================
// Length Conversion Diagnostics
// ============================================================================

#[test]
fn test_length_conversion_failure_keeps_other_fields() {
    let node = parse_data_type("char(4294967296) binary").unwrap();
    let mut diags = Diagnostics::new();
    let dt = resolve_data_type(&node, &mut diags);

    assert_eq!(dt.source, "CHAR(4294967296)");
    assert!(dt.has_length);
    assert_eq!(dt.length, 0);
    assert_eq!(diags.of_kind(DiagnosticKind::Conversion).count(), 1);
}

#[test]
fn test_source_reparses_to_equal_value() {
    for sql in [
        "char(10)",
        "NATIONAL CHARACTER VARYING (255) BINARY",
        "NCHAR VARCHAR(200)",
        "int unsigned zerofill",
        "real(8,2)",
        "DEC(5)",
        "datetime(3)",
        "set('x','y')",
        "LONG VARCHAR CHARACTER SET utf8",
        "multipolygon",
    ] {
        let first = resolve(sql);
        assert_eq!(resolve(&first.source), first, "{}", sql);
    }
}
