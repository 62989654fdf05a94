//! Unit tests for column and table constraint resolution

use pretty_assertions::assert_eq;
use rust_sqlschema::parser::keywords::TypeKeyword;
use rust_sqlschema::parser::{parse_column_definition, parse_table_constraint};
use rust_sqlschema::resolve::{
    resolve_column_definition, resolve_table_constraint, DiagnosticKind, Diagnostics,
};
use rust_sqlschema::{ColumnConstraint, DataType, DefaultValue, KeyKind, TableConstraint};

fn bigint_20() -> DataType {
    DataType {
        name: "BIGINT".to_string(),
        number: TypeKeyword::BIGINT.token_type(),
        source: "BIGINT(20)".to_string(),
        has_length: true,
        length: 20,
        ..Default::default()
    }
}

fn column(sql: &str) -> (Option<DataType>, ColumnConstraint, Diagnostics) {
    let node = parse_column_definition(sql).unwrap();
    let mut diags = Diagnostics::new();
    let definition = resolve_column_definition(&node, &mut diags);
    (definition.data_type, definition.column_constraint, diags)
}

fn table_constraint(sql: &str) -> (Option<TableConstraint>, Diagnostics) {
    let node = parse_table_constraint(sql).unwrap();
    let mut diags = Diagnostics::new();
    let constraint = resolve_table_constraint(&node, &mut diags);
    (constraint, diags)
}

// ============================================================================
// Column Constraints
// ============================================================================

#[test]
fn test_primary_key_column() {
    let (data_type, constraint, diags) = column(
        "bigint(20) NOT NULL DEFAULT 'test default' PRIMARY KEY COMMENT 'test comment'",
    );
    assert_eq!(data_type, Some(bigint_20()));
    assert_eq!(
        constraint,
        ColumnConstraint {
            not_null: true,
            default_value: Some(DefaultValue {
                value: "test default".to_string(),
                is: true,
            }),
            primary: true,
            comment: "test comment".to_string(),
            ..Default::default()
        }
    );
    assert!(diags.is_empty());
}

#[test]
fn test_null_key_column() {
    let (_, constraint, _) = column("bigint(20) NULL KEY");
    assert_eq!(
        constraint,
        ColumnConstraint {
            key: true,
            ..Default::default()
        }
    );
    assert_eq!(constraint.key_kind(), KeyKind::Key);
}

#[test]
fn test_auto_increment_unique_column() {
    let (_, constraint, _) = column("bigint(20) NULL DEFAULT NULL AUTO_INCREMENT UNIQUE KEY");
    assert_eq!(
        constraint,
        ColumnConstraint {
            auto_increment: true,
            unique: true,
            default_value: Some(DefaultValue::default()),
            ..Default::default()
        }
    );
}

#[test]
fn test_default_empty_string_is_present() {
    let (_, constraint, _) = column("varchar(20) DEFAULT '' AUTO_INCREMENT UNIQUE KEY");
    assert_eq!(
        constraint.default_value,
        Some(DefaultValue {
            value: String::new(),
            is: true,
        })
    );
}

#[test]
fn test_default_forms() {
    let value = |sql: &str| column(sql).1.default_value.map(|d| d.value);

    assert_eq!(value("int DEFAULT 0"), Some("0".to_string()));
    assert_eq!(value("int DEFAULT -1"), Some("-1".to_string()));
    assert_eq!(value("int DEFAULT null"), Some(String::new()));
    assert_eq!(
        value("datetime DEFAULT CURRENT_TIMESTAMP"),
        Some("CURRENT_TIMESTAMP".to_string())
    );
    assert_eq!(value("int"), None);
}

#[test]
fn test_not_null_is_last_clause_wins() {
    let (_, constraint, _) = column("int NOT NULL NULL");
    assert!(!constraint.not_null);
}

#[test]
fn test_comment_strips_line_breaks() {
    let (_, constraint, _) = column("int COMMENT 'first\nsecond'");
    assert_eq!(constraint.comment, "firstsecond");
}

#[test]
fn test_backslash_escapes_kept_as_written() {
    let (_, constraint, _) = column(r"varchar(10) DEFAULT 'x\ty' COMMENT 'it\'s a\nb'");
    assert_eq!(constraint.comment, r"it\'s a\nb");
    assert_eq!(
        constraint.default_value,
        Some(DefaultValue {
            value: r"x\ty".to_string(),
            is: true,
        })
    );
}

#[test]
fn test_escaped_quote_in_default() {
    let (_, constraint, _) = column(r"varchar(10) DEFAULT 'O\'Brien' COMMENT 'say ''hi'''");
    assert_eq!(constraint.default_value.unwrap().value, r"O\'Brien");
    assert_eq!(constraint.comment, "say ''hi");
}

#[test]
fn test_reference_and_check_are_unsupported() {
    let (_, constraint, diags) = column("int REFERENCES other (id) CHECK (x > 0)");
    assert_eq!(constraint, ColumnConstraint::default());
    assert_eq!(diags.of_kind(DiagnosticKind::Unsupported).count(), 2);
}

// ============================================================================
// Table Constraints
// ============================================================================

#[test]
fn test_unique_table_constraint() {
    let (constraint, _) =
        table_constraint("UNIQUE INDEX `data__update_UNIQUE` (`data` ASC, `update_time` DESC)");
    assert_eq!(
        constraint,
        Some(TableConstraint {
            column_unique_key: vec!["data".to_string(), "update_time".to_string()],
            ..Default::default()
        })
    );
}

#[test]
fn test_primary_table_constraint() {
    let (constraint, _) = table_constraint("CONSTRAINT pk primary key (`user_id`, `group_id`)");
    assert_eq!(
        constraint.unwrap().column_primary_key,
        vec!["user_id", "group_id"]
    );
}

#[test]
fn test_foreign_table_constraint() {
    let (constraint, diags) = table_constraint(
        "CONSTRAINT `fk_group` FOREIGN KEY (`group_id`) REFERENCES `group` (`id`) ON DELETE CASCADE",
    );
    assert_eq!(constraint.unwrap().column_foreign_key, vec!["group_id"]);
    assert!(diags.is_empty());
}

#[test]
fn test_prefix_length_key_part() {
    let (constraint, _) = table_constraint("UNIQUE KEY `name_prefix` (`name`(10))");
    assert_eq!(constraint.unwrap().column_unique_key, vec!["name"]);
}

#[test]
fn test_check_table_constraint() {
    let (constraint, diags) = table_constraint("CONSTRAINT positive CHECK (amount > 0)");
    assert_eq!(constraint, None);
    assert_eq!(diags.of_kind(DiagnosticKind::Unsupported).count(), 1);
}
