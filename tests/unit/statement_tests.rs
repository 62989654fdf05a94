//! Unit tests for statement walking and CREATE TABLE conversion

use pretty_assertions::assert_eq;
use rust_sqlschema::parser::keywords::TypeKeyword;
use rust_sqlschema::parser::{parse_create_table, parse_sql};
use rust_sqlschema::resolve::{resolve_create_table, resolve_root, DiagnosticKind, Diagnostics};
use rust_sqlschema::{
    Column, ColumnConstraint, DataType, DefaultValue, SchemaError, Table, TableConstraint,
};

const USER_TABLE: &str = "CREATE TABLE `user` (\n  \
    `id` bigint NOT NULL AUTO_INCREMENT,\n  \
    `number` varchar(255) NOT NULL DEFAULT '' COMMENT '学号',\n  \
    `name` varchar(255) CHARACTER SET utf8mb4 COLLATE utf8mb4_0900_ai_ci DEFAULT NULL COMMENT '用户名称',\n  \
    `gender` char(5) NOT NULL COMMENT '男｜女｜未公开',\n  \
    `create_time` timestamp NULL DEFAULT NULL,\n  \
    `update_time` timestamp NULL DEFAULT CURRENT_TIMESTAMP ON UPDATE CURRENT_TIMESTAMP,\n  \
    PRIMARY KEY (`id`),\n  \
    UNIQUE KEY `number_unique` (`number`) USING BTREE,\n  \
    UNIQUE KEY `number_unique2` (`number`) USING BTREE\n\
    ) ENGINE=InnoDB AUTO_INCREMENT=8 DEFAULT CHARSET=utf8mb4 COLLATE=utf8mb4_0900_ai_ci;";

fn data_type(keyword: TypeKeyword, source: &str, length: Option<u32>) -> Option<DataType> {
    Some(DataType {
        name: keyword.as_str().to_string(),
        number: keyword.token_type(),
        source: source.to_string(),
        has_length: length.is_some(),
        length: length.unwrap_or(0),
        ..Default::default()
    })
}

fn resolve_one(sql: &str) -> (Option<Table>, Diagnostics) {
    let node = parse_create_table(sql).unwrap();
    let mut diags = Diagnostics::new();
    let table = resolve_create_table(&node, &mut diags).map(|t| t.convert());
    (table, diags)
}

#[test]
fn test_column_create_table() {
    let (table, diags) = resolve_one(USER_TABLE);
    assert!(diags.is_empty(), "{:?}", diags);

    let expected = Table {
        name: "user".to_string(),
        columns: vec![
            Column {
                name: "id".to_string(),
                data_type: data_type(TypeKeyword::BIGINT, "BIGINT", None),
                constraint: ColumnConstraint {
                    not_null: true,
                    auto_increment: true,
                    ..Default::default()
                },
            },
            Column {
                name: "number".to_string(),
                data_type: data_type(TypeKeyword::VARCHAR, "VARCHAR(255)", Some(255)),
                constraint: ColumnConstraint {
                    not_null: true,
                    default_value: Some(DefaultValue {
                        value: String::new(),
                        is: true,
                    }),
                    comment: "学号".to_string(),
                    ..Default::default()
                },
            },
            Column {
                name: "name".to_string(),
                data_type: data_type(TypeKeyword::VARCHAR, "VARCHAR(255)", Some(255)),
                constraint: ColumnConstraint {
                    default_value: Some(DefaultValue::default()),
                    comment: "用户名称".to_string(),
                    ..Default::default()
                },
            },
            Column {
                name: "gender".to_string(),
                data_type: data_type(TypeKeyword::CHAR, "CHAR(5)", Some(5)),
                constraint: ColumnConstraint {
                    not_null: true,
                    comment: "男｜女｜未公开".to_string(),
                    ..Default::default()
                },
            },
            Column {
                name: "create_time".to_string(),
                data_type: data_type(TypeKeyword::TIMESTAMP, "TIMESTAMP", None),
                constraint: ColumnConstraint {
                    default_value: Some(DefaultValue::default()),
                    ..Default::default()
                },
            },
            Column {
                name: "update_time".to_string(),
                data_type: data_type(TypeKeyword::TIMESTAMP, "TIMESTAMP", None),
                constraint: ColumnConstraint {
                    default_value: Some(DefaultValue {
                        value: "CURRENT_TIMESTAMPONUPDATECURRENT_TIMESTAMP".to_string(),
                        is: true,
                    }),
                    ..Default::default()
                },
            },
        ],
        constraints: vec![
            TableConstraint {
                column_primary_key: vec!["id".to_string()],
                ..Default::default()
            },
            TableConstraint {
                column_unique_key: vec!["number".to_string()],
                ..Default::default()
            },
            TableConstraint {
                column_unique_key: vec!["number".to_string()],
                ..Default::default()
            },
        ],
    };

    assert_eq!(table, Some(expected));
}

#[test]
fn test_copy_create_table_is_none() {
    let (table, diags) = resolve_one("create table new_t  (like t1);");
    assert_eq!(table, None);
    assert_eq!(diags.of_kind(DiagnosticKind::Unsupported).count(), 1);
}

#[test]
fn test_query_create_table_is_none() {
    let (table, _) = resolve_one(
        "CREATE TABLE test (a INT NOT NULL AUTO_INCREMENT,PRIMARY KEY (a), KEY(b))ENGINE=InnoDB SELECT b,c FROM test2;",
    );
    assert_eq!(table, None);
}

#[test]
fn test_qualified_table_name() {
    let (table, _) = resolve_one("CREATE TABLE IF NOT EXISTS `shop`.`orders` (`id` int)");
    assert_eq!(table.unwrap().name, "orders");
}

#[test]
fn test_column_and_constraint_order_kept_independently() {
    let (table, diags) = resolve_one(
        "CREATE TABLE t (a int, UNIQUE KEY (b), b int, INDEX idx (a), PRIMARY KEY (a), c int)",
    );
    let table = table.unwrap();

    let names: Vec<_> = table.columns.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
    assert_eq!(table.constraints[0].column_unique_key, vec!["b"]);
    assert_eq!(table.constraints[1].column_primary_key, vec!["a"]);
    // the INDEX declaration
    assert_eq!(diags.len(), 1);
}

#[test]
fn test_script_keeps_statement_order() {
    let root = parse_sql(
        "SET NAMES utf8mb4;\n\
         CREATE TABLE b (x int);\n\
         CREATE TABLE c LIKE b;\n\
         ALTER TABLE b ADD COLUMN y int;\n\
         CREATE TABLE a (x int);\n\
         SELECT 1;",
    )
    .unwrap();
    let mut diags = Diagnostics::new();
    let names: Vec<_> = resolve_root(&root, &mut diags)
        .into_iter()
        .map(|t| t.convert().name)
        .collect();

    assert_eq!(names, vec!["b", "a"]);
    // SET, LIKE and SELECT; ALTER is skipped without a diagnostic
    assert_eq!(diags.of_kind(DiagnosticKind::Unsupported).count(), 3);
}

#[test]
fn test_tables_without_semicolons() {
    let tables = rust_sqlschema::from_text(
        "CREATE TABLE a (x int) ENGINE=InnoDB\nCREATE TABLE b (y int)\nCREATE TABLE c (z int)",
    )
    .unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b", "c"]);
}

#[test]
fn test_garbage_after_table_is_syntax_error() {
    let result = rust_sqlschema::from_text("CREATE TABLE t (a int) foo bar;\nCREATE TABLE u (b int);");
    assert!(matches!(result, Err(SchemaError::SyntaxError { .. })));
}

#[test]
fn test_delimiter_blocks_do_not_fail() {
    let tables = rust_sqlschema::from_text(
        "DELIMITER ;;\n\
         CREATE TABLE a (x int);;\n\
         DELIMITER ;\n\
         CREATE TABLE b (y int);",
    )
    .unwrap();
    let names: Vec<_> = tables.iter().map(|t| t.name.as_str()).collect();
    assert_eq!(names, vec!["a", "b"]);
}

#[test]
fn test_display() {
    let (table, _) = resolve_one(
        "CREATE TABLE `t` (`id` int(11) COMMENT 'key', `g` int, PRIMARY KEY (`id`), \
         UNIQUE KEY (`g`), FOREIGN KEY (`g`) REFERENCES other (`id`))",
    );
    assert_eq!(
        table.unwrap().to_string(),
        "table name: t\n\
         col id\t\tINT(11)\t\tcomment key\n\
         col g\t\tINT\t\t\n\
         primary key: id\n\
         unique key: g\n\
         foreign key: g\n"
    );
}
