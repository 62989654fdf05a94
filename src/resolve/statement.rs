//! Statement walker
//!
//! Dispatches over the syntax tree and collects one intermediate
//! [`CreateTable`] per column-definition `CREATE TABLE`.

use tracing::debug;

use super::constraint::{resolve_column_constraint, resolve_table_constraint};
use super::data_type::resolve_data_type;
use super::diagnostics::Diagnostics;
use crate::model::{ColumnDeclaration, ColumnDefinition, CreateDefinitions, CreateTable};
use crate::parser::syntax::{
    self, CreateDefinition, DdlStatement, IndexColumnDefinition, Root, SqlStatement,
};
use crate::util::normalize_identifier;

/// Resolve every statement of a script, keeping statement order.
pub fn resolve_root(root: &Root, diags: &mut Diagnostics) -> Vec<CreateTable> {
    root.statements
        .iter()
        .filter_map(|statement| resolve_statement(statement, diags))
        .collect()
}

/// Resolve one statement; only a column-definition CREATE TABLE yields a result.
pub fn resolve_statement(statement: &SqlStatement, diags: &mut Diagnostics) -> Option<CreateTable> {
    let (kind, other) = match statement {
        SqlStatement::Ddl(DdlStatement::CreateTable(create_table)) => {
            return resolve_create_table(create_table, diags);
        }
        SqlStatement::Ddl(DdlStatement::Other(other)) => {
            debug!(keyword = %other.keyword, "skipping DDL statement");
            return None;
        }
        SqlStatement::Dml(other) => ("DML", other),
        SqlStatement::Transaction(other) => ("transaction", other),
        SqlStatement::Replication(other) => ("replication", other),
        SqlStatement::Prepared(other) => ("prepared", other),
        SqlStatement::Administration(other) => ("administration", other),
        SqlStatement::Utility(other) => ("utility", other),
    };
    diags.unsupported(format!("unsupported {} statement: {}", kind, other.text));
    None
}

/// Resolve a CREATE TABLE; the `LIKE` and query forms yield `None`.
pub fn resolve_create_table(
    create_table: &syntax::CreateTable,
    diags: &mut Diagnostics,
) -> Option<CreateTable> {
    match create_table {
        syntax::CreateTable::Copy { table_name, like } => {
            diags.unsupported(format!(
                "unsupported CREATE TABLE {} LIKE {}",
                table_name.text, like.text
            ));
            None
        }
        syntax::CreateTable::Query { table_name, .. } => {
            diags.unsupported(format!(
                "unsupported CREATE TABLE {} from a query",
                table_name.text
            ));
            None
        }
        syntax::CreateTable::Column {
            table_name,
            definitions,
        } => {
            let name = normalize_identifier(&table_name.text);
            debug!(table = %name, "column CREATE TABLE");
            let definitions = resolve_create_definitions(definitions, diags);
            Some(CreateTable {
                name,
                columns: definitions.column_declarations,
                constraints: definitions.table_constraints,
            })
        }
    }
}

/// Route each create definition by shape; column and constraint order are
/// kept independently.
pub fn resolve_create_definitions(
    definitions: &syntax::CreateDefinitions,
    diags: &mut Diagnostics,
) -> CreateDefinitions {
    let mut resolved = CreateDefinitions::default();

    for definition in &definitions.definitions {
        match definition {
            CreateDefinition::ColumnDeclaration { column, definition } => {
                let name = normalize_identifier(&column.uid.text);
                debug!(column = %name, "column declaration");
                resolved.column_declarations.push(ColumnDeclaration {
                    name,
                    column_definition: resolve_column_definition(definition, diags),
                });
            }
            CreateDefinition::ConstraintDeclaration(constraint) => {
                if let Some(constraint) = resolve_table_constraint(constraint, diags) {
                    resolved.table_constraints.push(constraint);
                }
            }
            CreateDefinition::IndexDeclaration(index) => {
                let name = match index {
                    IndexColumnDefinition::Simple { name, .. }
                    | IndexColumnDefinition::Special { name, .. } => name,
                };
                diags.unsupported(format!(
                    "unsupported index declaration {}",
                    name.as_ref().map(|uid| uid.text.as_str()).unwrap_or("")
                ));
            }
        }
    }

    resolved
}

/// Resolve a data type plus its constraint clauses.
pub fn resolve_column_definition(
    definition: &syntax::ColumnDefinition,
    diags: &mut Diagnostics,
) -> ColumnDefinition {
    ColumnDefinition {
        data_type: Some(resolve_data_type(&definition.data_type, diags)),
        column_constraint: resolve_column_constraint(&definition.constraints, diags),
    }
}
