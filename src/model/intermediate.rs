//! Per-statement structures built while walking one CREATE TABLE

use super::elements::{Column, ColumnConstraint, DataType, Table, TableConstraint};

/// Separator left between qualifier and name once the outer quotes are trimmed
const QUALIFIER_SEPARATOR: &str = "`.`";

/// A resolved column-definition CREATE TABLE, name not yet unqualified
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateTable {
    pub name: String,
    pub columns: Vec<ColumnDeclaration>,
    pub constraints: Vec<TableConstraint>,
}

impl CreateTable {
    /// Convert into the output model.
    pub fn convert(self) -> Table {
        let columns = self
            .columns
            .into_iter()
            .map(|declaration| {
                let definition = declaration.column_definition;
                Column {
                    name: declaration.name,
                    data_type: definition.data_type.filter(|dt| !dt.name.is_empty()),
                    constraint: definition.column_constraint,
                }
            })
            .collect();

        Table {
            name: only_table_name(&self.name),
            columns,
            constraints: self.constraints,
        }
    }
}

/// Column and constraint entries of a create definition list, each kept in order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CreateDefinitions {
    pub column_declarations: Vec<ColumnDeclaration>,
    pub table_constraints: Vec<TableConstraint>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDeclaration {
    pub name: String,
    pub column_definition: ColumnDefinition,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ColumnDefinition {
    pub data_type: Option<DataType>,
    pub column_constraint: ColumnConstraint,
}

/// Drop a database qualifier: "db`.`tbl" becomes "tbl".
///
/// Only the backtick-dot-backtick form is recognized; other names pass through.
pub fn only_table_name(name: &str) -> String {
    name.rsplit(QUALIFIER_SEPARATOR)
        .next()
        .unwrap_or(name)
        .to_string()
}
