//! Schema model element types

use std::fmt;

use serde::{Deserialize, Serialize};

/// A resolved `CREATE TABLE`
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Table {
    /// Unqualified table name
    pub name: String,
    /// Columns in declaration order
    pub columns: Vec<Column>,
    /// Table-level key constraints in declaration order
    pub constraints: Vec<TableConstraint>,
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "table name: {}", self.name)?;
        for column in &self.columns {
            let source = column
                .data_type
                .as_ref()
                .map(|dt| dt.source.as_str())
                .unwrap_or_default();
            write!(f, "col {}\t\t{}\t\t", column.name, source)?;
            if !column.constraint.comment.is_empty() {
                write!(f, "comment {}", column.constraint.comment)?;
            }
            writeln!(f)?;
        }
        for constraint in &self.constraints {
            if !constraint.column_primary_key.is_empty() {
                writeln!(f, "primary key: {}", constraint.column_primary_key.join(", "))?;
            }
            if !constraint.column_unique_key.is_empty() {
                writeln!(f, "unique key: {}", constraint.column_unique_key.join(", "))?;
            }
            if !constraint.column_foreign_key.is_empty() {
                writeln!(f, "foreign key: {}", constraint.column_foreign_key.join(", "))?;
            }
        }
        Ok(())
    }
}

/// A table column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Column {
    pub name: String,
    /// `None` when the declaration carried no resolvable type
    pub data_type: Option<DataType>,
    pub constraint: ColumnConstraint,
}

/// A column data type, every grammar shape folded into one record
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataType {
    /// Uppercased type keyword, e.g. "VARCHAR"
    pub name: String,
    /// Grammar token id of the type keyword; distinguishes synonyms such as INT/INTEGER
    pub number: i32,
    /// Canonical source text, e.g. "VARCHAR(255)" or "INT(10) UNSIGNED ZEROFILL"
    pub source: String,

    pub has_length: bool,
    pub length: u32,
    pub is_national: bool,
    pub is_binary: bool,
    pub is_nchar: bool,
    pub is_varying: bool,

    pub is_signed: bool,
    pub is_unsigned: bool,
    pub is_zero_fill: bool,

    /// `(precision,scale)` lengths
    pub has_two_length: bool,
    pub len1: u32,
    pub len2: u32,

    // LONG VARCHAR legacy form
    pub is_varchar: bool,
    pub is_char: bool,
    pub is_charset: bool,
    pub is_character: bool,
    pub charset_name: String,

    /// ENUM/SET members, quotes stripped
    pub collection_options: Vec<String>,
}

/// Which key marker a column carries.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum KeyKind {
    #[default]
    None,
    /// Bare `KEY`
    Key,
    /// `PRIMARY KEY`
    Primary,
}

/// Column-level constraints folded from every clause on one column
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnConstraint {
    pub not_null: bool,
    /// `None` when no DEFAULT clause was given
    pub default_value: Option<DefaultValue>,
    pub auto_increment: bool,
    pub primary: bool,
    pub key: bool,
    pub unique: bool,
    pub comment: String,
}

impl ColumnConstraint {
    /// Record a `KEY` / `PRIMARY KEY` clause.
    ///
    /// Each clause sets exactly one of the two flags.
    pub fn set_key_kind(&mut self, kind: KeyKind) {
        match kind {
            KeyKind::Key => self.key = true,
            KeyKind::Primary => self.primary = true,
            KeyKind::None => {}
        }
    }

    /// The strongest key marker on this column.
    pub fn key_kind(&self) -> KeyKind {
        if self.primary {
            KeyKind::Primary
        } else if self.key {
            KeyKind::Key
        } else {
            KeyKind::None
        }
    }
}

/// A DEFAULT clause value
///
/// `DEFAULT NULL` is `{ value: "", is: false }`; any other literal has `is: true`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DefaultValue {
    pub value: String,
    pub is: bool,
}

/// A table-level key constraint; at most one field is non-empty
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TableConstraint {
    pub column_primary_key: Vec<String>,
    /// Column names, not the index name
    pub column_unique_key: Vec<String>,
    pub column_foreign_key: Vec<String>,
}
