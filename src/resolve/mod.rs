//! Semantic analysis of the syntax tree into the schema model

mod constraint;
mod data_type;
mod diagnostics;
mod statement;

pub use constraint::{
    resolve_column_constraint, resolve_default_value, resolve_index_column_names,
    resolve_table_constraint,
};
pub use data_type::resolve_data_type;
pub use diagnostics::{Diagnostic, DiagnosticKind, Diagnostics};
pub use statement::{
    resolve_column_definition, resolve_create_definitions, resolve_create_table, resolve_root,
    resolve_statement,
};
