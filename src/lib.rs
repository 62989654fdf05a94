//! rust-sqlschema: MySQL `CREATE TABLE` schema extraction
//!
//! This library turns MySQL DDL scripts into a flat schema model: tables,
//! their columns with fully resolved data types and constraints, and the
//! table-level key column lists.
//!
//! ```
//! let tables = rust_sqlschema::from_text(
//!     "CREATE TABLE `user` (`id` bigint(20) NOT NULL AUTO_INCREMENT, PRIMARY KEY (`id`))",
//! )
//! .unwrap();
//! assert_eq!(tables[0].name, "user");
//! assert_eq!(tables[0].columns[0].data_type.as_ref().unwrap().source, "BIGINT(20)");
//! ```

pub mod error;
pub mod export;
pub mod model;
pub mod parser;
pub mod resolve;
pub mod util;

pub use error::{Result, SchemaError};
pub use export::{
    export, export_file, export_files, export_text, from, from_file, from_text, Export, Input,
};
pub use model::{Column, ColumnConstraint, DataType, DefaultValue, KeyKind, Table, TableConstraint};
pub use resolve::{Diagnostic, DiagnosticKind, Diagnostics};
