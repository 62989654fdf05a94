//! Schema model

mod elements;
mod intermediate;

pub use elements::*;
pub use intermediate::{
    only_table_name, ColumnDeclaration, ColumnDefinition, CreateDefinitions, CreateTable,
};
