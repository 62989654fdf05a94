//! MySQL DDL parsing
//!
//! Turns SQL text into the syntax tree in [`syntax`]. Any tokenizer or grammar
//! failure aborts the whole input.

mod column_parser;
mod constraint_parser;
mod create_table_parser;
pub mod identifier_utils;
pub mod keywords;
mod statement_parser;
pub mod syntax;
mod token_parser_base;

use column_parser::ColumnTokenParser;
use constraint_parser::ConstraintTokenParser;
use create_table_parser::CreateTableTokenParser;
use statement_parser::StatementTokenParser;
use token_parser_base::TokenParser;

use crate::error::Result;
use syntax::{ColumnDefinition, CreateTable, DataTypeNode, Root, TableConstraintNode};

/// Parse a whole script of `;`-separated statements.
pub fn parse_sql(sql: &str) -> Result<Root> {
    StatementTokenParser::new(sql)?.parse_root()
}

/// Parse a single data type, e.g. `VARCHAR(255) BINARY`.
pub fn parse_data_type(sql: &str) -> Result<DataTypeNode> {
    let mut base = TokenParser::new(sql)?;
    let node = ColumnTokenParser::new(&mut base).parse_data_type()?;
    base.expect_end()?;
    Ok(node)
}

/// Parse a column definition without its name, e.g. `INT NOT NULL DEFAULT 0`.
pub fn parse_column_definition(sql: &str) -> Result<ColumnDefinition> {
    let mut base = TokenParser::new(sql)?;
    let node = ColumnTokenParser::new(&mut base).parse_column_definition()?;
    base.expect_end()?;
    Ok(node)
}

/// Parse a table constraint, e.g. `PRIMARY KEY (id)`.
pub fn parse_table_constraint(sql: &str) -> Result<TableConstraintNode> {
    let mut base = TokenParser::new(sql)?;
    let node = ConstraintTokenParser::new(&mut base).parse_table_constraint()?;
    base.expect_end()?;
    Ok(node)
}

/// Parse a single CREATE TABLE statement; a trailing `;` is allowed.
pub fn parse_create_table(sql: &str) -> Result<CreateTable> {
    let mut base = TokenParser::new(sql)?;
    let node = CreateTableTokenParser::new(&mut base).parse_create_table()?;
    base.eat_token(&sqlparser::tokenizer::Token::SemiColon);
    base.expect_end()?;
    Ok(node)
}
