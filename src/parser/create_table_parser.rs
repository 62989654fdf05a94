//! Token-based CREATE TABLE parsing for MySQL
//!
//! ## Supported Syntax
//!
//! ```sql
//! CREATE [TEMPORARY] TABLE [IF NOT EXISTS] tbl LIKE other
//! CREATE [TEMPORARY] TABLE [IF NOT EXISTS] tbl (LIKE other)
//! CREATE [TEMPORARY] TABLE [IF NOT EXISTS] tbl [(create_definition, ...)]
//!     [table_options] [partition_options] [IGNORE | REPLACE] [AS] SELECT ...
//! CREATE [TEMPORARY] TABLE [IF NOT EXISTS] tbl (create_definition, ...)
//!     [table_options] [partition_options]
//! ```
//!
//! Table options and partition clauses are checked and consumed without being
//! modelled. The statement ends at `;`, the end of input, or the first word of a
//! following statement.

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use super::column_parser::ColumnTokenParser;
use super::constraint_parser::ConstraintTokenParser;
use super::statement_parser::starts_statement;
use super::syntax::{CreateDefinition, CreateDefinitions, CreateTable, FullColumnName};
use super::token_parser_base::TokenParser;
use crate::error::Result;

/// Table options written as `name [=] value`
const TABLE_OPTIONS: &[&str] = &[
    "AUTOEXTEND_SIZE",
    "AUTO_INCREMENT",
    "AVG_ROW_LENGTH",
    "CHECKSUM",
    "PAGE_CHECKSUM",
    "COMMENT",
    "COMPRESSION",
    "CONNECTION",
    "DELAY_KEY_WRITE",
    "ENCRYPTION",
    "ENCRYPTION_KEY_ID",
    "ENGINE",
    "ENGINE_ATTRIBUTE",
    "INSERT_METHOD",
    "KEY_BLOCK_SIZE",
    "MAX_ROWS",
    "MIN_ROWS",
    "PACK_KEYS",
    "PAGE_COMPRESSED",
    "PAGE_COMPRESSION_LEVEL",
    "PASSWORD",
    "ROW_FORMAT",
    "SECONDARY_ENGINE",
    "SECONDARY_ENGINE_ATTRIBUTE",
    "STATS_AUTO_RECALC",
    "STATS_PERSISTENT",
    "STATS_SAMPLE_PAGES",
    "TABLE_TYPE",
    "TRANSACTIONAL",
    "TYPE",
];

/// Token-based CREATE TABLE parser
pub struct CreateTableTokenParser<'a> {
    base: &'a mut TokenParser,
}

impl<'a> CreateTableTokenParser<'a> {
    pub fn new(base: &'a mut TokenParser) -> Self {
        Self { base }
    }

    /// Parse a CREATE TABLE statement up to (not including) its terminating `;`.
    pub fn parse_create_table(&mut self) -> Result<CreateTable> {
        self.base.expect_keyword(Keyword::CREATE)?;
        self.base.eat_keyword(Keyword::TEMPORARY);
        self.base.expect_keyword(Keyword::TABLE)?;

        if self.base.eat_keyword(Keyword::IF) {
            self.base.expect_keyword(Keyword::NOT)?;
            self.base.expect_keyword(Keyword::EXISTS)?;
        }

        let table_name = self.base.parse_table_name()?;

        if self.base.eat_keyword(Keyword::LIKE) {
            let like = self.base.parse_table_name()?;
            return Ok(CreateTable::Copy { table_name, like });
        }

        if self.base.check_token(&Token::LParen) && self.base.peek_keyword(1, Keyword::LIKE) {
            self.base.advance();
            self.base.advance();
            let like = self.base.parse_table_name()?;
            self.base.expect_token(&Token::RParen)?;
            return Ok(CreateTable::Copy { table_name, like });
        }

        let definitions = if self.base.check_token(&Token::LParen) && !self.starts_query(1) {
            Some(self.parse_create_definitions()?)
        } else {
            None
        };

        let tail_start = self.base.pos();
        let query = self.parse_table_tail()?;

        match (definitions, query) {
            (definitions, Some(query)) => Ok(CreateTable::Query {
                table_name,
                definitions,
                query,
            }),
            (Some(definitions), None) => Ok(CreateTable::Column {
                table_name,
                definitions,
            }),
            (None, None) => {
                self.base.set_pos(tail_start);
                Err(self.base.error("'(', LIKE or SELECT"))
            }
        }
    }

    /// Parse `(create_definition, ...)`.
    pub fn parse_create_definitions(&mut self) -> Result<CreateDefinitions> {
        self.base.expect_token(&Token::LParen)?;

        let mut definitions = Vec::new();
        loop {
            definitions.push(self.parse_create_definition()?);
            if !self.base.eat_token(&Token::Comma) {
                break;
            }
        }

        self.base.expect_token(&Token::RParen)?;
        Ok(CreateDefinitions { definitions })
    }

    fn parse_create_definition(&mut self) -> Result<CreateDefinition> {
        let is_constraint = self.base.check_keyword(Keyword::CONSTRAINT)
            || self.base.check_keyword(Keyword::PRIMARY)
            || self.base.check_keyword(Keyword::UNIQUE)
            || self.base.check_keyword(Keyword::FOREIGN)
            || self.base.check_keyword(Keyword::CHECK);
        if is_constraint {
            let constraint = ConstraintTokenParser::new(self.base).parse_table_constraint()?;
            return Ok(CreateDefinition::ConstraintDeclaration(constraint));
        }

        let is_index = self.base.check_keyword(Keyword::INDEX)
            || self.base.check_keyword(Keyword::KEY)
            || self.base.check_word_ci("FULLTEXT")
            || self.base.check_word_ci("SPATIAL");
        if is_index {
            let index = ConstraintTokenParser::new(self.base).parse_index_column_definition()?;
            return Ok(CreateDefinition::IndexDeclaration(index));
        }

        let column = self.parse_full_column_name()?;
        let definition = ColumnTokenParser::new(self.base).parse_column_definition()?;
        Ok(CreateDefinition::ColumnDeclaration { column, definition })
    }

    /// Parse `uid ('.' uid){0,2}`.
    fn parse_full_column_name(&mut self) -> Result<FullColumnName> {
        let uid = self.base.parse_uid()?;
        let mut dotted = Vec::new();
        while dotted.len() < 2 && self.base.eat_token(&Token::Period) {
            dotted.push(self.base.parse_uid()?.text);
        }
        Ok(FullColumnName { uid, dotted })
    }

    /// Whether a query starts `offset` tokens ahead: `SELECT` or `(SELECT`.
    fn starts_query(&self, offset: usize) -> bool {
        self.base.peek_keyword(offset, Keyword::SELECT)
            || (matches!(
                self.base.peek(offset).map(|t| &t.token),
                Some(Token::LParen)
            ) && self.base.peek_keyword(offset + 1, Keyword::SELECT))
    }

    /// Number of `[IGNORE | REPLACE] [AS]` tokens before a trailing query, if one starts here.
    fn query_prefix_len(&self) -> Option<usize> {
        let mut offset = 0;
        if self.base.check_keyword(Keyword::IGNORE) || self.base.check_keyword(Keyword::REPLACE) {
            offset += 1;
        }
        if self.base.peek_keyword(offset, Keyword::AS) {
            offset += 1;
        }
        self.starts_query(offset).then_some(offset)
    }

    /// Parse table options and partitioning, then an optional trailing query.
    ///
    /// Stops at `;`, the end of input or the first word of a following statement.
    /// Returns the query text if the statement is a CREATE ... SELECT.
    fn parse_table_tail(&mut self) -> Result<Option<String>> {
        let mut first = true;
        loop {
            if !first {
                self.base.eat_token(&Token::Comma);
            }
            first = false;

            if self.base.is_at_end() || self.base.check_token(&Token::SemiColon) {
                return Ok(None);
            }
            if let Some(prefix) = self.query_prefix_len() {
                for _ in 0..prefix {
                    self.base.advance();
                }
                return Ok(Some(self.consume_query()));
            }
            if self.base.check_keyword(Keyword::PARTITION) && self.base.peek_keyword(1, Keyword::BY)
            {
                self.skip_partition_options();
                continue;
            }
            if self.parse_table_option()? {
                continue;
            }
            if starts_statement(self.base) {
                return Ok(None);
            }
            return Err(self.base.error("table option"));
        }
    }

    /// Parse one `name [=] value` table option; `false` if none starts here.
    fn parse_table_option(&mut self) -> Result<bool> {
        let has_default = self.base.eat_keyword(Keyword::DEFAULT);
        if self.eat_charset_keyword() || self.base.eat_keyword(Keyword::COLLATE) {
            self.base.eat_token(&Token::Eq);
            self.expect_option_value()?;
            return Ok(true);
        }
        if has_default {
            return Err(self.base.error("CHARACTER SET or COLLATE"));
        }

        if (self.base.check_word_ci("DATA") || self.base.check_keyword(Keyword::INDEX))
            && self.base.peek_word_ci(1, "DIRECTORY")
        {
            self.base.advance();
            self.base.advance();
            self.base.eat_token(&Token::Eq);
            self.expect_option_value()?;
            return Ok(true);
        }

        if self.base.eat_word_ci("TABLESPACE") {
            self.base.eat_token(&Token::Eq);
            self.expect_option_value()?;
            if self.base.eat_word_ci("STORAGE") {
                self.expect_option_value()?;
            }
            return Ok(true);
        }

        if self.base.eat_word_ci("UNION") {
            self.base.eat_token(&Token::Eq);
            self.base.consume_parenthesized()?;
            return Ok(true);
        }

        if self.base.check_word_ci("START") && self.base.peek_word_ci(1, "TRANSACTION") {
            self.base.advance();
            self.base.advance();
            return Ok(true);
        }

        let is_option = self
            .base
            .current_word_upper()
            .is_some_and(|word| TABLE_OPTIONS.contains(&word.as_str()));
        if is_option {
            self.base.advance();
            self.base.eat_token(&Token::Eq);
            self.expect_option_value()?;
            return Ok(true);
        }

        Ok(false)
    }

    /// `CHARACTER SET`, `CHAR SET` or `CHARSET`
    fn eat_charset_keyword(&mut self) -> bool {
        if (self.base.check_word_ci("CHARACTER") || self.base.check_word_ci("CHAR"))
            && self.base.peek_word_ci(1, "SET")
        {
            self.base.advance();
            self.base.advance();
            return true;
        }
        self.base.eat_word_ci("CHARSET")
    }

    /// A single word, number or string literal.
    fn expect_option_value(&mut self) -> Result<()> {
        let is_value = matches!(
            self.base.current_token().map(|t| &t.token),
            Some(
                Token::Word(_)
                    | Token::Number(_, _)
                    | Token::SingleQuotedString(_)
                    | Token::DoubleQuotedString(_)
            )
        );
        if !is_value {
            return Err(self.base.error("table option value"));
        }
        self.base.advance();
        Ok(())
    }

    /// Skip `PARTITION BY ...` up to the statement end, a trailing query or
    /// the next statement.
    fn skip_partition_options(&mut self) {
        self.base.advance();
        self.base.advance();

        let mut depth = 0usize;
        while let Some(token) = self.base.current_token().map(|t| t.token.clone()) {
            if depth == 0
                && (token == Token::SemiColon
                    || self.query_prefix_len().is_some()
                    || starts_statement(self.base))
            {
                return;
            }
            match token {
                Token::LParen => depth += 1,
                Token::RParen => depth = depth.saturating_sub(1),
                _ => {}
            }
            self.base.advance();
        }
    }

    fn consume_query(&mut self) -> String {
        let start = self.base.pos();
        self.base.skip_to_statement_end();
        self.base.tokens_to_sql(start, self.base.pos())
    }
}
