//! Token-based table constraint and index parsing for MySQL
//!
//! ## Supported Syntax
//!
//! ```sql
//! [CONSTRAINT [name]] PRIMARY KEY [index] [USING {BTREE|HASH}] (key_part, ...) [index_option ...]
//! [CONSTRAINT [name]] UNIQUE [INDEX|KEY] [index] [USING {BTREE|HASH}] (key_part, ...) [index_option ...]
//! [CONSTRAINT [name]] FOREIGN KEY [index] (key_part, ...) reference_definition
//! [CONSTRAINT [name]] CHECK (expr)
//! {INDEX|KEY} [index] [USING {BTREE|HASH}] (key_part, ...) [index_option ...]
//! {FULLTEXT|SPATIAL} [INDEX|KEY] [index] (key_part, ...) [index_option ...]
//!
//! key_part: {col_name [(length)] | 'literal' | (expr)} [ASC | DESC]
//! ```

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use super::identifier_utils::string_literal_text;
use super::syntax::{
    IndexColumnDefinition, IndexColumnName, IndexColumnNames, IndexColumnTarget,
    ReferenceDefinition, SortOrder, TableConstraintNode, Uid,
};
use super::token_parser_base::TokenParser;
use crate::error::Result;

/// Token-based constraint parser
pub struct ConstraintTokenParser<'a> {
    base: &'a mut TokenParser,
}

impl<'a> ConstraintTokenParser<'a> {
    pub fn new(base: &'a mut TokenParser) -> Self {
        Self { base }
    }

    /// Parse a table-level constraint.
    pub fn parse_table_constraint(&mut self) -> Result<TableConstraintNode> {
        let name = self.parse_constraint_name()?;

        if self.base.eat_keyword(Keyword::PRIMARY) {
            self.base.expect_keyword(Keyword::KEY)?;
            let index = self.parse_index_name()?;
            let index_type = self.parse_index_type()?;
            let columns = self.parse_index_column_names()?;
            self.parse_index_options()?;
            return Ok(TableConstraintNode::PrimaryKey {
                name,
                index,
                index_type,
                columns,
            });
        }

        if self.base.eat_keyword(Keyword::UNIQUE) {
            let index_format = self.parse_index_format();
            let index = self.parse_index_name()?;
            self.parse_index_type()?;
            let columns = self.parse_index_column_names()?;
            self.parse_index_options()?;
            return Ok(TableConstraintNode::UniqueKey {
                name,
                index_format,
                index,
                columns,
            });
        }

        if self.base.eat_keyword(Keyword::FOREIGN) {
            self.base.expect_keyword(Keyword::KEY)?;
            let index = self.parse_index_name()?;
            let columns = self.parse_index_column_names()?;
            let reference = self.parse_reference_definition()?;
            return Ok(TableConstraintNode::ForeignKey {
                name,
                index,
                columns,
                reference,
            });
        }

        if self.base.eat_keyword(Keyword::CHECK) {
            let expression = self.base.consume_parenthesized()?;
            return Ok(TableConstraintNode::Check { name, expression });
        }

        Err(self.base.error("PRIMARY KEY, UNIQUE, FOREIGN KEY or CHECK"))
    }

    /// Parse an index declaration inside a create definition list.
    pub fn parse_index_column_definition(&mut self) -> Result<IndexColumnDefinition> {
        if let Some(kind) = self.eat_special_index_kind() {
            self.parse_index_format();
            let name = self.parse_index_name()?;
            let columns = self.parse_index_column_names()?;
            self.parse_index_options()?;
            return Ok(IndexColumnDefinition::Special {
                kind,
                name,
                columns,
            });
        }

        let index_format = self
            .parse_index_format()
            .ok_or_else(|| self.base.error("INDEX or KEY"))?;
        let name = self.parse_index_name()?;
        self.parse_index_type()?;
        let columns = self.parse_index_column_names()?;
        self.parse_index_options()?;
        Ok(IndexColumnDefinition::Simple {
            index_format,
            name,
            columns,
        })
    }

    /// Parse `REFERENCES tbl [(key_part, ...)] [MATCH type] [ON DELETE action] [ON UPDATE action]`.
    pub fn parse_reference_definition(&mut self) -> Result<ReferenceDefinition> {
        self.base.expect_keyword(Keyword::REFERENCES)?;
        let table_name = self.base.parse_table_name()?;

        let columns = if self.base.check_token(&Token::LParen) {
            Some(self.parse_index_column_names()?)
        } else {
            None
        };

        let match_type = if self.base.eat_word_ci("MATCH") {
            Some(self.expect_one_of(&["FULL", "PARTIAL", "SIMPLE"])?)
        } else {
            None
        };

        let mut on_delete = None;
        let mut on_update = None;
        while self.at_reference_action() {
            self.base.advance();
            if self.base.eat_keyword(Keyword::DELETE) {
                on_delete = Some(self.parse_reference_control_type()?);
            } else {
                self.base.expect_keyword(Keyword::UPDATE)?;
                on_update = Some(self.parse_reference_control_type()?);
            }
        }

        Ok(ReferenceDefinition {
            table_name,
            columns,
            match_type,
            on_delete,
            on_update,
        })
    }

    /// Parse `(key_part, ...)`.
    pub fn parse_index_column_names(&mut self) -> Result<IndexColumnNames> {
        self.base.expect_token(&Token::LParen)?;
        let mut columns = vec![self.parse_index_column_name()?];
        while self.base.eat_token(&Token::Comma) {
            columns.push(self.parse_index_column_name()?);
        }
        self.base.expect_token(&Token::RParen)?;
        Ok(IndexColumnNames { columns })
    }

    fn parse_index_column_name(&mut self) -> Result<IndexColumnName> {
        let literal = self
            .base
            .current_token()
            .and_then(|t| string_literal_text(&t.token));

        let target = if self.base.check_token(&Token::LParen) {
            IndexColumnTarget::Expression(self.base.consume_parenthesized()?)
        } else if let Some(text) = literal {
            self.base.advance();
            IndexColumnTarget::StringLiteral(text)
        } else {
            IndexColumnTarget::Uid(self.base.parse_uid()?)
        };

        let prefix_length = if self.base.check_token(&Token::LParen) {
            self.base.advance();
            let start = self.base.pos();
            self.base.expect_number()?;
            let text = self.base.tokens_to_string(start, self.base.pos());
            self.base.expect_token(&Token::RParen)?;
            Some(text)
        } else {
            None
        };

        let sort = if self.base.eat_keyword(Keyword::ASC) {
            Some(SortOrder::Asc)
        } else if self.base.eat_keyword(Keyword::DESC) {
            Some(SortOrder::Desc)
        } else {
            None
        };

        Ok(IndexColumnName {
            target,
            prefix_length,
            sort,
        })
    }

    /// `CONSTRAINT [name]`, if present.
    fn parse_constraint_name(&mut self) -> Result<Option<Uid>> {
        if !self.base.eat_keyword(Keyword::CONSTRAINT) {
            return Ok(None);
        }
        let unnamed = self.base.check_keyword(Keyword::PRIMARY)
            || self.base.check_keyword(Keyword::UNIQUE)
            || self.base.check_keyword(Keyword::FOREIGN)
            || self.base.check_keyword(Keyword::CHECK);
        if unnamed {
            Ok(None)
        } else {
            Ok(Some(self.base.parse_uid()?))
        }
    }

    /// Optional index name before the key part list or index type.
    fn parse_index_name(&mut self) -> Result<Option<Uid>> {
        let is_name = matches!(
            self.base.current_token().map(|t| &t.token),
            Some(Token::Word(_))
        ) && !self.base.check_keyword(Keyword::USING);
        if is_name {
            Ok(Some(self.base.parse_uid()?))
        } else {
            Ok(None)
        }
    }

    /// `INDEX` or `KEY`, uppercased.
    fn parse_index_format(&mut self) -> Option<String> {
        if self.base.eat_keyword(Keyword::INDEX) {
            Some("INDEX".to_string())
        } else if self.base.eat_keyword(Keyword::KEY) {
            Some("KEY".to_string())
        } else {
            None
        }
    }

    fn eat_special_index_kind(&mut self) -> Option<String> {
        ["FULLTEXT", "SPATIAL"]
            .into_iter()
            .find(|kind| self.base.eat_word_ci(kind))
            .map(str::to_string)
    }

    /// `USING {BTREE | HASH}`
    fn parse_index_type(&mut self) -> Result<Option<String>> {
        if !self.base.eat_keyword(Keyword::USING) {
            return Ok(None);
        }
        Ok(Some(self.expect_one_of(&["BTREE", "HASH"])?))
    }

    /// Consume trailing index options.
    fn parse_index_options(&mut self) -> Result<()> {
        loop {
            if self.base.eat_word_ci("KEY_BLOCK_SIZE") {
                self.base.eat_token(&Token::Eq);
                self.base.expect_number()?;
            } else if self.base.check_keyword(Keyword::USING) {
                self.parse_index_type()?;
            } else if self.base.eat_keyword(Keyword::WITH) {
                self.base.expect_word_ci("PARSER")?;
                self.base.parse_uid()?;
            } else if self.base.eat_keyword(Keyword::COMMENT) {
                self.base.expect_string_literal()?;
            } else if self.base.eat_word_ci("VISIBLE") || self.base.eat_word_ci("INVISIBLE") {
                continue;
            } else if self.base.eat_word_ci("ENGINE_ATTRIBUTE")
                || self.base.eat_word_ci("SECONDARY_ENGINE_ATTRIBUTE")
            {
                self.base.eat_token(&Token::Eq);
                self.base.expect_string_literal()?;
            } else {
                return Ok(());
            }
        }
    }

    fn at_reference_action(&self) -> bool {
        self.base.check_keyword(Keyword::ON)
            && (self.base.peek_keyword(1, Keyword::DELETE)
                || self.base.peek_keyword(1, Keyword::UPDATE))
            && ["RESTRICT", "CASCADE", "SET", "NO"]
                .iter()
                .any(|word| self.base.peek_word_ci(2, word))
    }

    /// `RESTRICT | CASCADE | SET NULL | SET DEFAULT | NO ACTION`
    fn parse_reference_control_type(&mut self) -> Result<String> {
        if self.base.eat_word_ci("SET") {
            let value = self.expect_one_of(&["NULL", "DEFAULT"])?;
            return Ok(format!("SET {}", value));
        }
        if self.base.eat_word_ci("NO") {
            self.base.expect_word_ci("ACTION")?;
            return Ok("NO ACTION".to_string());
        }
        self.expect_one_of(&["RESTRICT", "CASCADE"])
    }

    fn expect_one_of(&mut self, words: &[&str]) -> Result<String> {
        match self.base.current_word_upper() {
            Some(word) if words.contains(&word.as_str()) => {
                self.base.advance();
                Ok(word)
            }
            _ => Err(self.base.error(&words.join(", "))),
        }
    }
}
