//! Token-based column definition parsing for MySQL
//!
//! ## Supported Syntax
//!
//! ```sql
//! data_type [column_constraint ...]
//!
//! column_constraint:
//!     [NOT] NULL | DEFAULT default_value | VISIBLE | INVISIBLE
//!   | AUTO_INCREMENT | ON UPDATE CURRENT_TIMESTAMP
//!   | [PRIMARY] KEY | UNIQUE [KEY] | COMMENT 'text'
//!   | COLUMN_FORMAT {FIXED | DYNAMIC | DEFAULT} | STORAGE {DISK | MEMORY | DEFAULT}
//!   | REFERENCES ... | COLLATE name
//!   | [GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]
//!   | SERIAL DEFAULT VALUE | [CONSTRAINT [name]] CHECK (expr)
//! ```

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use super::constraint_parser::ConstraintTokenParser;
use super::identifier_utils::string_literal_text;
use super::keywords::{TypeFamily, TypeKeyword};
use super::syntax::{
    CharSet, CharSetKeyword, CharsetName, CollectionOptions, ColumnConstraintNode,
    ColumnDefinition, DataTypeNode, DefaultValueNode, Dimension, LengthDimension,
    NationalPrefix, NullNotnull, NumericModifier, TypeName,
};
use super::token_parser_base::TokenParser;
use crate::error::Result;

/// Functions accepted where MySQL expects the current timestamp.
const CURRENT_TIMESTAMP_WORDS: [&str; 3] = ["CURRENT_TIMESTAMP", "LOCALTIME", "LOCALTIMESTAMP"];

/// Token-based column definition parser
pub struct ColumnTokenParser<'a> {
    base: &'a mut TokenParser,
}

impl<'a> ColumnTokenParser<'a> {
    pub fn new(base: &'a mut TokenParser) -> Self {
        Self { base }
    }

    /// Parse a data type followed by its column constraints.
    ///
    /// Stops before `,`, `)`, `;` or the end of input.
    pub fn parse_column_definition(&mut self) -> Result<ColumnDefinition> {
        let data_type = self.parse_data_type()?;

        let mut constraints = Vec::new();
        while !self.at_definition_end() {
            constraints.push(self.parse_column_constraint()?);
        }

        Ok(ColumnDefinition {
            data_type,
            constraints,
        })
    }

    fn at_definition_end(&self) -> bool {
        self.base.is_at_end()
            || self.base.check_token(&Token::Comma)
            || self.base.check_token(&Token::RParen)
            || self.base.check_token(&Token::SemiColon)
    }

    // ========================================================================
    // Data types
    // ========================================================================

    /// Parse one data type alternative.
    pub fn parse_data_type(&mut self) -> Result<DataTypeNode> {
        if self.base.check_word_ci("NATIONAL") {
            return self.parse_national_data_type();
        }

        if self.base.check_word_ci("NCHAR") && self.base.peek_word_ci(1, "VARCHAR") {
            self.base.advance();
            let type_name = self.parse_type_name()?;
            let length = self.parse_length_one()?;
            let binary = self.base.eat_word_ci("BINARY");
            return Ok(DataTypeNode::NationalString {
                prefix: NationalPrefix::Nchar,
                type_name,
                length,
                binary,
            });
        }

        let keyword = self
            .base
            .current_type_keyword()
            .ok_or_else(|| self.base.error("data type"))?;

        match keyword.family() {
            TypeFamily::String => self.parse_string_data_type(),
            TypeFamily::Long => {
                if matches!(self.base.peek(1).map(|t| &t.token), Some(Token::LParen)) {
                    self.parse_string_data_type()
                } else if self.base.peek_word_ci(1, "VARBINARY") {
                    let long = self.parse_type_name()?;
                    let varbinary = self.parse_type_name()?;
                    Ok(DataTypeNode::LongVarbinary {
                        long: Some(long),
                        varbinary: Some(varbinary),
                    })
                } else {
                    self.parse_long_varchar_data_type()
                }
            }
            TypeFamily::Integer => {
                let type_name = self.parse_type_name()?;
                let dimension = self.parse_length_one()?.map(Dimension::One);
                let modifiers = self.parse_numeric_modifiers();
                Ok(DataTypeNode::Dimension {
                    type_name,
                    dimension,
                    modifiers,
                })
            }
            TypeFamily::Real => {
                let type_name = self.parse_type_name()?;
                if keyword == TypeKeyword::DOUBLE {
                    self.base.eat_word_ci("PRECISION");
                }
                let dimension = self.parse_length_two()?.map(Dimension::Two);
                let modifiers = self.parse_numeric_modifiers();
                Ok(DataTypeNode::Dimension {
                    type_name,
                    dimension,
                    modifiers,
                })
            }
            TypeFamily::Decimal => {
                let type_name = self.parse_type_name()?;
                let dimension = self.parse_length_two_optional()?.map(Dimension::TwoOptional);
                let modifiers = self.parse_numeric_modifiers();
                Ok(DataTypeNode::Dimension {
                    type_name,
                    dimension,
                    modifiers,
                })
            }
            TypeFamily::Temporal => {
                let type_name = self.parse_type_name()?;
                let dimension = self.parse_length_one()?.map(Dimension::One);
                Ok(DataTypeNode::Dimension {
                    type_name,
                    dimension,
                    modifiers: Vec::new(),
                })
            }
            TypeFamily::Simple => Ok(DataTypeNode::Simple {
                type_name: self.parse_type_name()?,
            }),
            TypeFamily::Collection => {
                let type_name = self.parse_type_name()?;
                let options = self.parse_collection_options()?;
                let binary = self.base.eat_word_ci("BINARY");
                let charset = self.parse_charset()?;
                Ok(DataTypeNode::Collection {
                    type_name,
                    options,
                    binary,
                    charset,
                })
            }
            TypeFamily::Spatial => {
                let type_name = self.parse_type_name()?;
                let srid = if self.base.eat_word_ci("SRID") {
                    Some(self.parse_number_text()?)
                } else {
                    None
                };
                Ok(DataTypeNode::Spatial { type_name, srid })
            }
        }
    }

    /// `NATIONAL {CHAR | CHARACTER | VARCHAR} [VARYING] [(n)] [BINARY] [VARYING]`
    fn parse_national_data_type(&mut self) -> Result<DataTypeNode> {
        self.base.expect_word_ci("NATIONAL")?;

        let keyword = self.base.current_type_keyword();
        if !matches!(
            keyword,
            Some(TypeKeyword::CHAR | TypeKeyword::CHARACTER | TypeKeyword::VARCHAR)
        ) {
            return Err(self.base.error("CHAR, CHARACTER or VARCHAR"));
        }
        let can_vary = keyword != Some(TypeKeyword::VARCHAR);

        let type_name = self.parse_type_name()?;
        let mut varying = can_vary && self.base.eat_word_ci("VARYING");
        let length = self.parse_length_one()?;
        let binary = self.base.eat_word_ci("BINARY");
        if can_vary && !varying {
            varying = self.base.eat_word_ci("VARYING");
        }

        if varying {
            Ok(DataTypeNode::NationalVaryingString {
                type_name,
                length,
                binary,
            })
        } else {
            Ok(DataTypeNode::NationalString {
                prefix: NationalPrefix::National,
                type_name,
                length,
                binary,
            })
        }
    }

    /// `type [VARYING] [(n)] [BINARY] [charset name] [COLLATE name | BINARY]`
    fn parse_string_data_type(&mut self) -> Result<DataTypeNode> {
        let type_name = self.parse_type_name()?;
        let varying = self.base.eat_word_ci("VARYING");
        let length = self.parse_length_one()?;
        let mut binary = self.base.eat_word_ci("BINARY");
        let charset = self.parse_charset()?;
        let collation = self.parse_collation()?;
        if collation.is_none() && self.base.eat_word_ci("BINARY") {
            binary = true;
        }

        Ok(DataTypeNode::String {
            type_name,
            varying,
            length,
            binary,
            charset,
            collation,
        })
    }

    /// `LONG [VARCHAR] [BINARY] [charset name] [COLLATE name]`
    fn parse_long_varchar_data_type(&mut self) -> Result<DataTypeNode> {
        let type_name = self.parse_type_name()?;
        let varchar = self.base.eat_word_ci("VARCHAR");
        let binary = self.base.eat_word_ci("BINARY");
        let charset = self.parse_charset()?;
        let collation = self.parse_collation()?;

        Ok(DataTypeNode::LongVarchar {
            type_name,
            varchar,
            binary,
            charset,
            collation,
        })
    }

    fn parse_type_name(&mut self) -> Result<TypeName> {
        let keyword = self
            .base
            .current_type_keyword()
            .ok_or_else(|| self.base.error("data type"))?;
        let text = match self.base.current_token().map(|t| &t.token) {
            Some(Token::Word(w)) => w.value.clone(),
            _ => keyword.as_str().to_string(),
        };
        self.base.advance();
        Ok(TypeName { keyword, text })
    }

    /// `(n)`
    fn parse_length_one(&mut self) -> Result<Option<LengthDimension>> {
        if !self.base.check_token(&Token::LParen) {
            return Ok(None);
        }
        let start = self.base.pos();
        self.base.advance();
        self.base.expect_number()?;
        self.base.expect_token(&Token::RParen)?;
        Ok(Some(self.length_text(start)))
    }

    /// `(p,s)`
    fn parse_length_two(&mut self) -> Result<Option<LengthDimension>> {
        if !self.base.check_token(&Token::LParen) {
            return Ok(None);
        }
        let start = self.base.pos();
        self.base.advance();
        self.base.expect_number()?;
        self.base.expect_token(&Token::Comma)?;
        self.base.expect_number()?;
        self.base.expect_token(&Token::RParen)?;
        Ok(Some(self.length_text(start)))
    }

    /// `(p)` or `(p,s)`
    fn parse_length_two_optional(&mut self) -> Result<Option<LengthDimension>> {
        if !self.base.check_token(&Token::LParen) {
            return Ok(None);
        }
        let start = self.base.pos();
        self.base.advance();
        self.base.expect_number()?;
        if self.base.eat_token(&Token::Comma) {
            self.base.expect_number()?;
        }
        self.base.expect_token(&Token::RParen)?;
        Ok(Some(self.length_text(start)))
    }

    fn length_text(&self, start: usize) -> LengthDimension {
        LengthDimension {
            text: self.base.tokens_to_string(start, self.base.pos()),
        }
    }

    fn parse_number_text(&mut self) -> Result<String> {
        let start = self.base.pos();
        self.base.expect_number()?;
        Ok(self.base.tokens_to_string(start, self.base.pos()))
    }

    /// Any number of `SIGNED`, `UNSIGNED` and `ZEROFILL`, in input order.
    fn parse_numeric_modifiers(&mut self) -> Vec<NumericModifier> {
        let mut modifiers = Vec::new();
        loop {
            if self.base.eat_word_ci("SIGNED") {
                modifiers.push(NumericModifier::Signed);
            } else if self.base.eat_word_ci("UNSIGNED") {
                modifiers.push(NumericModifier::Unsigned);
            } else if self.base.eat_word_ci("ZEROFILL") {
                modifiers.push(NumericModifier::Zerofill);
            } else {
                return modifiers;
            }
        }
    }

    /// `{CHARACTER SET | CHAR SET | CHARSET} charset_name`
    fn parse_charset(&mut self) -> Result<Option<CharSet>> {
        let keyword = if self.base.check_word_ci("CHARACTER") && self.base.peek_word_ci(1, "SET")
        {
            self.base.advance();
            self.base.advance();
            CharSetKeyword::CharacterSet
        } else if self.base.check_word_ci("CHAR") && self.base.peek_word_ci(1, "SET") {
            self.base.advance();
            self.base.advance();
            CharSetKeyword::CharSet
        } else if self.base.eat_word_ci("CHARSET") {
            CharSetKeyword::Charset
        } else {
            return Ok(None);
        };

        let name = self.parse_charset_name()?;
        Ok(Some(CharSet { keyword, name }))
    }

    /// A charset name: a bare or quoted word, or a string literal.
    fn parse_charset_name(&mut self) -> Result<CharsetName> {
        let literal = self
            .base
            .current_token()
            .and_then(|t| string_literal_text(&t.token));
        if let Some(text) = literal {
            self.base.advance();
            return Ok(CharsetName { text });
        }
        let uid = self.base.parse_uid()?;
        Ok(CharsetName { text: uid.text })
    }

    /// `COLLATE name`
    fn parse_collation(&mut self) -> Result<Option<String>> {
        if !self.base.eat_keyword(Keyword::COLLATE) {
            return Ok(None);
        }
        Ok(Some(self.parse_charset_name()?.text))
    }

    /// `('a', 'b', ...)`
    fn parse_collection_options(&mut self) -> Result<CollectionOptions> {
        self.base.expect_token(&Token::LParen)?;
        let mut literals = vec![self.base.expect_string_literal()?];
        while self.base.eat_token(&Token::Comma) {
            literals.push(self.base.expect_string_literal()?);
        }
        self.base.expect_token(&Token::RParen)?;
        Ok(CollectionOptions { literals })
    }

    // ========================================================================
    // Column constraints
    // ========================================================================

    fn parse_column_constraint(&mut self) -> Result<ColumnConstraintNode> {
        if self.base.eat_keyword(Keyword::NOT) {
            self.base.expect_keyword(Keyword::NULL)?;
            return Ok(ColumnConstraintNode::Null(NullNotnull { not: true }));
        }
        if self.base.eat_keyword(Keyword::NULL) {
            return Ok(ColumnConstraintNode::Null(NullNotnull { not: false }));
        }
        if self.base.eat_keyword(Keyword::DEFAULT) {
            return Ok(ColumnConstraintNode::Default(self.parse_default_value()?));
        }
        if self.base.eat_word_ci("VISIBLE") {
            return Ok(ColumnConstraintNode::Visibility);
        }
        if self.base.eat_word_ci("INVISIBLE") {
            return Ok(ColumnConstraintNode::Invisibility);
        }
        if self.base.eat_word_ci("AUTO_INCREMENT") {
            return Ok(ColumnConstraintNode::AutoIncrement);
        }
        if self.base.check_keyword(Keyword::ON) && self.base.peek_keyword(1, Keyword::UPDATE) {
            self.base.advance();
            self.base.advance();
            let start = self.base.pos();
            self.parse_current_timestamp()?;
            return Ok(ColumnConstraintNode::OnUpdate {
                text: self.base.tokens_to_string(start, self.base.pos()),
            });
        }
        if self.base.eat_keyword(Keyword::PRIMARY) {
            self.base.expect_keyword(Keyword::KEY)?;
            return Ok(ColumnConstraintNode::PrimaryKey { primary: true });
        }
        if self.base.eat_keyword(Keyword::KEY) {
            return Ok(ColumnConstraintNode::PrimaryKey { primary: false });
        }
        if self.base.eat_keyword(Keyword::UNIQUE) {
            let key = self.base.eat_keyword(Keyword::KEY);
            return Ok(ColumnConstraintNode::UniqueKey { key });
        }
        if self.base.eat_keyword(Keyword::COMMENT) {
            let literal = self.base.expect_string_literal()?;
            return Ok(ColumnConstraintNode::Comment { literal });
        }
        if self.base.eat_word_ci("COLUMN_FORMAT") {
            let value = self.expect_one_of(&["FIXED", "DYNAMIC", "DEFAULT"])?;
            return Ok(ColumnConstraintNode::Format { value });
        }
        if self.base.eat_word_ci("STORAGE") {
            let value = self.expect_one_of(&["DISK", "MEMORY", "DEFAULT"])?;
            return Ok(ColumnConstraintNode::Storage { value });
        }
        if self.base.check_keyword(Keyword::REFERENCES) {
            let reference = ConstraintTokenParser::new(self.base).parse_reference_definition()?;
            return Ok(ColumnConstraintNode::Reference(reference));
        }
        if self.base.eat_keyword(Keyword::COLLATE) {
            let collation = self.parse_charset_name()?.text;
            return Ok(ColumnConstraintNode::Collate { collation });
        }
        if self.base.check_word_ci("GENERATED") || self.base.check_keyword(Keyword::AS) {
            return self.parse_generated_column();
        }
        if self.base.eat_word_ci("SERIAL") {
            self.base.expect_keyword(Keyword::DEFAULT)?;
            self.base.expect_word_ci("VALUE")?;
            return Ok(ColumnConstraintNode::SerialDefault);
        }
        if self.base.check_keyword(Keyword::CONSTRAINT) || self.base.check_keyword(Keyword::CHECK)
        {
            return self.parse_check_constraint();
        }

        Err(self.base.error("column constraint"))
    }

    /// `[GENERATED ALWAYS] AS (expr) [VIRTUAL | STORED]`
    fn parse_generated_column(&mut self) -> Result<ColumnConstraintNode> {
        let start = self.base.pos();
        if self.base.eat_word_ci("GENERATED") {
            self.base.expect_word_ci("ALWAYS")?;
        }
        self.base.expect_keyword(Keyword::AS)?;
        self.base.consume_parenthesized()?;
        if !self.base.eat_word_ci("VIRTUAL") {
            self.base.eat_word_ci("STORED");
        }
        Ok(ColumnConstraintNode::Generated {
            text: self.base.tokens_to_string(start, self.base.pos()),
        })
    }

    /// `[CONSTRAINT [name]] CHECK (expr)`
    fn parse_check_constraint(&mut self) -> Result<ColumnConstraintNode> {
        let mut name = None;
        if self.base.eat_keyword(Keyword::CONSTRAINT) && !self.base.check_keyword(Keyword::CHECK) {
            name = Some(self.base.parse_uid()?);
        }
        self.base.expect_keyword(Keyword::CHECK)?;
        let expression = self.base.consume_parenthesized()?;
        Ok(ColumnConstraintNode::Check { name, expression })
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

    // ========================================================================
    // Default values
    // ========================================================================

    /// Parse the expression after `DEFAULT`.
    ///
    /// The returned text is the covered tokens concatenated without whitespace.
    fn parse_default_value(&mut self) -> Result<DefaultValueNode> {
        let start = self.base.pos();

        if self.base.eat_keyword(Keyword::NULL) {
            // NULL literal
        } else if self.base.check_word_ci("CAST")
            && matches!(self.base.peek(1).map(|t| &t.token), Some(Token::LParen))
        {
            self.base.advance();
            self.base.consume_parenthesized()?;
        } else if self.base.check_token(&Token::LParen) {
            self.base.consume_parenthesized()?;
        } else if self.is_current_timestamp() {
            self.parse_current_timestamp()?;
            if self.base.check_keyword(Keyword::ON) && self.base.peek_keyword(1, Keyword::UPDATE) {
                self.base.advance();
                self.base.advance();
                self.parse_current_timestamp()?;
            }
        } else {
            self.eat_unary_operator();
            self.parse_constant()?;
        }

        Ok(DefaultValueNode {
            text: self.base.tokens_to_string(start, self.base.pos()),
        })
    }

    fn is_current_timestamp(&self) -> bool {
        CURRENT_TIMESTAMP_WORDS
            .iter()
            .any(|word| self.base.check_word_ci(word))
            || (self.base.check_word_ci("NOW")
                && matches!(self.base.peek(1).map(|t| &t.token), Some(Token::LParen)))
    }

    /// `{CURRENT_TIMESTAMP | LOCALTIME | LOCALTIMESTAMP} [([n])]` or `NOW([n])`
    fn parse_current_timestamp(&mut self) -> Result<()> {
        if self.base.eat_word_ci("NOW") {
            self.parse_optional_precision(true)
        } else if CURRENT_TIMESTAMP_WORDS
            .iter()
            .any(|word| self.base.check_word_ci(word))
        {
            self.base.advance();
            self.parse_optional_precision(false)
        } else {
            Err(self.base.error("CURRENT_TIMESTAMP"))
        }
    }

    fn parse_optional_precision(&mut self, required: bool) -> Result<()> {
        if !required && !self.base.check_token(&Token::LParen) {
            return Ok(());
        }
        self.base.expect_token(&Token::LParen)?;
        if !self.base.check_token(&Token::RParen) {
            self.base.expect_number()?;
        }
        self.base.expect_token(&Token::RParen)
    }

    fn eat_unary_operator(&mut self) {
        let is_unary = matches!(
            self.base.current_token().map(|t| &t.token),
            Some(Token::Plus | Token::Minus | Token::ExclamationMark | Token::Tilde)
        );
        if is_unary {
            self.base.advance();
        } else {
            self.base.eat_keyword(Keyword::NOT);
        }
    }

    /// String, number, hex/bit literal, boolean or NULL.
    fn parse_constant(&mut self) -> Result<()> {
        // `_utf8mb4'abc'` charset introducer, `b'0101'` / `x'0A'` literal prefixes
        let has_prefix = matches!(
            self.base.current_token().map(|t| &t.token),
            Some(Token::Word(w)) if w.quote_style.is_none()
                && (w.value.starts_with('_') || matches!(w.value.as_str(), "b" | "B" | "x" | "X"))
        ) && matches!(
            self.base.peek(1).map(|t| &t.token),
            Some(Token::SingleQuotedString(_))
        );
        if has_prefix {
            self.base.advance();
        }

        let token = self.base.current_token().map(|t| t.token.clone());
        match token {
            Some(Token::SingleQuotedString(_))
            | Some(Token::DoubleQuotedString(_))
            | Some(Token::NationalStringLiteral(_)) => {
                self.base.advance();
                // Adjacent literals concatenate: 'a' 'b'
                while self
                    .base
                    .current_token()
                    .and_then(|t| string_literal_text(&t.token))
                    .is_some()
                {
                    self.base.advance();
                }
                Ok(())
            }
            Some(Token::Number(_, _))
            | Some(Token::HexStringLiteral(_))
            | Some(Token::SingleQuotedByteStringLiteral(_))
            | Some(Token::DoubleQuotedByteStringLiteral(_)) => {
                self.base.advance();
                Ok(())
            }
            _ => {
                if self.base.eat_keyword(Keyword::TRUE)
                    || self.base.eat_keyword(Keyword::FALSE)
                    || self.base.eat_keyword(Keyword::NULL)
                {
                    Ok(())
                } else {
                    Err(self.base.error("default value"))
                }
            }
        }
    }
}
