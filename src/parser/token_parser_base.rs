//! Base token parser providing common helper methods for MySQL DDL parsing.
//!
//! Each grammar module (`statement_parser`, `create_table_parser`,
//! `column_parser`, `constraint_parser`) drives one shared `TokenParser`:
//!
//! ```ignore
//! let mut parser = TokenParser::new("CREATE TABLE t (id INT)")?;
//! parser.expect_keyword(Keyword::CREATE)?;
//! parser.expect_keyword(Keyword::TABLE)?;
//! let name = parser.parse_uid()?;
//! ```
//!
//! Whitespace and comments are dropped at construction, the way a generated
//! lexer routes them to a hidden channel, so every helper sees significant
//! tokens only.

use sqlparser::dialect::MySqlDialect;
use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::{Token, TokenWithSpan, Tokenizer};

use super::identifier_utils::format_token;
use super::keywords::TypeKeyword;
use super::syntax::{TableName, Uid};
use crate::error::{Result, SchemaError};

/// Base token parser over the MySQL token stream.
pub struct TokenParser {
    tokens: Vec<TokenWithSpan>,
    pos: usize,
}

impl TokenParser {
    /// Create a new TokenParser from a SQL string.
    ///
    /// Uses MySqlDialect for tokenization; a tokenizer failure is fatal for the input.
    /// String literals keep their escapes as written (`'it\'s'` stays `it\'s`).
    pub fn new(sql: &str) -> Result<Self> {
        let dialect = MySqlDialect {};
        let tokens = Tokenizer::new(&dialect, sql)
            .with_unescape(false)
            .tokenize_with_location()
            .map_err(|e| SchemaError::TokenizeError {
                message: e.to_string(),
            })?;

        let tokens = tokens
            .into_iter()
            .filter(|t| !matches!(t.token, Token::Whitespace(_) | Token::EOF))
            .collect();

        Ok(Self { tokens, pos: 0 })
    }

    // ========================================================================
    // Position and state
    // ========================================================================

    /// Check if at end of tokens.
    #[inline]
    pub fn is_at_end(&self) -> bool {
        self.pos >= self.tokens.len()
    }

    /// Get current position in token stream.
    #[inline]
    pub fn pos(&self) -> usize {
        self.pos
    }

    /// Rewind or move to a previously saved position.
    #[inline]
    pub fn set_pos(&mut self, pos: usize) {
        self.pos = pos.min(self.tokens.len());
    }

    // ========================================================================
    // Token access
    // ========================================================================

    /// Get current token without consuming.
    #[inline]
    pub fn current_token(&self) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos)
    }

    /// Peek at a token at an offset from current position.
    #[inline]
    pub fn peek(&self, offset: usize) -> Option<&TokenWithSpan> {
        self.tokens.get(self.pos + offset)
    }

    /// Advance to next token.
    #[inline]
    pub fn advance(&mut self) {
        if !self.is_at_end() {
            self.pos += 1;
        }
    }

    // ========================================================================
    // Token type checks
    // ========================================================================

    /// Check if current token is a specific keyword.
    ///
    /// Quoted identifiers never match: `` `key` `` is a name, not `KEY`.
    #[inline]
    pub fn check_keyword(&self, keyword: Keyword) -> bool {
        self.peek_keyword(0, keyword)
    }

    /// Check if the token at `offset` is a specific keyword.
    #[inline]
    pub fn peek_keyword(&self, offset: usize, keyword: Keyword) -> bool {
        matches!(
            self.peek(offset).map(|t| &t.token),
            Some(Token::Word(w)) if w.quote_style.is_none() && w.keyword == keyword
        )
    }

    /// Check if current token is an unquoted word matching (case-insensitive).
    ///
    /// Used for MySQL words sqlparser does not list as keywords (e.g. "ZEROFILL",
    /// "MIDDLEINT", "AUTO_INCREMENT").
    #[inline]
    pub fn check_word_ci(&self, word: &str) -> bool {
        self.peek_word_ci(0, word)
    }

    /// Check if the token at `offset` is an unquoted word matching (case-insensitive).
    #[inline]
    pub fn peek_word_ci(&self, offset: usize, word: &str) -> bool {
        matches!(
            self.peek(offset).map(|t| &t.token),
            Some(Token::Word(w)) if w.quote_style.is_none() && w.value.eq_ignore_ascii_case(word)
        )
    }

    /// Check if current token matches a specific token type (by discriminant).
    #[inline]
    pub fn check_token(&self, expected: &Token) -> bool {
        if let Some(token) = self.current_token() {
            std::mem::discriminant(&token.token) == std::mem::discriminant(expected)
        } else {
            false
        }
    }

    /// Uppercased text of the current unquoted word, if any.
    pub fn current_word_upper(&self) -> Option<String> {
        self.peek_word_upper(0)
    }

    /// Uppercased text of the unquoted word at `offset`, if any.
    pub fn peek_word_upper(&self, offset: usize) -> Option<String> {
        match self.peek(offset).map(|t| &t.token) {
            Some(Token::Word(w)) if w.quote_style.is_none() => Some(w.value.to_uppercase()),
            _ => None,
        }
    }

    /// The data type keyword at the current position, if any.
    pub fn current_type_keyword(&self) -> Option<TypeKeyword> {
        match self.current_token().map(|t| &t.token) {
            Some(Token::Word(w)) if w.quote_style.is_none() => TypeKeyword::from_word(&w.value),
            _ => None,
        }
    }

    // ========================================================================
    // Consume methods
    // ========================================================================

    /// Consume the keyword if present.
    pub fn eat_keyword(&mut self, keyword: Keyword) -> bool {
        if self.check_keyword(keyword) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the word (case-insensitive) if present.
    pub fn eat_word_ci(&mut self, word: &str) -> bool {
        if self.check_word_ci(word) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Consume the token type if present.
    pub fn eat_token(&mut self, expected: &Token) -> bool {
        if self.check_token(expected) {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Expect a specific keyword, advancing if found.
    pub fn expect_keyword(&mut self, keyword: Keyword) -> Result<()> {
        if self.eat_keyword(keyword) {
            Ok(())
        } else {
            Err(self.error(&format!("{:?}", keyword)))
        }
    }

    /// Expect a specific word (case-insensitive), advancing if found.
    pub fn expect_word_ci(&mut self, word: &str) -> Result<()> {
        if self.eat_word_ci(word) {
            Ok(())
        } else {
            Err(self.error(&word.to_uppercase()))
        }
    }

    /// Expect a specific token type, advancing if found.
    pub fn expect_token(&mut self, expected: &Token) -> Result<()> {
        if self.eat_token(expected) {
            Ok(())
        } else {
            Err(self.error(&format!("'{}'", format_token(expected))))
        }
    }

    /// Expect a numeric literal, advancing if found.
    pub fn expect_number(&mut self) -> Result<()> {
        if matches!(self.current_token().map(|t| &t.token), Some(Token::Number(_, _))) {
            self.advance();
            Ok(())
        } else {
            Err(self.error("number"))
        }
    }

    /// Expect a string literal, returning its quoted text.
    pub fn expect_string_literal(&mut self) -> Result<String> {
        let text = self
            .current_token()
            .and_then(|t| super::identifier_utils::string_literal_text(&t.token));
        match text {
            Some(text) => {
                self.advance();
                Ok(text)
            }
            None => Err(self.error("string literal")),
        }
    }

    /// Expect the end of the token stream.
    pub fn expect_end(&self) -> Result<()> {
        if self.is_at_end() {
            Ok(())
        } else {
            Err(self.error("end of input"))
        }
    }

    // ========================================================================
    // Identifier parsing
    // ========================================================================

    /// Parse a `uid`: any word token, quoted or not.
    ///
    /// The returned text keeps the quote characters.
    pub fn parse_uid(&mut self) -> Result<Uid> {
        match self.current_token().map(|t| &t.token) {
            Some(token @ Token::Word(_)) => {
                let text = format_token(token);
                self.advance();
                Ok(Uid { text })
            }
            _ => Err(self.error("identifier")),
        }
    }

    /// Parse a possibly qualified table name: `uid ('.' uid)?`.
    ///
    /// The text keeps quotes and the dot, e.g. `` `db`.`tbl` ``.
    pub fn parse_table_name(&mut self) -> Result<TableName> {
        let start = self.pos;
        self.parse_uid()?;
        if self.eat_token(&Token::Period) {
            self.parse_uid()?;
        }
        Ok(TableName {
            text: self.tokens_to_string(start, self.pos),
        })
    }

    // ========================================================================
    // Token string conversion
    // ========================================================================

    /// Concatenate tokens from `start_pos` to `end_pos` (exclusive) without separators.
    pub fn tokens_to_string(&self, start_pos: usize, end_pos: usize) -> String {
        self.tokens[start_pos..end_pos.min(self.tokens.len())]
            .iter()
            .map(|t| format_token(&t.token))
            .collect()
    }

    /// Join tokens from `start_pos` to `end_pos` (exclusive) with single spaces.
    pub fn tokens_to_sql(&self, start_pos: usize, end_pos: usize) -> String {
        self.tokens[start_pos..end_pos.min(self.tokens.len())]
            .iter()
            .map(|t| format_token(&t.token))
            .collect::<Vec<_>>()
            .join(" ")
    }

    // ========================================================================
    // Utility methods
    // ========================================================================

    /// Consume a parenthesized expression and return its text.
    ///
    /// Position should be at the opening parenthesis. After this call, position
    /// will be after the matching closing parenthesis.
    pub fn consume_parenthesized(&mut self) -> Result<String> {
        if !self.check_token(&Token::LParen) {
            return Err(self.error("'('"));
        }

        let start_pos = self.pos;
        let mut depth = 0usize;

        while !self.is_at_end() {
            if self.check_token(&Token::LParen) {
                depth += 1;
            } else if self.check_token(&Token::RParen) {
                depth -= 1;
                if depth == 0 {
                    self.advance();
                    return Ok(self.tokens_to_string(start_pos, self.pos));
                }
            }
            self.advance();
        }

        Err(self.error("')'"))
    }

    /// Skip tokens up to (not including) the next `;` outside parentheses.
    pub fn skip_to_statement_end(&mut self) {
        let mut depth = 0usize;
        while !self.is_at_end() {
            match self.current_token().map(|t| &t.token) {
                Some(Token::LParen) => depth += 1,
                Some(Token::RParen) => depth = depth.saturating_sub(1),
                Some(Token::SemiColon) if depth == 0 => return,
                _ => {}
            }
            self.advance();
        }
    }

    /// Skip every token that starts on the current token's line.
    pub fn skip_line(&mut self) {
        let Some(line) = self.current_token().map(|t| t.span.start.line) else {
            return;
        };
        while self
            .current_token()
            .is_some_and(|t| t.span.start.line == line)
        {
            self.advance();
        }
    }

    /// Build a syntax error positioned at the current token.
    pub fn error(&self, expected: &str) -> SchemaError {
        match self.current_token() {
            Some(token) => SchemaError::SyntaxError {
                line: token.span.start.line,
                column: token.span.start.column,
                message: format!(
                    "expected {}, found '{}'",
                    expected,
                    format_token(&token.token)
                ),
            },
            None => {
                let (line, column) = self
                    .tokens
                    .last()
                    .map(|t| (t.span.end.line, t.span.end.column))
                    .unwrap_or((1, 1));
                SchemaError::SyntaxError {
                    line,
                    column,
                    message: format!("expected {}, found end of input", expected),
                }
            }
        }
    }
}
