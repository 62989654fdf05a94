//! Token-based statement parsing for MySQL scripts
//!
//! Splits a script into statements and classifies each one by its leading
//! keyword. Statements are separated by `;`, or follow each other directly when
//! the next one starts with a statement keyword. Only `CREATE [TEMPORARY] TABLE` is parsed in full; every other
//! statement is recorded with its leading keyword and text and skipped.

use sqlparser::keywords::Keyword;
use sqlparser::tokenizer::Token;

use super::create_table_parser::CreateTableTokenParser;
use super::syntax::{DdlStatement, OtherStatement, Root, SqlStatement};
use super::token_parser_base::TokenParser;
use crate::error::Result;

/// Statement categories of the MySQL grammar
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum StatementKind {
    Ddl,
    Dml,
    Transaction,
    Replication,
    Prepared,
    Administration,
    Utility,
}

/// Token-based script parser
pub struct StatementTokenParser {
    base: TokenParser,
}

impl StatementTokenParser {
    /// Create a new parser for a SQL script
    pub fn new(sql: &str) -> Result<Self> {
        Ok(Self {
            base: TokenParser::new(sql)?,
        })
    }

    /// Parse the whole script.
    ///
    /// Empty statements are allowed; every statement must be followed by `;`,
    /// the end of input or the leading keyword of the next statement.
    pub fn parse_root(&mut self) -> Result<Root> {
        let mut statements = Vec::new();

        loop {
            while self.base.eat_token(&Token::SemiColon) {}
            if self.base.is_at_end() {
                break;
            }

            statements.push(self.parse_sql_statement()?);

            if !self.base.is_at_end()
                && !self.base.eat_token(&Token::SemiColon)
                && !starts_statement(&self.base)
            {
                return Err(self.base.error("';'"));
            }
        }

        Ok(Root { statements })
    }

    fn parse_sql_statement(&mut self) -> Result<SqlStatement> {
        let kind = classify(&self.base).ok_or_else(|| self.base.error("SQL statement"))?;

        let statement = match kind {
            StatementKind::Ddl => SqlStatement::Ddl(self.parse_ddl_statement()?),
            StatementKind::Dml => SqlStatement::Dml(self.parse_other()),
            StatementKind::Transaction => SqlStatement::Transaction(self.parse_other()),
            StatementKind::Replication => SqlStatement::Replication(self.parse_other()),
            StatementKind::Prepared => SqlStatement::Prepared(self.parse_other()),
            StatementKind::Administration => SqlStatement::Administration(self.parse_other()),
            StatementKind::Utility => SqlStatement::Utility(self.parse_other()),
        };
        Ok(statement)
    }

    fn parse_ddl_statement(&mut self) -> Result<DdlStatement> {
        let is_create_table = self.base.check_keyword(Keyword::CREATE)
            && (self.base.peek_keyword(1, Keyword::TABLE)
                || (self.base.peek_keyword(1, Keyword::TEMPORARY)
                    && self.base.peek_keyword(2, Keyword::TABLE)));

        if is_create_table {
            let create_table = CreateTableTokenParser::new(&mut self.base).parse_create_table()?;
            Ok(DdlStatement::CreateTable(create_table))
        } else {
            Ok(DdlStatement::Other(self.parse_other()))
        }
    }

    /// Skip a statement this crate does not model, keeping its text.
    ///
    /// A `DELIMITER` directive of the mysql client ends with its line.
    fn parse_other(&mut self) -> OtherStatement {
        let start = self.base.pos();
        let keyword = self
            .base
            .current_word_upper()
            .unwrap_or_else(|| self.base.tokens_to_string(start, start + 1));
        if keyword == "DELIMITER" {
            self.base.skip_line();
        } else {
            self.base.skip_to_statement_end();
        }
        OtherStatement {
            keyword,
            text: self.base.tokens_to_sql(start, self.base.pos()),
        }
    }
}

/// Classify the statement at the current position by its leading words.
pub(super) fn classify(base: &TokenParser) -> Option<StatementKind> {
    if base.check_token(&Token::LParen) {
        return Some(StatementKind::Dml);
    }

    let first = base.current_word_upper()?;
    let second = base.peek_word_upper(1).unwrap_or_default();

    let kind = match first.as_str() {
        "CREATE" | "ALTER" | "RENAME" | "TRUNCATE" => StatementKind::Ddl,
        "DROP" if second == "PREPARE" => StatementKind::Prepared,
        "DROP" => StatementKind::Ddl,
        "SELECT" | "INSERT" | "UPDATE" | "DELETE" | "REPLACE" | "CALL" | "DO" | "HANDLER"
        | "LOAD" | "VALUES" | "WITH" | "TABLE" | "IMPORT" => StatementKind::Dml,
        "BEGIN" | "COMMIT" | "ROLLBACK" | "SAVEPOINT" | "RELEASE" | "LOCK" | "UNLOCK"
        | "XA" => StatementKind::Transaction,
        "START" => match second.as_str() {
            "TRANSACTION" => StatementKind::Transaction,
            "SLAVE" | "REPLICA" | "GROUP_REPLICATION" => StatementKind::Replication,
            _ => return None,
        },
        "SET" if second == "TRANSACTION" || second == "AUTOCOMMIT" => {
            StatementKind::Transaction
        }
        "CHANGE" | "PURGE" | "STOP" => StatementKind::Replication,
        "RESET" if matches!(second.as_str(), "MASTER" | "SLAVE" | "REPLICA") => {
            StatementKind::Replication
        }
        "PREPARE" | "EXECUTE" | "DEALLOCATE" => StatementKind::Prepared,
        "GRANT" | "REVOKE" | "SHOW" | "FLUSH" | "KILL" | "INSTALL" | "UNINSTALL"
        | "ANALYZE" | "CHECK" | "CHECKSUM" | "OPTIMIZE" | "REPAIR" | "BINLOG" | "CACHE"
        | "SHUTDOWN" | "SET" | "RESET" => StatementKind::Administration,
        "USE" | "DESCRIBE" | "DESC" | "EXPLAIN" | "HELP" | "SIGNAL" | "RESIGNAL" | "GET"
        | "DELIMITER" => StatementKind::Utility,
        _ => return None,
    };
    Some(kind)
}

/// Whether the current token is the leading keyword of a statement.
pub(super) fn starts_statement(base: &TokenParser) -> bool {
    base.current_word_upper().is_some() && classify(base).is_some()
}
