//! Error types for rust-sqlschema

use std::path::PathBuf;
use thiserror::Error;

/// Errors that abort the analysis of a whole input
///
/// Anything recoverable (unsupported clauses, malformed lengths) is reported as a
/// [`crate::resolve::Diagnostic`] instead.
#[derive(Error, Debug)]
pub enum SchemaError {
    #[error("Failed to read SQL file: {path}")]
    SqlFileReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("SQL file {path} is neither valid UTF-8 nor Windows-1252 text")]
    InvalidEncoding { path: PathBuf },

    #[error("SQL tokenize error: {message}")]
    TokenizeError { message: String },

    #[error("SQL syntax error at line {line}, column {column}: {message}")]
    SyntaxError {
        line: u64,
        column: u64,
        message: String,
    },

    #[error("SQL parse error in {path} at line {line}, column {column}: {message}")]
    SqlParseError {
        path: PathBuf,
        line: u64,
        column: u64,
        message: String,
    },
}

impl SchemaError {
    /// Attach a file path to a syntax error raised while parsing that file.
    pub fn in_file(self, path: PathBuf) -> Self {
        match self {
            SchemaError::SyntaxError {
                line,
                column,
                message,
            } => SchemaError::SqlParseError {
                path,
                line,
                column,
                message,
            },
            other => other,
        }
    }
}

/// Result alias used throughout the crate
pub type Result<T, E = SchemaError> = std::result::Result<T, E>;
