//! Exporter: SQL text or files in, [`Table`] values out
//!
//! This is the only module that touches the filesystem. A syntax error fails
//! the whole input; everything recoverable ends up in [`Export::diagnostics`].

use std::path::{Path, PathBuf};

use encoding_rs::WINDOWS_1252;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::error::{Result, SchemaError};
use crate::model::Table;
use crate::parser::parse_sql;
use crate::resolve::{resolve_root, Diagnostics};

/// Minimum number of files to benefit from parallel processing.
/// Below this threshold, sequential processing is faster due to rayon overhead.
pub const PARALLEL_THRESHOLD: usize = 8;

/// Where the SQL comes from
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Path(PathBuf),
    Text(String),
}

impl Input {
    /// A string naming an existing regular file is a path; anything else is SQL text.
    pub fn detect(input: &str) -> Self {
        let path = Path::new(input);
        if path.is_file() {
            Input::Path(path.to_path_buf())
        } else {
            Input::Text(input.to_string())
        }
    }
}

/// Tables found in one analysis, in statement order, plus what was skipped.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Export {
    pub tables: Vec<Table>,
    pub diagnostics: Diagnostics,
}

/// Analyze a file path or raw SQL text, see [`Input::detect`].
pub fn from(input: &str) -> Result<Vec<Table>> {
    Ok(export(input)?.tables)
}

/// Analyze raw SQL text.
pub fn from_text(sql: &str) -> Result<Vec<Table>> {
    Ok(export_text(sql)?.tables)
}

/// Analyze the SQL file at `path`.
pub fn from_file(path: &Path) -> Result<Vec<Table>> {
    Ok(export_file(path)?.tables)
}

/// Like [`from`], keeping the diagnostics.
pub fn export(input: &str) -> Result<Export> {
    match Input::detect(input) {
        Input::Path(path) => export_file(&path),
        Input::Text(sql) => export_text(&sql),
    }
}

/// Like [`from_text`], keeping the diagnostics.
pub fn export_text(sql: &str) -> Result<Export> {
    let root = parse_sql(sql)?;
    debug!(statements = root.statements.len(), "parsed SQL");

    let mut diagnostics = Diagnostics::new();
    let tables = resolve_root(&root, &mut diagnostics)
        .into_iter()
        .map(|create_table| create_table.convert())
        .collect();

    Ok(Export {
        tables,
        diagnostics,
    })
}

/// Like [`from_file`], keeping the diagnostics.
///
/// Syntax errors come back as [`SchemaError::SqlParseError`] naming the file.
pub fn export_file(path: &Path) -> Result<Export> {
    let content = read_sql_file(path)?;
    export_text(&content).map_err(|e| e.in_file(path.to_path_buf()))
}

/// Analyze several files, using parallel processing for larger sets.
///
/// Tables and diagnostics are concatenated in file order; the first failing
/// file fails the batch.
pub fn export_files(files: &[PathBuf]) -> Result<Export> {
    let results: Vec<Result<Export>> = if files.len() >= PARALLEL_THRESHOLD {
        files.par_iter().map(|file| export_file(file)).collect()
    } else {
        files.iter().map(|file| export_file(file)).collect()
    };

    let mut combined = Export::default();
    for result in results {
        let export = result?;
        combined.tables.extend(export.tables);
        combined.diagnostics.extend(export.diagnostics);
    }
    Ok(combined)
}

/// Read a file as text, trying UTF-8 first, then Windows-1252 as fallback
fn read_sql_file(path: &Path) -> Result<String> {
    let bytes = std::fs::read(path).map_err(|e| SchemaError::SqlFileReadError {
        path: path.to_path_buf(),
        source: e,
    })?;
    let bytes = bytes.strip_prefix(b"\xEF\xBB\xBF").unwrap_or(&bytes);

    match std::str::from_utf8(bytes) {
        Ok(s) => Ok(s.to_string()),
        Err(_) => {
            let (decoded, _, had_errors) = WINDOWS_1252.decode(bytes);
            if had_errors {
                Err(SchemaError::InvalidEncoding {
                    path: path.to_path_buf(),
                })
            } else {
                Ok(decoded.into_owned())
            }
        }
    }
}
