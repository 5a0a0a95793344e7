//! CLI support for xqr
//!
//! Provides programmatic access to the xqr command: parse a query, run it
//! against a document held in memory and render the result. No files are
//! opened here; callers supply the query and document text.

mod explain;
mod run;

pub use explain::query_to_json;
pub use run::{RunOptions, execute, read_document};

use std::io;

/// Errors that can occur during CLI operations
#[derive(Debug)]
pub enum CliError {
    /// Invalid or conflicting arguments
    Args(String),
    /// Input could not be read
    Input(io::Error),
    /// No input provided
    NoInput,
    /// Output could not be written
    Output(io::Error),
    /// JSON rendering error
    Json(serde_json::Error),
    /// Document is not well-formed XML
    Document(roxmltree::Error),
    /// Document content does not fit the query
    Eval(crate::EvalError),
    /// Query file could not be read
    QueryFile(io::Error),
    /// Query syntax error
    Parse(crate::ParseError),
}

impl CliError {
    /// Process exit code for this error.
    pub fn exit_code(&self) -> i32 {
        match self {
            CliError::Args(_) => 1,
            CliError::Input(_) | CliError::NoInput => 2,
            CliError::Output(_) | CliError::Json(_) => 3,
            CliError::Document(_) | CliError::Eval(_) => 4,
            CliError::QueryFile(_) | CliError::Parse(_) => 80,
        }
    }
}

impl std::fmt::Display for CliError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            CliError::Args(msg) => write!(f, "Arguments error: {}", msg),
            CliError::Input(e) => write!(f, "Input error: {}", e),
            CliError::NoInput => write!(f, "Input error: no input provided. Use --input or pipe XML to stdin."),
            CliError::Output(e) => write!(f, "Output error: {}", e),
            CliError::Json(e) => write!(f, "Output error: {}", e),
            CliError::Document(e) => write!(f, "Format error: {}", e),
            CliError::Eval(e) => write!(f, "Format error: {}", e),
            CliError::QueryFile(e) => write!(f, "Query error: query file could not be read: {}", e),
            CliError::Parse(e) => write!(f, "Query error: {}", e),
        }
    }
}

impl std::error::Error for CliError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            CliError::Input(e) | CliError::Output(e) | CliError::QueryFile(e) => Some(e),
            CliError::Json(e) => Some(e),
            CliError::Document(e) => Some(e),
            CliError::Eval(e) => Some(e),
            CliError::Parse(e) => Some(e),
            _ => None,
        }
    }
}

impl From<crate::ParseError> for CliError {
    fn from(e: crate::ParseError) -> Self {
        CliError::Parse(e)
    }
}

impl From<crate::EvalError> for CliError {
    fn from(e: crate::EvalError) -> Self {
        CliError::Eval(e)
    }
}

impl From<roxmltree::Error> for CliError {
    fn from(e: roxmltree::Error) -> Self {
        CliError::Document(e)
    }
}

impl From<serde_json::Error> for CliError {
    fn from(e: serde_json::Error) -> Self {
        CliError::Json(e)
    }
}
