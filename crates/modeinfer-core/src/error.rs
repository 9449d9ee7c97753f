//! Error handling for the modeinfer core pipeline
//!
//! Every fault is fatal for a run: there is no partial-result mode. The variants
//! carry enough structured context for the binary to print a descriptive message.

use std::path::{Path, PathBuf};
use thiserror::Error;

/// Error type for type inference operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum InferError {
    /// An atom line does not match the ground-atom grammar
    #[error("Syntax error: {message} in {text:?} at column {column}{}", location(.collection, .line))]
    Syntax {
        message: String,
        text: String,
        column: usize,
        collection: Option<String>,
        line: Option<usize>,
    },

    /// An input path cannot be opened or read
    #[error("File error: {message} ({})", .path.display())]
    File { message: String, path: PathBuf, kind: std::io::ErrorKind },

    /// A head symbol was observed with two different argument counts
    #[error(
        "Arity mismatch: '{head}' was first seen with {expected} argument(s) but {atom} has {found}"
    )]
    ArityMismatch { head: String, expected: usize, found: usize, atom: String },

    /// A symbol was looked up in a rank table that never counted it
    #[error("Unknown {category} symbol '{symbol}'")]
    UnknownSymbol { category: &'static str, symbol: String },

    /// Configuration cannot be loaded or parsed
    #[error("Configuration error: {message}")]
    Configuration { message: String, setting: Option<String> },
}

fn location(collection: &Option<String>, line: &Option<usize>) -> String {
    match (collection, line) {
        (Some(collection), Some(line)) => format!(" ({collection}, line {line})"),
        (Some(collection), None) => format!(" ({collection})"),
        (None, Some(line)) => format!(" (line {line})"),
        (None, None) => String::new(),
    }
}

impl InferError {
    /// Get the error category for logging
    pub fn category(&self) -> &'static str {
        match self {
            InferError::Syntax { .. } => "syntax",
            InferError::File { .. } => "file",
            InferError::ArityMismatch { .. } => "arity_mismatch",
            InferError::UnknownSymbol { .. } => "unknown_symbol",
            InferError::Configuration { .. } => "configuration",
        }
    }

    /// Create a syntax error for `text`, failing at the given zero-based column
    pub fn syntax(text: &str, column: usize, message: impl Into<String>) -> Self {
        Self::Syntax {
            message: message.into(),
            text: text.to_string(),
            column,
            collection: None,
            line: None,
        }
    }

    /// Create a file error from an I/O failure on `path`
    pub fn file(path: &Path, err: &std::io::Error) -> Self {
        Self::File { message: err.to_string(), path: path.to_path_buf(), kind: err.kind() }
    }

    /// Create an arity mismatch error
    pub fn arity_mismatch(head: &str, expected: usize, found: usize, atom: &str) -> Self {
        Self::ArityMismatch { head: head.to_string(), expected, found, atom: atom.to_string() }
    }

    /// Create an unknown symbol error
    pub fn unknown_symbol(category: &'static str, symbol: &str) -> Self {
        Self::UnknownSymbol { category, symbol: symbol.to_string() }
    }

    /// Create a configuration error
    pub fn configuration(setting: Option<&str>, message: impl Into<String>) -> Self {
        Self::Configuration { message: message.into(), setting: setting.map(str::to_string) }
    }
}

/// Result type alias for core operations
pub type InferResult<T> = Result<T, InferError>;

/// Extension trait for adding input location to Results
pub trait ResultExt<T> {
    /// Attach the collection name and 1-based line number to a syntax error
    fn with_line_context(self, collection: &str, line: usize) -> InferResult<T>;
}

impl<T> ResultExt<T> for InferResult<T> {
    fn with_line_context(self, collection: &str, line: usize) -> InferResult<T> {
        self.map_err(|mut err| {
            if let InferError::Syntax { collection: c, line: l, .. } = &mut err {
                *c = Some(collection.to_string());
                *l = Some(line);
            }
            err
        })
    }
}
