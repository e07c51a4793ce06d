//! Error types for libmisocconf.

use std::io;
use std::path::PathBuf;

/// Result type alias for libmisocconf operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while querying a generated design.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A required variable is absent from the variable map.
    #[error("Variable '{key}' is not defined in the design's variable file")]
    MissingVariable { key: String },

    /// A line did not define a variable (strict parsing only).
    #[error("Malformed variable definition at line {line}: '{text}'")]
    MalformedLine { line: usize, text: String },

    /// The generated variable file does not exist.
    #[error("No generated variable file at '{path}' (is this a built design tree?)")]
    VariableFileNotFound { path: PathBuf },

    /// An I/O error occurred.
    #[error("I/O error: {0}")]
    Io(#[from] io::Error),

    /// Several errors occurred during strict parsing.
    #[error("Multiple errors occurred:\n{}", format_errors(.0))]
    Multiple(Vec<Error>),
}

fn format_errors(errors: &[Error]) -> String {
    errors
        .iter()
        .enumerate()
        .map(|(i, e)| format!("  {}. {e}", i + 1))
        .collect::<Vec<_>>()
        .join("\n")
}
