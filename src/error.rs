//! Error handling for scaffolder.
//! Defines the error kinds a run can fail with and the result alias used throughout.

use console::style;
use std::path::PathBuf;
use thiserror::Error;

/// All the ways a run can fail.
///
/// None of these are recovered locally: the first one raised anywhere in the
/// traversal aborts the run and is reported as its single failure reason.
#[derive(Error, Debug)]
pub enum Error {
    /// The specification is malformed (missing `dir`, missing `name`, ...).
    #[error("Structural error: {0}.")]
    StructuralError(String),

    /// An `only_if` predicate that is not in `key=value` form.
    #[error("only_if must be key=value, got '{predicate}'.")]
    ConditionSyntaxError { predicate: String },

    /// Destination file exists and neither force nor add-mode allow proceeding.
    #[error("Exists: {} (use --force to overwrite or --add to keep it).", .path.display())]
    ConflictError { path: PathBuf },

    /// A `from` reference does not point to a file under the template root.
    #[error("Missing template file: {}.", .path.display())]
    MissingSourceError { path: PathBuf },

    /// A resolved directory or file name cannot be used as a relative path.
    #[error("Invalid path '{name}': {reason}.")]
    InvalidPathError { name: String, reason: String },

    /// The specification document could not be read as YAML or has the wrong shape.
    #[error("Document error: {0}.")]
    DocumentError(String),

    /// Command line input that could not be interpreted.
    #[error("Invalid argument: {0}.")]
    InvalidArgumentError(String),

    /// Any other filesystem failure.
    #[error("IO error: {0}.")]
    IoError(#[from] std::io::Error),
}

/// Convenience type alias for Results with [`Error`] as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the message in red to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) {
    eprintln!("{}", style(format!("ERROR: {err}")).red());
    std::process::exit(1);
}
