//! Error handling for the mkt application.
//! Defines the error taxonomy and result alias used throughout the crate.

use std::io;
use thiserror::Error;

/// Custom error types for mkt operations.
///
/// Parse and syntax failures are fatal to the whole template: no partial
/// `Template` is ever produced. Populate and command errors come from the
/// interpreter layer and abort the run for that template.
#[derive(Error, Debug)]
pub enum Error {
    /// Represents errors that occur during file system operations
    #[error("IO error: {0}.")]
    Io(#[from] io::Error),

    /// Structural violation discovered while scanning a line
    /// (e.g. wrong number of unescaped field separators)
    #[error("Parse error on line {line}: {message}.")]
    Parse { line: usize, message: String },

    /// Semantic violation on a well-formed record
    /// (e.g. absolute destination differing from source)
    #[error("Syntax error on line {line}: {message}.")]
    Syntax { line: usize, message: String },

    /// Represents failures while populating the destination tree
    #[error("Populate error: {0}.")]
    Populate(String),

    /// Represents failures while executing a selected option script
    #[error("Command error: {0}.")]
    Command(String),
}

/// Convenience type alias for Results with mkt's Error as the error type.
pub type Result<T> = std::result::Result<T, Error>;

/// Default error handler that prints the error and exits the program.
///
/// Prints the error message to stderr and exits with status code 1.
pub fn default_error_handler(err: Error) -> ! {
    eprintln!("{}", err);
    std::process::exit(1);
}
