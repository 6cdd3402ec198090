//! Error types for CLI utilities.

use std::{io, path::PathBuf};
use thiserror::Error;
use tracing_subscriber::util::TryInitError;

/// Errors that can occur in CLI operations.
#[derive(Error, Debug)]
pub enum CliError {
    /// The global tracing subscriber could not be installed.
    #[error("failed to initialize tracing: {0}")]
    Tracing(#[from] TryInitError),
    /// A file named on the command line could not be read or written.
    #[error("{}: {source}", path.display())]
    Io {
        /// The offending path.
        path: PathBuf,
        /// The underlying error.
        source: io::Error,
    },
}

impl CliError {
    /// Wraps an I/O error with the path it concerns.
    pub fn io(path: impl Into<PathBuf>, source: io::Error) -> Self {
        Self::Io { path: path.into(), source }
    }
}

/// Type alias for CLI results.
pub type CliResult<T> = Result<T, CliError>;
