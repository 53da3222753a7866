//! Error types for managebib-bibtex

use std::path::PathBuf;

/// Result type for codec operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur reading or writing a BibTeX file.
///
/// Malformed BibTeX is not an error: it is kept as a
/// [`FailedBlock`](crate::FailedBlock) in the parsed document.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Self::Io {
            path: path.into(),
            source,
        }
    }
}
