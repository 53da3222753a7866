//! Error types for managebib

/// Result type for managebib operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur running a command
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Reading or writing a BibTeX file failed
    #[error(transparent)]
    Bibtex(#[from] managebib_bibtex::Error),

    /// An I/O operation outside the BibTeX file layer failed
    #[error("failed to {context}: {source}")]
    Io {
        context: &'static str,
        #[source]
        source: std::io::Error,
    },
}
