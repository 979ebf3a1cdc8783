//! Error types for md2hwpx.

use std::path::PathBuf;
use thiserror::Error;

/// Result type for md2hwpx operations.
pub type Result<T> = std::result::Result<T, Error>;

/// Error types that can occur during Markdown to HWPX conversion.
///
/// Every failed conversion reports exactly one of these variants.
#[derive(Error, Debug)]
pub enum Error {
    /// The template archive does not exist or cannot be opened.
    #[error("Template not found or unreadable: {}", path.display())]
    MissingTemplate {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The template is not a valid HWPX archive.
    #[error("Corrupted HWPX archive: {0}")]
    ArchiveCorruption(String),

    /// Every section derived from the Markdown is empty.
    #[error("Invalid markdown: {0}")]
    InvalidMarkdown(String),

    /// The output (or its scratch area) could not be written.
    #[error("Failed to write {}: {source}", path.display())]
    WriteFailure {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl Error {
    pub(crate) fn write_failure(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        Error::WriteFailure {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn corrupt_archive(err: zip::result::ZipError) -> Self {
        Error::ArchiveCorruption(err.to_string())
    }
}

/// Flattens a zip writer error into the I/O error it wraps.
pub(crate) fn zip_to_io(err: zip::result::ZipError) -> std::io::Error {
    match err {
        zip::result::ZipError::Io(e) => e,
        other => std::io::Error::other(other),
    }
}
