//! Error type for checksum computation over byte sources.

use std::io;
use std::path::PathBuf;
use thiserror::Error;

pub type Result<T> = std::result::Result<T, ChecksumError>;

/// Failure while feeding content to the digest.
///
/// Malformed or missing stored checksum strings are never errors; see
/// [`crate::Checksum::parse`].
#[derive(Debug, Error)]
pub enum ChecksumError {
    /// Reading the byte source failed part way through.
    #[error("read checksum input: {0}")]
    Io(#[from] io::Error),

    /// The file to checksum could not be opened.
    #[error("open {}: {source}", path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}
