//! Record store error type.

use camino::Utf8PathBuf;
use thiserror::Error;

/// Failures raised by [`super::JsonStore`].
///
/// Plain reads never produce these; they degrade to an empty collection.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum StoreError {
    /// The data directory could not be created or opened.
    #[error("failed to open data directory '{path}': {message}")]
    Open {
        /// Directory the store was asked to use.
        path: Utf8PathBuf,
        /// Description of the I/O error.
        message: String,
    },

    /// A collection file exists but could not be read.
    #[error("failed to read {file}: {message}")]
    Read {
        /// Collection file name.
        file: &'static str,
        /// Description of the I/O error.
        message: String,
    },

    /// A collection file does not hold a JSON array of the expected records.
    #[error("{file} is not a valid collection document: {message}")]
    Corrupt {
        /// Collection file name.
        file: &'static str,
        /// Description of the parse error.
        message: String,
    },

    /// A collection could not be serialised or written.
    #[error("failed to write {file}: {message}")]
    Write {
        /// Collection file name.
        file: &'static str,
        /// Description of the failure.
        message: String,
    },

    /// The blocking filesystem task did not complete.
    #[error("filesystem task failed: {message}")]
    Task {
        /// Description of the join failure.
        message: String,
    },
}
