//! Error types for decoding and storage.

use std::path::PathBuf;

use thiserror::Error;
use wolf_tracker_core::ModelError;

/// Problems found while decoding the project text format.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum FormatError {
    /// The input has no lines at all.
    #[error("Unable to load file: missing project header")]
    MissingHeader,

    /// The first line is not a usable `! <name>` header.
    #[error("Unable to load file: invalid project header {0:?}")]
    InvalidHeader(String),

    /// A line outside any task record did not start with `#` or `*`.
    #[error("Unable to load file: unexpected line {line}: {content:?}")]
    UnexpectedLine {
        /// 1-based line number.
        line: usize,
        /// Offending line.
        content: String,
    },

    /// A `#` declaration could not be turned into a category.
    #[error("Unable to load file: invalid category on line {line}: {reason}")]
    InvalidCategory {
        /// 1-based line number.
        line: usize,
        /// Why the declaration was rejected.
        reason: String,
    },

    /// A `*` record could not be turned into a task.
    #[error("Malformed task record on line {line}: {reason}")]
    MalformedTask {
        /// 1-based line number of the record header.
        line: usize,
        /// Why the record was rejected.
        reason: String,
    },

    /// A `*` record names a category that was never declared.
    #[error("Task record on line {line} names undeclared category {category:?}")]
    UnknownCategory {
        /// 1-based line number of the record header.
        line: usize,
        /// Category named by the record.
        category: String,
    },
}

impl FormatError {
    pub(crate) fn malformed(line: usize, reason: impl ToString) -> Self {
        Self::MalformedTask {
            line,
            reason: reason.to_string(),
        }
    }

    pub(crate) fn invalid_category(line: usize, err: &ModelError) -> Self {
        Self::InvalidCategory {
            line,
            reason: err.to_string(),
        }
    }
}

/// Errors from loading or saving through a [`ProjectStore`](crate::ProjectStore).
#[derive(Error, Debug)]
pub enum StoreError {
    /// The source could not be read.
    #[error("Unable to load file {}: {source}", path.display())]
    Read {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The sink could not be written.
    #[error("Unable to save file {}: {source}", path.display())]
    Write {
        /// Path that failed.
        path: PathBuf,
        /// Underlying I/O error.
        #[source]
        source: std::io::Error,
    },

    /// The source was read but is not a valid project file.
    #[error(transparent)]
    Format(#[from] FormatError),
}
