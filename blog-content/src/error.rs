//! Error types for the content pipeline.

use std::path::PathBuf;

use serde::Serialize;
use thiserror::Error;

/// The kind of scan-level failure that prevented a file from being evaluated.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub enum ScanErrorKind {
    /// An I/O error occurred while reading the file (vanished, permission denied).
    IoError,
    /// The file exceeded the configured maximum size limit.
    FileTooLarge,
    /// A directory traversal error (permission denied, loop detected, etc.).
    WalkError,
    /// The resolved path is outside the content root (symlink escape).
    OutsideRoot,
}

/// A scan-level error: a file that could not be read at all.
///
/// Distinct from schema violations. The validator reports these as
/// warnings and keeps going; the sitemap job treats any of them as fatal
/// because the content set changed under it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct ScanError {
    /// The file path that could not be read.
    pub file: PathBuf,
    /// The kind of failure.
    pub kind: ScanErrorKind,
    /// Human-readable description of the failure.
    pub message: String,
}

impl ScanError {
    /// Build a scan error for `file`.
    #[must_use]
    pub fn new(file: impl Into<PathBuf>, kind: ScanErrorKind, message: String) -> Self {
        Self {
            file: file.into(),
            kind,
            message,
        }
    }

    /// Format the error for human-readable output.
    #[must_use]
    pub fn format_human_readable(&self) -> String {
        format!("{}: {}", self.file.display(), self.message)
    }
}

/// Failure to pull a front matter block out of a content file.
///
/// Always scoped to one file: the pipeline turns it into a violation at
/// path `root` instead of aborting the batch.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// The opening `---` has no matching closing delimiter.
    #[error("front matter opened on line {line} is never closed with `---`")]
    Unterminated {
        /// 1-based line of the opening delimiter.
        line: usize,
    },

    /// The header block is not valid YAML.
    #[error("malformed front matter at line {line}: {message}")]
    Malformed {
        /// 1-based line in the content file, best effort.
        line: usize,
        /// Parser diagnostic.
        message: String,
    },

    /// The header parsed, but not to a key/value mapping.
    #[error("front matter at line {line} must be a mapping of keys to values, found {found}")]
    NotAMapping {
        /// 1-based line where the header starts.
        line: usize,
        /// Kind of value found instead.
        found: &'static str,
    },

    /// The file bytes are not UTF-8.
    #[error("file is not valid UTF-8")]
    InvalidEncoding,
}
