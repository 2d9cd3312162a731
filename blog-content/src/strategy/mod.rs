//! Content sources.
//!
//! Only the filesystem source exists today (`fs` module).

use std::path::PathBuf;

pub mod fs;

/// A single content unit as read from its source. Immutable once read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ContentFile {
    /// Path of the file; unique within a run.
    pub path: PathBuf,
    /// Raw file bytes.
    pub bytes: Vec<u8>,
}
