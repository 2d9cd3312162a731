//! Validation report types.

use std::path::PathBuf;

use serde::Serialize;

use crate::error::ScanError;
use crate::schema::{FrontMatter, Violation};

/// Every violation found in one content file.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct FileReport {
    /// File path, relative to the project root.
    pub file: PathBuf,
    /// Violations in field order.
    pub violations: Vec<Violation>,
}

/// Result of a validation run.
///
/// The gate is all-or-nothing: one failing file fails the run no matter how
/// many others pass. Files that could not be read are listed in `skipped` as
/// warnings and do not fail the run.
#[derive(Debug, Clone, Serialize)]
#[non_exhaustive]
pub struct ValidationReport {
    /// Content root that was scanned.
    pub content_dir: PathBuf,
    /// Number of files discovered, whether or not they could be read.
    pub discovered_files: usize,
    /// Number of files read and validated.
    pub scanned_files: usize,
    /// Number of validated files without violations.
    pub passed_files: usize,
    /// Whether no scanned file has violations.
    pub ok: bool,
    /// Failing files, sorted by path.
    pub failures: Vec<FileReport>,
    /// Files that could not be read, sorted by path.
    pub skipped: Vec<ScanError>,
}

impl ValidationReport {
    /// Aggregate per-file outcomes into a report.
    ///
    /// Input order does not matter; failures and skips are sorted by path.
    #[must_use]
    pub fn from_results<I>(content_dir: PathBuf, results: I, mut skipped: Vec<ScanError>) -> Self
    where
        I: IntoIterator<Item = (PathBuf, Result<FrontMatter, Vec<Violation>>)>,
    {
        let mut scanned_files = 0;
        let mut passed_files = 0;
        let mut failures = Vec::new();

        for (file, outcome) in results {
            scanned_files += 1;
            match outcome {
                Ok(_) => passed_files += 1,
                Err(violations) => failures.push(FileReport { file, violations }),
            }
        }

        failures.sort_by(|a, b| a.file.cmp(&b.file));
        skipped.sort_by(|a, b| a.file.cmp(&b.file));

        Self {
            content_dir,
            discovered_files: scanned_files + skipped.len(),
            scanned_files,
            passed_files,
            ok: failures.is_empty(),
            failures,
            skipped,
        }
    }

    /// Whether the content set was empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.discovered_files == 0
    }

    /// Number of files with at least one violation.
    #[must_use]
    pub fn failed_files(&self) -> usize {
        self.failures.len()
    }

    /// Process exit status for this report: 0 when `ok`, 1 otherwise.
    #[must_use]
    pub fn exit_code(&self) -> i32 {
        i32::from(!self.ok)
    }
}
