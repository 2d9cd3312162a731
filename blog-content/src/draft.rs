//! Draft handling for published artifacts.

use std::path::{Path, PathBuf};

use thiserror::Error;

use crate::schema::FrontMatter;

/// Whether records flagged `draft: true` may appear in published artifacts.
///
/// Resolved once per run by the caller and passed in explicitly.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum DraftPolicy {
    /// Drafts are left out (production builds).
    #[default]
    Exclude,
    /// Drafts are listed like any other record (development builds).
    Allow,
}

impl DraftPolicy {
    /// Resolve the policy from the values of `NODE_ENV` and `ALLOW_DRAFTS`.
    ///
    /// Drafts are allowed iff `NODE_ENV` is exactly `development` or
    /// `ALLOW_DRAFTS` is exactly `true`.
    #[must_use]
    pub fn from_vars(node_env: Option<&str>, allow_drafts: Option<&str>) -> Self {
        if node_env == Some("development") || allow_drafts == Some("true") {
            Self::Allow
        } else {
            Self::Exclude
        }
    }

    #[must_use]
    pub const fn allows_drafts(self) -> bool {
        matches!(self, Self::Allow)
    }
}

/// A draft that the current policy keeps out of published artifacts.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
#[error(
    "Draft post blocked in non-dev build: {}. Remove draft: true or set ALLOW_DRAFTS=true.",
    file.display()
)]
pub struct DraftBlockedError {
    pub file: PathBuf,
}

/// Whether `record` belongs in the sitemap under `policy`.
#[must_use]
pub fn include_in_sitemap(record: &FrontMatter, policy: DraftPolicy) -> bool {
    !record.is_draft() || policy.allows_drafts()
}

/// Every record in `records` that `policy` keeps out, in input order.
#[must_use]
pub fn blocked_drafts<'a, I>(records: I, policy: DraftPolicy) -> Vec<DraftBlockedError>
where
    I: IntoIterator<Item = (&'a Path, &'a FrontMatter)>,
{
    records
        .into_iter()
        .filter(|(_, record)| !include_in_sitemap(record, policy))
        .map(|(file, _)| DraftBlockedError {
            file: file.to_path_buf(),
        })
        .collect()
}
