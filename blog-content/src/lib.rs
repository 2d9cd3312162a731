//! # blog-content
//!
//! Content pipeline for the blog: discovers content files, extracts their
//! front matter, validates it against the post schema, and derives two
//! artifacts from the result: a validation report and a sitemap.
//!
//! ```text
//! content store -> front matter -> schema -> report
//!                                        \-> draft filter -> sitemap
//! ```
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use blog_content::{ContentSourceConfig, SitemapConfig, collect_sitemap, validate_content};
//!
//! let source = ContentSourceConfig::default();
//!
//! let report = validate_content(&source).unwrap();
//! println!("Files scanned: {}", report.scanned_files);
//! println!("OK: {}", report.ok);
//!
//! let plan = collect_sitemap(&source, &SitemapConfig::default()).unwrap();
//! println!("Sitemap entries: {}", plan.urls.len());
//! ```

mod config;
pub mod draft;
mod error;
pub mod frontmatter;
pub mod output;
mod report;
pub mod schema;
pub mod sitemap;
mod strategy;

use std::collections::HashSet;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

pub use config::{ContentSourceConfig, DEFAULT_SITE_URL, DEFAULT_STATIC_ROUTES, SitemapConfig};
pub use draft::{DraftBlockedError, DraftPolicy};
pub use error::{ExtractError, ScanError, ScanErrorKind};
pub use report::{FileReport, ValidationReport};
pub use schema::{FrontMatter, Violation};
pub use sitemap::SitemapPlan;
pub use strategy::ContentFile;

use strategy::fs::{find_files, read_content_file};

/// Extract and validate one content file.
///
/// Parse failures are returned as a single violation at path `root`, so a
/// malformed header fails only its own file.
///
/// # Errors
///
/// Returns every schema violation in the file.
pub fn evaluate(file: &ContentFile) -> Result<FrontMatter, Vec<Violation>> {
    let extracted = frontmatter::extract(&file.bytes).map_err(|err| {
        debug!(file = %file.path.display(), "front matter parse error: {err}");
        vec![Violation::unparsable(&err)]
    })?;
    schema::validate(&extracted.metadata)
}

/// Path shown to users: relative to the project root where possible.
fn display_path(config: &ContentSourceConfig, path: &Path) -> PathBuf {
    path.strip_prefix(&config.project_root)
        .unwrap_or(path)
        .to_path_buf()
}

fn ensure_project_root(config: &ContentSourceConfig) -> anyhow::Result<()> {
    if !config.project_root.is_dir() {
        anyhow::bail!(
            "Project root does not exist: {}",
            config.project_root.display()
        );
    }
    Ok(())
}

/// Validate the front matter of every content file.
///
/// Files that cannot be read are reported as skipped and do not fail the
/// run. Every other file is evaluated; none is dropped silently.
///
/// # Errors
///
/// Returns an error if the project root does not exist or the discovery
/// patterns are invalid. Returns `Ok` with an empty report if the content
/// root holds no matching files.
pub fn validate_content(config: &ContentSourceConfig) -> anyhow::Result<ValidationReport> {
    ensure_project_root(config)?;

    let (files, mut skipped) = find_files(config)?;
    let mut results = Vec::with_capacity(files.len());

    for path in &files {
        match read_content_file(path, config.max_file_size) {
            Ok(file) => results.push((display_path(config, path), evaluate(&file))),
            Err(err) => {
                warn!(file = %path.display(), "skipping unreadable content file: {}", err.message);
                skipped.push(err);
            }
        }
    }

    for err in &mut skipped {
        err.file = display_path(config, &err.file);
    }

    let report = ValidationReport::from_results(config.content_dir.clone(), results, skipped);
    info!(
        scanned = report.scanned_files,
        failed = report.failed_files(),
        skipped = report.skipped.len(),
        "front matter validation finished"
    );
    Ok(report)
}

/// Collect sitemap entries from the content set.
///
/// Static routes come first in configured order, then one route per valid,
/// included record, in content path order. Records rejected by the draft
/// policy are collected in `drafts_excluded`; files failing validation are
/// collected in `invalid_files`. Neither stops the run.
///
/// # Errors
///
/// Returns an error if the project root does not exist, the discovery
/// patterns are invalid, or any listed file cannot be read. A sitemap built
/// from a content set that changed mid-run would be inconsistent, so read
/// failures are fatal here.
pub fn collect_sitemap(
    source: &ContentSourceConfig,
    sitemap_config: &SitemapConfig,
) -> anyhow::Result<SitemapPlan> {
    ensure_project_root(source)?;

    let (files, scan_errors) = find_files(source)?;
    if let Some(first) = scan_errors.first() {
        anyhow::bail!(
            "Cannot build sitemap from an incomplete content set ({} unreadable): {}",
            scan_errors.len(),
            first.format_human_readable()
        );
    }

    let mut records = Vec::with_capacity(files.len());
    let mut invalid_files = Vec::new();

    for path in &files {
        let file = read_content_file(path, source.max_file_size)
            .map_err(|err| anyhow::anyhow!("Cannot build sitemap: {}", err.format_human_readable()))?;
        let shown = display_path(source, path);

        match evaluate(&file) {
            Ok(record) => records.push((shown, record)),
            Err(violations) => {
                warn!(
                    file = %shown.display(),
                    violations = violations.len(),
                    "leaving file with invalid front matter out of the sitemap"
                );
                invalid_files.push(shown);
            }
        }
    }

    let policy = sitemap_config.draft_policy;
    let drafts_excluded = draft::blocked_drafts(
        records.iter().map(|(path, record)| (path.as_path(), record)),
        policy,
    );
    for blocked in &drafts_excluded {
        debug!(file = %blocked.file.display(), "excluding draft from sitemap");
    }

    let mut seen_slugs = HashSet::new();
    let included: Vec<&str> = records
        .iter()
        .filter(|(_, record)| draft::include_in_sitemap(record, policy))
        .map(|(path, record)| {
            if !seen_slugs.insert(record.slug.as_str()) {
                warn!(file = %path.display(), slug = %record.slug, "duplicate slug in sitemap");
            }
            record.slug.as_str()
        })
        .collect();

    let urls = sitemap::entries(
        &sitemap_config.static_routes,
        included,
        &sitemap_config.site_origin,
    );
    info!(
        entries = urls.len(),
        drafts = drafts_excluded.len(),
        invalid = invalid_files.len(),
        "sitemap entries collected"
    );

    Ok(SitemapPlan {
        urls,
        drafts_excluded,
        invalid_files,
    })
}
