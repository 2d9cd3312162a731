//! `generate-sitemap`: write the sitemap for published posts.

use std::fmt::Write as _;
use std::path::PathBuf;

use blog_content::{DraftPolicy, collect_sitemap, sitemap};
use tracing::info;

use crate::args::SitemapArgs;

/// What a successful run wrote.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SitemapSummary {
    pub entries: usize,
    pub output: PathBuf,
}

/// Collect sitemap entries and write the document atomically.
///
/// Nothing is written when the run fails.
///
/// # Errors
///
/// Returns an error if content cannot be read, if `--fail-on-draft` is set
/// and the draft policy blocks any post (every blocked file is listed), or
/// if the output cannot be written.
pub fn run(args: &SitemapArgs, draft_policy: DraftPolicy) -> anyhow::Result<SitemapSummary> {
    let source = args.source.to_config();
    let config = args.to_config(draft_policy);
    let plan = collect_sitemap(&source, &config)?;

    if args.fail_on_draft && !plan.drafts_excluded.is_empty() {
        let mut message = format!(
            "{} draft post(s) blocked from the sitemap:",
            plan.drafts_excluded.len()
        );
        for blocked in &plan.drafts_excluded {
            let _ = write!(message, "\n  {blocked}");
        }
        anyhow::bail!(message);
    }

    sitemap::write_atomic(&config.output, &plan.to_xml())?;
    info!(output = %config.output.display(), entries = plan.urls.len(), "sitemap written");

    Ok(SitemapSummary {
        entries: plan.urls.len(),
        output: config.output,
    })
}
