//! Sitemap assembly and output.
//!
//! Produces a `urlset` document in the sitemaps.org 0.9 schema. Static
//! routes come first in declared order, then one `/blog/{slug}` route per
//! included record in content order.

use std::borrow::Cow;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::Context;
use tempfile::NamedTempFile;

use crate::draft::DraftBlockedError;

pub const SITEMAP_NAMESPACE: &str = "http://www.sitemaps.org/schemas/sitemap/0.9";

const XML_DECLARATION: &str = r#"<?xml version="1.0" encoding="UTF-8"?>"#;

/// Route of a blog record.
#[must_use]
pub fn blog_route(slug: &str) -> String {
    format!("/blog/{slug}")
}

/// Absolute URLs for the given routes, static routes first.
///
/// Trailing slashes on `site_origin` are dropped so `{origin}{route}` never
/// doubles the separator.
#[must_use]
pub fn entries<'a, S>(static_routes: &[String], slugs: S, site_origin: &str) -> Vec<String>
where
    S: IntoIterator<Item = &'a str>,
{
    let origin = site_origin.trim_end_matches('/');
    static_routes
        .iter()
        .cloned()
        .chain(slugs.into_iter().map(blog_route))
        .map(|route| format!("{origin}{route}"))
        .collect()
}

/// Render a full sitemap document for the given routes.
#[must_use]
pub fn build<'a, S>(static_routes: &[String], slugs: S, site_origin: &str) -> String
where
    S: IntoIterator<Item = &'a str>,
{
    render(&entries(static_routes, slugs, site_origin))
}

/// Render a sitemap document listing `urls` in order.
#[must_use]
pub fn render(urls: &[String]) -> String {
    let mut xml = String::with_capacity(128 + urls.len() * 48);
    xml.push_str(XML_DECLARATION);
    xml.push_str("\n<urlset xmlns=\"");
    xml.push_str(SITEMAP_NAMESPACE);
    xml.push_str("\">\n");
    for url in urls {
        xml.push_str("  <url>\n    <loc>");
        xml.push_str(&escape_xml(url));
        xml.push_str("</loc>\n  </url>\n");
    }
    xml.push_str("</urlset>\n");
    xml
}

fn escape_xml(text: &str) -> Cow<'_, str> {
    if !text.contains(['&', '<', '>', '"', '\'']) {
        return Cow::Borrowed(text);
    }
    let mut escaped = String::with_capacity(text.len() + 16);
    for ch in text.chars() {
        match ch {
            '&' => escaped.push_str("&amp;"),
            '<' => escaped.push_str("&lt;"),
            '>' => escaped.push_str("&gt;"),
            '"' => escaped.push_str("&quot;"),
            '\'' => escaped.push_str("&apos;"),
            _ => escaped.push(ch),
        }
    }
    Cow::Owned(escaped)
}

/// Outcome of collecting sitemap entries from a content set.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SitemapPlan {
    /// Absolute URLs in emission order.
    pub urls: Vec<String>,
    /// Drafts kept out by the draft policy.
    pub drafts_excluded: Vec<DraftBlockedError>,
    /// Files left out because their front matter failed validation.
    pub invalid_files: Vec<PathBuf>,
}

impl SitemapPlan {
    /// Render the plan as a sitemap document.
    #[must_use]
    pub fn to_xml(&self) -> String {
        render(&self.urls)
    }
}

/// Write `contents` to `path` atomically, creating parent directories.
///
/// The document goes to a temporary file beside `path` and is renamed over
/// it, so readers see either the previous file or the complete new one.
///
/// # Errors
///
/// Returns an error if the parent directory cannot be created or the
/// temporary file cannot be written or renamed into place.
pub fn write_atomic(path: &Path, contents: &str) -> anyhow::Result<()> {
    let parent = path
        .parent()
        .filter(|p| !p.as_os_str().is_empty())
        .unwrap_or_else(|| Path::new("."));
    fs::create_dir_all(parent)
        .with_context(|| format!("Failed to create directory {}", parent.display()))?;

    let mut tmp = NamedTempFile::new_in(parent)
        .with_context(|| format!("Failed to create temporary file in {}", parent.display()))?;
    tmp.write_all(contents.as_bytes())
        .and_then(|()| tmp.as_file().sync_all())
        .with_context(|| format!("Failed to write temporary file {}", tmp.path().display()))?;

    // Temporary files are created owner-only; published artifacts are world-readable.
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        tmp.as_file()
            .set_permissions(fs::Permissions::from_mode(0o644))
            .context("Failed to set sitemap permissions")?;
    }

    tmp.persist(path)
        .with_context(|| format!("Failed to move sitemap into place at {}", path.display()))?;
    Ok(())
}
