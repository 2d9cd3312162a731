//! Configuration types for the content pipeline.
//!
//! Split into a source config (where content lives and how it is discovered)
//! and a sitemap config (what the sitemap job produces). Neither reads the
//! process environment; callers resolve environment-derived values once and
//! pass them in.

use std::path::PathBuf;

use crate::draft::DraftPolicy;

/// Origin used for sitemap URLs when `SITE_URL` is not set.
pub const DEFAULT_SITE_URL: &str = "https://www.kevind.kim";

/// Routes that exist independently of any content file, in emission order.
pub const DEFAULT_STATIC_ROUTES: &[&str] = &["/", "/about", "/blog"];

/// Where content files live and how they are discovered.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct ContentSourceConfig {
    /// Project root. Ignore files are read from here and reported paths are
    /// shown relative to it.
    pub project_root: PathBuf,
    /// Content root, relative to `project_root`.
    pub content_dir: PathBuf,
    /// Glob matched against each file path relative to `content_dir`.
    pub include: String,
    /// Additional exclude patterns (glob format).
    pub exclude: Vec<String>,
    /// Honour `.gitignore` files in `project_root` and `content_dir`.
    pub respect_gitignore: bool,
    /// Maximum file size in bytes (default: 10 MB).
    pub max_file_size: u64,
    /// Whether to follow symbolic links (default: `false`).
    pub follow_links: bool,
    /// Maximum directory traversal depth (default: 64).
    pub max_depth: usize,
}

impl Default for ContentSourceConfig {
    fn default() -> Self {
        Self {
            project_root: PathBuf::from("."),
            content_dir: PathBuf::from("pages/blog"),
            include: "**/*.mdx".to_owned(),
            exclude: Vec::new(),
            respect_gitignore: true,
            max_file_size: 10_485_760,
            follow_links: false,
            max_depth: 64,
        }
    }
}

impl ContentSourceConfig {
    /// The content root joined onto the project root.
    #[must_use]
    pub fn content_root(&self) -> PathBuf {
        self.project_root.join(&self.content_dir)
    }
}

/// Options for the sitemap job.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub struct SitemapConfig {
    /// Origin prepended to every route, e.g. `https://example.com`.
    pub site_origin: String,
    /// Routes emitted before any content route, in this order.
    pub static_routes: Vec<String>,
    /// Whether draft records are listed.
    pub draft_policy: DraftPolicy,
    /// Output path, relative to the project root unless absolute.
    pub output: PathBuf,
}

impl Default for SitemapConfig {
    fn default() -> Self {
        Self {
            site_origin: DEFAULT_SITE_URL.to_owned(),
            static_routes: DEFAULT_STATIC_ROUTES
                .iter()
                .map(|route| (*route).to_owned())
                .collect(),
            draft_policy: DraftPolicy::default(),
            output: PathBuf::from("public/sitemap.xml"),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_content_root_joins_project_root() {
        let mut cfg = ContentSourceConfig::default();
        cfg.project_root = PathBuf::from("/srv/site");
        assert_eq!(cfg.content_root(), PathBuf::from("/srv/site/pages/blog"));
    }

    #[test]
    fn test_sitemap_defaults() {
        let cfg = SitemapConfig::default();
        assert_eq!(cfg.site_origin, "https://www.kevind.kim");
        assert_eq!(cfg.static_routes, vec!["/", "/about", "/blog"]);
        assert_eq!(cfg.draft_policy, DraftPolicy::Exclude);
        assert_eq!(cfg.output, PathBuf::from("public/sitemap.xml"));
    }
}
