//! Command-line arguments and their mapping onto pipeline config.

use std::path::PathBuf;

use blog_content::{ContentSourceConfig, DEFAULT_SITE_URL, DraftPolicy, SitemapConfig};
use clap::{ArgAction, Args, Parser, ValueEnum};

/// Options shared by both commands: where content lives.
#[derive(Debug, Clone, Args)]
pub struct SourceArgs {
    /// Project root; `.gitignore` is read from here and paths are reported relative to it
    #[arg(long, default_value = ".")]
    pub root: PathBuf,

    /// Content directory, relative to the project root
    #[arg(long, default_value = "pages/blog")]
    pub content_dir: PathBuf,

    /// Glob selecting content files, relative to the content directory
    #[arg(long, default_value = "**/*.mdx")]
    pub include: String,

    /// Exclude files matching this glob (repeatable)
    #[arg(long, value_name = "GLOB")]
    pub exclude: Vec<String>,

    /// Do not honour `.gitignore` files
    #[arg(long)]
    pub no_gitignore: bool,

    /// Increase log verbosity (-v info, -vv debug, -vvv trace)
    #[arg(short, long, action = ArgAction::Count)]
    pub verbose: u8,
}

impl SourceArgs {
    #[must_use]
    pub fn to_config(&self) -> ContentSourceConfig {
        let mut cfg = ContentSourceConfig::default();
        cfg.project_root.clone_from(&self.root);
        cfg.content_dir.clone_from(&self.content_dir);
        cfg.include.clone_from(&self.include);
        cfg.exclude.clone_from(&self.exclude);
        cfg.respect_gitignore = !self.no_gitignore;
        cfg
    }
}

/// Report format for `validate-frontmatter`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ReportFormat {
    Human,
    Json,
}

/// Validate blog post front matter.
#[derive(Debug, Parser)]
#[command(name = "validate-frontmatter", version, about)]
pub struct ValidateArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Output format
    #[arg(long, value_enum, default_value_t = ReportFormat::Human)]
    pub format: ReportFormat,
}

/// Generate the sitemap from published blog posts.
#[derive(Debug, Parser)]
#[command(name = "generate-sitemap", version, about)]
pub struct SitemapArgs {
    #[command(flatten)]
    pub source: SourceArgs,

    /// Origin prepended to every sitemap URL
    #[arg(long, env = "SITE_URL", default_value = DEFAULT_SITE_URL)]
    pub site_url: String,

    /// Output path, relative to the project root unless absolute
    #[arg(long, default_value = "public/sitemap.xml")]
    pub output: PathBuf,

    /// Fail instead of silently leaving out drafts blocked by the draft policy
    #[arg(long)]
    pub fail_on_draft: bool,
}

impl SitemapArgs {
    #[must_use]
    pub fn to_config(&self, draft_policy: DraftPolicy) -> SitemapConfig {
        let mut cfg = SitemapConfig::default();
        cfg.site_origin.clone_from(&self.site_url);
        cfg.draft_policy = draft_policy;
        cfg.output = if self.output.is_absolute() {
            self.output.clone()
        } else {
            self.source.root.join(&self.output)
        };
        cfg
    }
}

/// Resolve the draft policy from `NODE_ENV` and `ALLOW_DRAFTS`.
///
/// Call once at process start and pass the result down.
#[must_use]
pub fn draft_policy_from_env() -> DraftPolicy {
    let node_env = std::env::var("NODE_ENV").ok();
    let allow_drafts = std::env::var("ALLOW_DRAFTS").ok();
    DraftPolicy::from_vars(node_env.as_deref(), allow_drafts.as_deref())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validate_args_defaults() {
        let args = ValidateArgs::try_parse_from(["validate-frontmatter"]).unwrap();
        assert_eq!(args.format, ReportFormat::Human);

        let cfg = args.source.to_config();
        assert_eq!(cfg.project_root, PathBuf::from("."));
        assert_eq!(cfg.content_dir, PathBuf::from("pages/blog"));
        assert_eq!(cfg.include, "**/*.mdx");
        assert!(cfg.respect_gitignore);
    }

    #[test]
    fn test_validate_args_overrides() {
        let args = ValidateArgs::try_parse_from([
            "validate-frontmatter",
            "--root",
            "/srv/site",
            "--exclude",
            "drafts/**",
            "--exclude",
            "*.wip.mdx",
            "--no-gitignore",
            "--format",
            "json",
            "-vv",
        ])
        .unwrap();
        assert_eq!(args.format, ReportFormat::Json);
        assert_eq!(args.source.verbose, 2);

        let cfg = args.source.to_config();
        assert_eq!(cfg.project_root, PathBuf::from("/srv/site"));
        assert_eq!(cfg.exclude, vec!["drafts/**", "*.wip.mdx"]);
        assert!(!cfg.respect_gitignore);
    }

    #[test]
    fn test_sitemap_args_resolve_output_under_root() {
        let args = SitemapArgs::try_parse_from([
            "generate-sitemap",
            "--root",
            "/srv/site",
            "--site-url",
            "https://example.com",
        ])
        .unwrap();
        let cfg = args.to_config(DraftPolicy::Allow);
        assert_eq!(cfg.site_origin, "https://example.com");
        assert_eq!(cfg.output, PathBuf::from("/srv/site/public/sitemap.xml"));
        assert_eq!(cfg.draft_policy, DraftPolicy::Allow);
        assert_eq!(cfg.static_routes, vec!["/", "/about", "/blog"]);
    }
}
