//! Integration tests for the `validate-frontmatter` and `generate-sitemap`
//! command paths.

use std::fs;
use std::path::Path;

use blog_cli::args::{SitemapArgs, ValidateArgs};
use blog_cli::{sitemap_cmd, validate_cmd};
use blog_content::DraftPolicy;
use clap::Parser;
use tempfile::TempDir;

fn write_post(root: &Path, name: &str, content: &str) {
    let path = root.join("pages/blog").join(name);
    fs::create_dir_all(path.parent().unwrap()).unwrap();
    fs::write(path, content).unwrap();
}

fn post(slug: &str, extra: &str) -> String {
    format!(
        "---\ntitle: \"Post {slug}\"\nslug: {slug}\ndate: \"2024-03-01\"\nsummary: \"A summary that is long enough.\"\n{extra}---\n\nBody.\n"
    )
}

fn validate_args(root: &Path) -> ValidateArgs {
    ValidateArgs::try_parse_from(["validate-frontmatter", "--root", root.to_str().unwrap()])
        .unwrap()
}

fn sitemap_args(root: &Path, extra: &[&str]) -> SitemapArgs {
    let mut argv = vec![
        "generate-sitemap",
        "--root",
        root.to_str().unwrap(),
        "--site-url",
        "https://example.com",
    ];
    argv.extend_from_slice(extra);
    SitemapArgs::try_parse_from(argv).unwrap()
}

#[test]
fn test_validate_exit_codes() {
    let tmp = TempDir::new().unwrap();
    write_post(tmp.path(), "good.mdx", &post("good", ""));
    assert_eq!(validate_cmd::run(&validate_args(tmp.path())).unwrap(), 0);

    write_post(tmp.path(), "bad.mdx", "---\ntitle: Hi\n---\n");
    assert_eq!(validate_cmd::run(&validate_args(tmp.path())).unwrap(), 1);
}

#[test]
fn test_validate_empty_content_dir_passes() {
    let tmp = TempDir::new().unwrap();
    assert_eq!(validate_cmd::run(&validate_args(tmp.path())).unwrap(), 0);
}

#[test]
fn test_validate_missing_root_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let args = validate_args(&tmp.path().join("nope"));
    assert!(validate_cmd::run(&args).is_err());
}

#[test]
fn test_validate_json_format() {
    let tmp = TempDir::new().unwrap();
    write_post(tmp.path(), "bad.mdx", "---\ntitle: Hi\n---\n");
    let args = ValidateArgs::try_parse_from([
        "validate-frontmatter",
        "--root",
        tmp.path().to_str().unwrap(),
        "--format",
        "json",
    ])
    .unwrap();
    assert_eq!(validate_cmd::run(&args).unwrap(), 1);
}

#[test]
fn test_sitemap_writes_document_under_root() {
    let tmp = TempDir::new().unwrap();
    write_post(tmp.path(), "hello.mdx", &post("hello-world", ""));
    write_post(tmp.path(), "wip.mdx", &post("wip", "draft: true\n"));

    let summary = sitemap_cmd::run(&sitemap_args(tmp.path(), &[]), DraftPolicy::Exclude).unwrap();
    assert_eq!(summary.entries, 4);
    assert_eq!(summary.output, tmp.path().join("public/sitemap.xml"));

    let xml = fs::read_to_string(&summary.output).unwrap();
    assert!(xml.contains("<loc>https://example.com/blog/hello-world</loc>"));
    assert!(!xml.contains("/blog/wip"));
}

#[test]
fn test_sitemap_allows_drafts_in_development() {
    let tmp = TempDir::new().unwrap();
    write_post(tmp.path(), "wip.mdx", &post("wip", "draft: true\n"));

    let summary = sitemap_cmd::run(&sitemap_args(tmp.path(), &[]), DraftPolicy::Allow).unwrap();
    let xml = fs::read_to_string(summary.output).unwrap();
    assert!(xml.contains("<loc>https://example.com/blog/wip</loc>"));
}

#[test]
fn test_sitemap_fail_on_draft_lists_every_draft_and_writes_nothing() {
    let tmp = TempDir::new().unwrap();
    write_post(tmp.path(), "live.mdx", &post("live", ""));
    write_post(tmp.path(), "wip-a.mdx", &post("wip-a", "draft: true\n"));
    write_post(tmp.path(), "wip-b.mdx", &post("wip-b", "draft: true\n"));

    let args = sitemap_args(tmp.path(), &["--fail-on-draft"]);
    let err = sitemap_cmd::run(&args, DraftPolicy::Exclude).unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("2 draft post(s)"), "got: {message}");
    assert!(message.contains("pages/blog/wip-a.mdx"));
    assert!(message.contains("pages/blog/wip-b.mdx"));
    assert!(message.contains("ALLOW_DRAFTS=true"));
    assert!(!tmp.path().join("public/sitemap.xml").exists());

    // Under the allow policy nothing is blocked.
    assert!(sitemap_cmd::run(&args, DraftPolicy::Allow).is_ok());
}

#[test]
fn test_sitemap_custom_output_path() {
    let tmp = TempDir::new().unwrap();
    let out = tmp.path().join("dist").join("map.xml");
    let args = sitemap_args(tmp.path(), &["--output", out.to_str().unwrap()]);

    let summary = sitemap_cmd::run(&args, DraftPolicy::Exclude).unwrap();
    assert_eq!(summary.output, out);
    assert_eq!(summary.entries, 3);
    assert!(out.is_file());
}
