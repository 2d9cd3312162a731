//! Command-line entry points for the blog content pipeline.
//!
//! Two binaries share this library:
//! - `validate-frontmatter`: checks every post's front matter, exit code 1 on any failure
//! - `generate-sitemap`: writes `public/sitemap.xml` from the valid, published posts

pub mod args;
pub mod logging;
pub mod render;
pub mod sitemap_cmd;
pub mod validate_cmd;
