// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stdout/print_stderr: the summary line and errors are user output.
// - exit: the exit code is the result the build pipeline reads.
#![allow(
    clippy::print_stdout,
    clippy::print_stderr,
    clippy::exit
)]

use blog_cli::{args, logging, sitemap_cmd};
use clap::Parser;

fn main() {
    let cli = args::SitemapArgs::parse();
    logging::init(cli.source.verbose);
    let draft_policy = args::draft_policy_from_env();

    match sitemap_cmd::run(&cli, draft_policy) {
        Ok(summary) => println!(
            "Generated sitemap with {} entries -> {}",
            summary.entries,
            summary.output.display()
        ),
        Err(e) => {
            eprintln!("Failed generating sitemap: {e:#}");
            std::process::exit(1);
        }
    }
}
