// These Clippy lints are disabled because this is a CLI binary, not a library:
// - print_stderr: unexpected errors are reported to the user on stderr.
// - exit: the exit code is the result the build pipeline reads.
#![allow(clippy::print_stderr, clippy::exit)]

use blog_cli::{args::ValidateArgs, logging, validate_cmd};
use clap::Parser;

fn main() {
    let args = ValidateArgs::parse();
    logging::init(args.source.verbose);

    match validate_cmd::run(&args) {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("Unexpected error while validating frontmatter: {e:#}");
            std::process::exit(1);
        }
    }
}
