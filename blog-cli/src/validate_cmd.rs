//! `validate-frontmatter`: the pre-build front matter gate.

use std::io;

use blog_content::{output, validate_content};

use crate::args::{ReportFormat, ValidateArgs};
use crate::render;

/// Validate every content file and print the report.
///
/// Human output goes to stdout when every file passes and to stderr when any
/// fails. JSON output always goes to stdout. Returns the process exit code.
///
/// # Errors
///
/// Returns an error if the project root is missing, a discovery pattern is
/// invalid, or the report cannot be written.
pub fn run(args: &ValidateArgs) -> anyhow::Result<i32> {
    let config = args.source.to_config();
    let report = validate_content(&config)?;

    match args.format {
        ReportFormat::Json => {
            let mut stdout = io::stdout().lock();
            output::write_json(&report, &mut stdout)?;
        }
        ReportFormat::Human => {
            let (text, _) = output::render_human(&report);
            if report.ok {
                render::emit(io::stdout(), &text)?;
            } else {
                render::emit(io::stderr(), &text)?;
            }
        }
    }

    Ok(report.exit_code())
}
