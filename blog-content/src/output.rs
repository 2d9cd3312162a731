//! Shared output formatting for validation reports.
//!
//! Provides JSON and plain-text formatters for `ValidationReport`.
//! Color/terminal formatting belongs to the CLI layer.

use std::io::Write;

use crate::report::ValidationReport;

/// Prefix for warning lines.
pub const WARNING_MARK: &str = "\u{26a0}";
/// Prefix for success lines.
pub const SUCCESS_MARK: &str = "\u{2713}";
/// Prefix for failure lines.
pub const FAILURE_MARK: &str = "\u{2717}";

/// Format a `ValidationReport` as JSON to a writer.
///
/// # Errors
///
/// Returns an error if serialization or writing fails.
pub fn write_json(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    let json = serde_json::to_string_pretty(report)?;
    writeln!(writer, "{json}")?;
    Ok(())
}

/// Format a `ValidationReport` as human-readable plain text to a writer.
///
/// Failing files are listed one block each, separated by a blank line,
/// with one bullet per violation. Passing files only count towards the
/// summary line.
///
/// # Errors
///
/// Returns an error if writing fails.
pub fn write_human(report: &ValidationReport, writer: &mut dyn Write) -> anyhow::Result<()> {
    for skipped in &report.skipped {
        writeln!(
            writer,
            "{WARNING_MARK} Skipped {}",
            skipped.format_human_readable()
        )?;
    }

    if report.is_empty() {
        writeln!(
            writer,
            "{WARNING_MARK} No content files found under {}",
            report.content_dir.display()
        )?;
        return Ok(());
    }

    if report.scanned_files == 0 {
        writeln!(
            writer,
            "{WARNING_MARK} No content files could be validated under {} ({} skipped)",
            report.content_dir.display(),
            report.skipped.len()
        )?;
        return Ok(());
    }

    if report.ok {
        writeln!(
            writer,
            "{SUCCESS_MARK} Frontmatter OK for {} files",
            report.scanned_files
        )?;
        return Ok(());
    }

    for failure in &report.failures {
        writeln!(writer, "{FAILURE_MARK} {}", failure.file.display())?;
        for violation in &failure.violations {
            writeln!(writer, "  \u{2022} {}: {}", violation.path, violation.message)?;
        }
        writeln!(writer)?;
    }
    writeln!(
        writer,
        "{FAILURE_MARK} {} of {} files failed front matter validation",
        report.failed_files(),
        report.scanned_files
    )?;

    Ok(())
}

/// Render a report as plain text together with its exit status.
#[must_use]
pub fn render_human(report: &ValidationReport) -> (String, i32) {
    let mut buf = Vec::new();
    // Writing into a Vec cannot fail.
    if write_human(report, &mut buf).is_err() {
        buf.clear();
    }
    (String::from_utf8_lossy(&buf).into_owned(), report.exit_code())
}
