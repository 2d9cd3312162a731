//! Terminal colouring for report text.
//!
//! The library renders plain text with a status mark at the start of each
//! headline; this module only decides colours from those marks.

use std::io::{self, IsTerminal, Write};

use blog_content::output::{FAILURE_MARK, SUCCESS_MARK, WARNING_MARK};
use colored::Colorize;

/// Colour each line of `text` by its leading status mark.
#[must_use]
pub fn colorize(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for line in text.lines() {
        let painted = if line.starts_with(FAILURE_MARK) {
            line.red().bold().to_string()
        } else if line.starts_with(SUCCESS_MARK) {
            line.green().to_string()
        } else if line.starts_with(WARNING_MARK) {
            line.yellow().to_string()
        } else {
            line.to_owned()
        };
        out.push_str(&painted);
        out.push('\n');
    }
    out
}

/// Write `text` to `stream`, coloured only when the stream is a terminal.
///
/// # Errors
///
/// Returns an error if writing to the stream fails.
pub fn emit<W: Write + IsTerminal>(mut stream: W, text: &str) -> io::Result<()> {
    colored::control::set_override(stream.is_terminal());
    stream.write_all(colorize(text).as_bytes())?;
    stream.flush()
}
