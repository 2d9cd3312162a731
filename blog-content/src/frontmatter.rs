//! Front matter extraction from content files.
//!
//! A content file may open with a YAML header delimited by `---` lines:
//!
//! ```text
//! ---
//! title: Hello
//! tags:
//!   - rust
//! ---
//!
//! Body starts here.
//! ```
//!
//! The header is parsed into [`Metadata`], a map of typed [`FieldValue`]s.
//! Nothing here checks which fields exist; that is the schema's job.

use std::collections::BTreeMap;
use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::error::ExtractError;

const DELIMITER: &str = "---";

/// Pulls a line number out of a parser diagnostic ("... at line 3 column 5").
static DIAGNOSTIC_LINE: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"line (\d+)") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid diagnostic regex: {err}"),
});

/// A single header value, typed by the header syntax.
#[derive(Debug, Clone, PartialEq)]
pub enum FieldValue {
    Text(String),
    Bool(bool),
    List(Vec<FieldValue>),
    Number,
    Null,
    Mapping,
}

impl FieldValue {
    /// Name of the value's type as shown in violation messages.
    #[must_use]
    pub const fn kind(&self) -> &'static str {
        match self {
            Self::Text(_) => "string",
            Self::Bool(_) => "boolean",
            Self::List(_) => "array",
            Self::Number => "number",
            Self::Null => "null",
            Self::Mapping => "object",
        }
    }

    fn from_json(value: Value) -> Self {
        match value {
            Value::String(s) => Self::Text(s),
            Value::Bool(b) => Self::Bool(b),
            Value::Array(items) => Self::List(items.into_iter().map(Self::from_json).collect()),
            Value::Number(_) => Self::Number,
            Value::Null => Self::Null,
            Value::Object(_) => Self::Mapping,
        }
    }
}

impl From<&str> for FieldValue {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl From<bool> for FieldValue {
    fn from(value: bool) -> Self {
        Self::Bool(value)
    }
}

/// Unvalidated header fields of one content file.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Metadata(BTreeMap<String, FieldValue>);

impl Metadata {
    #[must_use]
    pub fn get(&self, field: &str) -> Option<&FieldValue> {
        self.0.get(field)
    }

    pub fn insert(&mut self, field: impl Into<String>, value: FieldValue) {
        self.0.insert(field.into(), value);
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.0.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, FieldValue)> for Metadata {
    fn from_iter<I: IntoIterator<Item = (K, FieldValue)>>(iter: I) -> Self {
        Self(iter.into_iter().map(|(k, v)| (k.into(), v)).collect())
    }
}

/// Header fields plus the content that follows the header.
#[derive(Debug, Clone, PartialEq)]
pub struct Extracted<'a> {
    pub metadata: Metadata,
    pub body: &'a str,
}

/// Extract the front matter block from raw file bytes.
///
/// A file without an opening `---` line has empty metadata and is all body.
///
/// # Errors
///
/// Returns [`ExtractError`] if the bytes are not UTF-8, the header is never
/// closed, the header is not valid YAML, or it is not a key/value mapping.
pub fn extract(raw: &[u8]) -> Result<Extracted<'_>, ExtractError> {
    let content = std::str::from_utf8(raw).map_err(|_| ExtractError::InvalidEncoding)?;
    let content = content.strip_prefix('\u{feff}').unwrap_or(content);

    let Some((header, body)) = split_header(content)? else {
        return Ok(Extracted {
            metadata: Metadata::default(),
            body: content,
        });
    };

    Ok(Extracted {
        metadata: parse_header(header)?,
        body,
    })
}

/// Split `content` into `(header, body)` if it opens with a delimiter line.
fn split_header(content: &str) -> Result<Option<(&str, &str)>, ExtractError> {
    let mut lines = content.split_inclusive('\n');
    let Some(first) = lines.next() else {
        return Ok(None);
    };
    if first.trim_end() != DELIMITER {
        return Ok(None);
    }

    let header_start = first.len();
    let mut offset = header_start;
    for line in lines {
        if line.trim_end() == DELIMITER {
            let header = &content[header_start..offset];
            let body = &content[offset + line.len()..];
            return Ok(Some((header, body)));
        }
        offset += line.len();
    }

    Err(ExtractError::Unterminated { line: 1 })
}

/// First line of the header block in file coordinates (line 1 is the opening `---`).
const HEADER_FIRST_LINE: usize = 2;

fn parse_header(header: &str) -> Result<Metadata, ExtractError> {
    let has_content = header.lines().any(|line| {
        let line = line.trim();
        !line.is_empty() && !line.starts_with('#')
    });
    if !has_content {
        return Ok(Metadata::default());
    }

    // Only `true`/`false` are booleans; `yes`, `no`, `on` and `off` stay strings.
    let options = serde_saphyr::Options {
        strict_booleans: true,
        ..serde_saphyr::Options::default()
    };
    let value: Value = serde_saphyr::from_str_with_options(header, options).map_err(|err| {
        let message = err.to_string();
        let line = DIAGNOSTIC_LINE
            .captures(&message)
            .and_then(|caps| caps[1].parse::<usize>().ok())
            .map_or(HEADER_FIRST_LINE, |n| n.max(1) + HEADER_FIRST_LINE - 1);
        ExtractError::Malformed { line, message }
    })?;

    match value {
        Value::Object(map) => Ok(map
            .into_iter()
            .map(|(key, value)| (key, FieldValue::from_json(value)))
            .collect()),
        Value::Null => Ok(Metadata::default()),
        other => Err(ExtractError::NotAMapping {
            line: HEADER_FIRST_LINE,
            found: FieldValue::from_json(other).kind(),
        }),
    }
}
