//! Front matter schema.
//!
//! Every field is checked independently, so one pass over a file yields all
//! of its violations:
//!
//! | field     | rule                                        |
//! |-----------|---------------------------------------------|
//! | `title`   | required string, at least 3 characters      |
//! | `slug`    | required string matching `^[a-z0-9-]+$`     |
//! | `date`    | required string matching `^\d{4}-\d{2}-\d{2}$` |
//! | `summary` | required string, at least 10 characters     |
//! | `tags`    | optional array of strings                   |
//! | `draft`   | optional boolean                            |
//! | `updated` | optional string                             |
//! | `cover`   | optional string                             |
//!
//! Unknown fields are ignored. `date` is checked for shape only, not for
//! being a real calendar day.

use std::sync::LazyLock;

use regex::Regex;
use serde::Serialize;

use crate::error::ExtractError;
use crate::frontmatter::{FieldValue, Metadata};

static SLUG_PATTERN: LazyLock<Regex> = LazyLock::new(|| match Regex::new(r"^[a-z0-9-]+$") {
    Ok(regex) => regex,
    Err(err) => panic!("Invalid slug regex: {err}"),
});

static DATE_PATTERN: LazyLock<Regex> =
    LazyLock::new(|| match Regex::new(r"^[0-9]{4}-[0-9]{2}-[0-9]{2}$") {
        Ok(regex) => regex,
        Err(err) => panic!("Invalid date regex: {err}"),
    });

/// Field path used for failures that concern the whole header.
pub const ROOT_PATH: &str = "root";

/// One schema failure: which field, and what is wrong with it.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
#[non_exhaustive]
pub struct Violation {
    /// Dotted field path, e.g. `title` or `tags.1`.
    pub path: String,
    /// Human-readable description of the failure.
    pub message: String,
}

impl Violation {
    #[must_use]
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }

    /// A header that could not be parsed at all.
    #[must_use]
    pub fn unparsable(err: &ExtractError) -> Self {
        Self::new(ROOT_PATH, err.to_string())
    }
}

/// Front matter that satisfies the schema.
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct FrontMatter {
    pub title: String,
    pub slug: String,
    pub date: String,
    pub summary: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub draft: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub updated: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub cover: Option<String>,
}

impl FrontMatter {
    /// Whether the record is explicitly flagged `draft: true`.
    #[must_use]
    pub fn is_draft(&self) -> bool {
        self.draft == Some(true)
    }
}

/// Validate extracted metadata against the schema.
///
/// # Errors
///
/// Returns every violation found when any field fails its rule. A missing
/// required field is exactly one violation; satisfied fields contribute none.
pub fn validate(metadata: &Metadata) -> Result<FrontMatter, Vec<Violation>> {
    let mut checker = Checker {
        metadata,
        violations: Vec::new(),
    };

    let title = checker.required_string("title").filter(|title| {
        checker.ensure(
            char_len(title) >= 3,
            "title",
            "title must be at least 3 characters",
        )
    });
    let slug = checker.required_string("slug").filter(|slug| {
        checker.ensure(
            SLUG_PATTERN.is_match(slug),
            "slug",
            "slug must be lower-kebab-case (a-z, 0-9, -)",
        )
    });
    let date = checker.required_string("date").filter(|date| {
        checker.ensure(
            DATE_PATTERN.is_match(date),
            "date",
            "date must be formatted YYYY-MM-DD",
        )
    });
    let summary = checker.required_string("summary").filter(|summary| {
        checker.ensure(
            char_len(summary) >= 10,
            "summary",
            "summary must be at least 10 characters",
        )
    });
    let tags = checker.optional_string_list("tags");
    let draft = checker.optional_bool("draft");
    let updated = checker.optional_string("updated");
    let cover = checker.optional_string("cover");

    match (title, slug, date, summary) {
        (Some(title), Some(slug), Some(date), Some(summary)) if checker.violations.is_empty() => {
            Ok(FrontMatter {
                title: title.to_owned(),
                slug: slug.to_owned(),
                date: date.to_owned(),
                summary: summary.to_owned(),
                tags,
                draft,
                updated: updated.map(str::to_owned),
                cover: cover.map(str::to_owned),
            })
        }
        _ => Err(checker.violations),
    }
}

fn char_len(value: &str) -> usize {
    value.chars().count()
}

fn type_mismatch(expected: &str, found: &FieldValue) -> String {
    format!("Expected {expected}, received {}", found.kind())
}

/// Accumulates violations while reading fields out of one metadata map.
struct Checker<'a> {
    metadata: &'a Metadata,
    violations: Vec<Violation>,
}

impl<'a> Checker<'a> {
    fn ensure(&mut self, holds: bool, path: &str, message: &str) -> bool {
        if !holds {
            self.violations.push(Violation::new(path, message));
        }
        holds
    }

    fn required_string(&mut self, field: &str) -> Option<&'a str> {
        if self.metadata.get(field).is_none() {
            self.violations.push(Violation::new(field, "Required"));
            return None;
        }
        self.optional_string(field)
    }

    fn optional_string(&mut self, field: &str) -> Option<&'a str> {
        match self.metadata.get(field)? {
            FieldValue::Text(value) => Some(value.as_str()),
            other => {
                self.violations
                    .push(Violation::new(field, type_mismatch("string", other)));
                None
            }
        }
    }

    fn optional_bool(&mut self, field: &str) -> Option<bool> {
        match self.metadata.get(field)? {
            FieldValue::Bool(value) => Some(*value),
            other => {
                self.violations
                    .push(Violation::new(field, type_mismatch("boolean", other)));
                None
            }
        }
    }

    fn optional_string_list(&mut self, field: &str) -> Option<Vec<String>> {
        let items = match self.metadata.get(field)? {
            FieldValue::List(items) => items,
            other => {
                self.violations
                    .push(Violation::new(field, type_mismatch("array", other)));
                return None;
            }
        };

        let before = self.violations.len();
        let mut strings = Vec::with_capacity(items.len());
        for (idx, item) in items.iter().enumerate() {
            match item {
                FieldValue::Text(value) => strings.push(value.clone()),
                other => self.violations.push(Violation::new(
                    format!("{field}.{idx}"),
                    type_mismatch("string", other),
                )),
            }
        }
        (self.violations.len() == before).then_some(strings)
    }
}
