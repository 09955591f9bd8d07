//! Page header block parsing.
//!
//! A document may start with a block of `Key: value` lines naming the target
//! page, terminated by the first blank line:
//!
//! ```text
//! Space: TST
//! Ancestor Title: Home
//! Title: Release Notes
//!
//! # Body starts here
//! ```

use std::sync::LazyLock;

use regex::Regex;

use crate::error::MarkupError;

static META_LINE_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"(?i)^(space|ancestor title|title):\s*(.*)$").expect("valid regex")
});

/// Target page described by a document header.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PageMetadata {
    /// `Space:` value.
    pub space_key: Option<String>,
    /// `Title:` value.
    pub title: Option<String>,
    /// `Ancestor Title:` value.
    pub ancestor_title: Option<String>,
}

impl PageMetadata {
    pub fn require_space_key(&self) -> Result<&str, MarkupError> {
        self.space_key
            .as_deref()
            .ok_or(MarkupError::MissingMetadata("Space"))
    }

    pub fn require_title(&self) -> Result<&str, MarkupError> {
        self.title
            .as_deref()
            .ok_or(MarkupError::MissingMetadata("Title"))
    }

    pub fn require_ancestor_title(&self) -> Result<&str, MarkupError> {
        self.ancestor_title
            .as_deref()
            .ok_or(MarkupError::MissingMetadata("Ancestor Title"))
    }
}

/// Split a document into its header metadata and body lines.
///
/// Lines are scanned until the first blank line; every line after it is body.
/// Unrecognized header lines are ignored. A document without any blank line
/// has an empty body.
pub fn get_meta_and_content(text: &str) -> (PageMetadata, Vec<&str>) {
    let mut meta = PageMetadata::default();
    let lines: Vec<&str> = text.lines().collect();

    for (index, line) in lines.iter().enumerate() {
        if line.trim().is_empty() {
            return (meta, lines[index + 1..].to_vec());
        }
        let Some(caps) = META_LINE_RE.captures(line) else {
            continue;
        };
        let value = caps[2].trim().to_owned();
        match caps[1].to_ascii_lowercase().as_str() {
            "space" => meta.space_key = Some(value),
            "ancestor title" => meta.ancestor_title = Some(value),
            _ => meta.title = Some(value),
        }
    }

    (meta, Vec::new())
}
