//! Syntax identifiers.
//!
//! Hosts describe a document's syntax with an identifier that may carry path
//! and extension decorations (`Packages/Markdown/Markdown.sublime-syntax`).
//! Only the base name selects the converter.

use std::fmt;

use crate::error::MarkupError;

/// Syntax identifier assigned to documents holding storage HTML.
pub const HTML_SYNTAX: &str = "Packages/HTML/HTML.sublime-syntax";

/// Markup syntaxes that can be converted to storage format.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Syntax {
    /// Markdown, in any of its host flavours.
    Markdown,
    /// reStructuredText, converted through docutils.
    ReStructuredText,
}

impl Syntax {
    /// Resolve a host syntax identifier.
    ///
    /// # Errors
    ///
    /// Returns [`MarkupError::UnsupportedSyntax`] with the normalized base name
    /// when the syntax has no converter.
    pub fn from_identifier(identifier: &str) -> Result<Self, MarkupError> {
        match base_name(identifier) {
            "Markdown" | "Markdown Extended" | "Markdown (Standard)" => Ok(Self::Markdown),
            "reStructuredText" => Ok(Self::ReStructuredText),
            other => Err(MarkupError::UnsupportedSyntax(other.to_owned())),
        }
    }
}

impl fmt::Display for Syntax {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Markdown => "Markdown",
            Self::ReStructuredText => "reStructuredText",
        })
    }
}

/// Whether the identifier names an HTML syntax.
pub fn is_html_syntax(identifier: &str) -> bool {
    identifier.contains("HTML")
}

/// Strip the extension, then keep the last path segment.
fn base_name(identifier: &str) -> &str {
    let stem = identifier.split('.').next().unwrap_or(identifier);
    stem.rsplit('/').next().unwrap_or(stem)
}
