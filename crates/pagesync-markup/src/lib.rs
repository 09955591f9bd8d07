//! Markup conversion for pagesync.
//!
//! Converts lightweight markup documents into Confluence storage format:
//!
//! - [`Syntax`]: closed set of supported syntaxes, resolved from a host
//!   syntax identifier such as `Packages/Markdown/Markdown.sublime-syntax`
//! - [`Markup`]: dispatches a document to the converter for its syntax
//! - [`get_meta_and_content`]: splits the `Space:` / `Title:` /
//!   `Ancestor Title:` header block from the document body
//! - [`prettify_storage`]: re-indents storage XHTML fetched from the wiki
//!
//! # Example
//!
//! ```
//! use pagesync_markup::{Markup, get_meta_and_content};
//!
//! let text = "Space: TST\nTitle: Notes\n\n# Hello";
//! let (meta, body) = get_meta_and_content(text);
//! assert_eq!(meta.space_key.as_deref(), Some("TST"));
//!
//! let html = Markup::default().to_html(&body.join("\n"), "Markdown").unwrap();
//! assert_eq!(html, "<h1>Hello</h1>");
//! ```

mod converter;
mod error;
mod front_matter;
mod pretty;
mod renderer;
mod state;
mod storage;
mod syntax;

pub use converter::{Converter, Markup, MarkdownConverter, RstConverter};
pub use error::MarkupError;
pub use front_matter::{PageMetadata, get_meta_and_content};
pub use pretty::prettify_storage;
pub use renderer::StorageRenderer;
pub use state::escape_html;
pub use syntax::{HTML_SYNTAX, Syntax, is_html_syntax};
