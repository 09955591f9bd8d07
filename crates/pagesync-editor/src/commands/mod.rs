//! Page commands.
//!
//! Each command runs against an authenticated [`ContentApi`] once the
//! controller has collected credentials.

mod delete;
mod get;
mod history;
mod post;
mod update;

pub(crate) use delete::delete;
pub(crate) use get::{open_page, search_pages};
pub(crate) use history::history;
pub(crate) use post::post;
pub(crate) use update::{update_from_editor, update_from_source};

use pagesync_confluence::{Page, content_uri};
use tracing::warn;

use crate::host::EditorHost;

/// User-facing commands.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Create a page from the document header and body.
    Post,
    /// Search pages by title and open one for editing.
    Get(GetScope),
    /// Push the document to its page.
    Update,
    /// Delete the page the document is attached to.
    Delete,
    /// Show the edit history of the attached page.
    History,
}

impl Command {
    /// Verb used in messages.
    pub fn verb(self) -> &'static str {
        match self {
            Self::Post => "post",
            Self::Get(_) => "get",
            Self::Update => "update",
            Self::Delete => "delete",
            Self::History => "view history",
        }
    }
}

/// Space restriction of a page search.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GetScope {
    /// The configured default space; asks when none is configured.
    #[default]
    DefaultSpace,
    /// Always ask for a space key.
    AskSpace,
    /// Search every space.
    AllSpaces,
}

/// Copy the page URL to the clipboard.
fn copy_page_uri(page: &Page, host: &mut dyn EditorHost) {
    match content_uri(page) {
        Some(uri) => host.set_clipboard(&uri),
        None => warn!("Page {} has no web link", page.id),
    }
}
