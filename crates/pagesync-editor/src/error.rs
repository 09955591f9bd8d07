//! Command error types.

use pagesync_confluence::ConfluenceError;
use pagesync_markup::MarkupError;

/// Error ending a command.
///
/// The display text is what the user sees in the error dialog.
#[derive(Debug, thiserror::Error)]
pub enum CommandError {
    /// Conversion failure or missing header field.
    #[error(transparent)]
    Markup(#[from] MarkupError),

    /// A wiki request failed.
    #[error("Can not {action}, reason: {}", .source.reason())]
    Http {
        action: &'static str,
        source: ConfluenceError,
    },

    /// Malformed data from the wiki.
    #[error(transparent)]
    Confluence(#[from] ConfluenceError),

    #[error("Can not find ancestor page \"{0}\"")]
    AncestorNotFound(String),

    #[error("No result found for {0}")]
    NoSearchResults(String),

    /// The document is not attached to a page.
    #[error("Can't {0}: this doesn't appear to be a valid Confluence page.")]
    UntrackedDocument(&'static str),
}

impl CommandError {
    /// Wrap a failed request made to `action`.
    pub(crate) fn http(action: &'static str) -> impl FnOnce(ConfluenceError) -> Self {
        move |source| Self::Http { action, source }
    }

    /// Raw response body of a failed request.
    pub fn response_body(&self) -> Option<&str> {
        match self {
            Self::Http { source, .. } => source.body(),
            _ => None,
        }
    }
}
