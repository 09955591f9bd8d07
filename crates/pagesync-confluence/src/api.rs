//! Content operations used by the editor commands.

use crate::error::ConfluenceError;
use crate::types::{ContentHistory, ContentUpdate, NewContent, Page, PageSummary};

/// Remote content operations.
///
/// Implemented by [`ConfluenceClient`](crate::ConfluenceClient) for the real
/// service. Every call blocks until the server answers; failures are returned
/// as [`ConfluenceError`] and never retried.
pub trait ContentApi {
    /// Create a page.
    fn create_content(&self, content: &NewContent) -> Result<Page, ConfluenceError>;

    /// Find pages in a space whose title matches exactly.
    fn get_content_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError>;

    /// Find pages whose title contains `title`; `None` searches every space.
    fn search_content(
        &self,
        space_key: Option<&str>,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError>;

    /// Fetch a page with its storage body, version and space.
    fn get_content_by_id(&self, id: &str) -> Result<Page, ConfluenceError>;

    /// Fetch the history of a page.
    fn get_content_history(&self, id: &str) -> Result<ContentHistory, ConfluenceError>;

    /// Replace a page with a new version.
    fn update_content(&self, id: &str, content: &ContentUpdate) -> Result<Page, ConfluenceError>;

    /// Delete a page.
    fn delete_content(&self, id: &str) -> Result<(), ConfluenceError>;
}
