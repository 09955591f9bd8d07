use pagesync_confluence::{ContentApi, PageSummary};
use pagesync_markup::{HTML_SYNTAX, prettify_storage};
use tracing::debug;

use super::copy_page_uri;
use crate::error::CommandError;
use crate::host::{EditorHost, NewDocument};

/// Find pages whose title contains `title`, in one space or in all spaces.
pub(crate) fn search_pages(
    api: &dyn ContentApi,
    space_key: Option<&str>,
    title: &str,
) -> Result<Vec<PageSummary>, CommandError> {
    let pages = api
        .search_content(space_key, title)
        .map_err(CommandError::http("get pages"))?;
    debug!("Search for \"{title}\" found {} pages", pages.len());
    if pages.is_empty() {
        return Err(CommandError::NoSearchResults(title.to_owned()));
    }
    Ok(pages)
}

/// Fetch a page and open its storage body in a new HTML document.
pub(crate) fn open_page(
    api: &dyn ContentApi,
    summary: &PageSummary,
    pretty_print: bool,
    host: &mut dyn EditorHost,
) -> Result<(), CommandError> {
    let page = api
        .get_content_by_id(&summary.id)
        .map_err(CommandError::http("get content"))?;

    let text = if pretty_print {
        prettify_storage(page.storage_value())
    } else {
        page.storage_value().to_owned()
    };
    copy_page_uri(&page, host);
    host.open_document(NewDocument {
        name: page.title.clone(),
        text,
        syntax: HTML_SYNTAX.to_owned(),
        page,
    });
    host.status_message("Content url copied to the clipboard.");
    Ok(())
}
