use pagesync_confluence::{ContentApi, Page};
use tracing::info;

use crate::error::CommandError;
use crate::host::EditorHost;

/// Delete the attached page. The document stays open.
pub(crate) fn delete(
    api: &dyn ContentApi,
    page: &Page,
    host: &mut dyn EditorHost,
) -> Result<(), CommandError> {
    api.delete_content(&page.id)
        .map_err(CommandError::http("delete content"))?;
    info!("Deleted page {} \"{}\"", page.id, page.title);
    host.status_message("Confluence page has been deleted.");
    Ok(())
}
