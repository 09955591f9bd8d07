use pagesync_confluence::{ContentApi, ContentUpdate, Page};
use pagesync_markup::{Markup, get_meta_and_content, is_html_syntax};
use tracing::info;

use super::copy_page_uri;
use crate::document::DocumentSession;
use crate::error::CommandError;
use crate::host::EditorHost;

const UPDATED: &str = "Page updated and url copied to the clipboard.";

/// Push the document to the page it is attached to.
///
/// HTML documents are storage bodies opened by get and are sent as they are,
/// without line breaks. Other documents are converted from their markup.
pub(crate) fn update_from_editor(
    api: &dyn ContentApi,
    markup: &Markup,
    page: &Page,
    doc: &mut DocumentSession,
    host: &mut dyn EditorHost,
) -> Result<(), CommandError> {
    let html = if is_html_syntax(&doc.syntax) {
        doc.text.split('\n').collect::<String>()
    } else {
        let (_, body) = get_meta_and_content(&doc.text);
        markup.to_html(&body.join("\n"), &doc.syntax)?
    };
    let space_key = page
        .space_key()
        .ok_or(CommandError::UntrackedDocument("update"))?;

    let content = ContentUpdate::next_version(page, &page.title, space_key, &html);
    let updated = api
        .update_content(&page.id, &content)
        .map_err(CommandError::http("update content"))?;
    finish(&updated, doc, host);
    Ok(())
}

/// Push a markup document to the page named in its header.
pub(crate) fn update_from_source(
    api: &dyn ContentApi,
    markup: &Markup,
    doc: &mut DocumentSession,
    host: &mut dyn EditorHost,
) -> Result<(), CommandError> {
    let (meta, body) = get_meta_and_content(&doc.text);
    let html = markup.to_html(&body.join("\n"), &doc.syntax)?;
    let space_key = meta.require_space_key()?;
    let title = meta.require_title()?;

    let found = api
        .get_content_by_title(space_key, title)
        .map_err(CommandError::http("get content by title"))?;
    let target = found
        .first()
        .ok_or_else(|| CommandError::NoSearchResults(title.to_owned()))?;
    let current = api
        .get_content_by_id(&target.id)
        .map_err(CommandError::http("get content by id"))?;

    let content = ContentUpdate::next_version(&current, title, space_key, &html);
    let updated = api
        .update_content(&current.id, &content)
        .map_err(CommandError::http("update content"))?;
    finish(&updated, doc, host);
    Ok(())
}

fn finish(updated: &Page, doc: &mut DocumentSession, host: &mut dyn EditorHost) {
    info!(
        "Updated page {} to version {}",
        updated.id,
        updated.version_number().unwrap_or_default()
    );
    copy_page_uri(updated, host);
    doc.attach(updated);
    host.status_message(UPDATED);
}
