use pagesync_confluence::{AncestorRef, ContentApi, NewContent};
use pagesync_markup::{Markup, get_meta_and_content};
use tracing::info;

use super::copy_page_uri;
use crate::document::DocumentSession;
use crate::error::CommandError;
use crate::host::EditorHost;

/// Create a page under the ancestor named in the document header.
pub(crate) fn post(
    api: &dyn ContentApi,
    markup: &Markup,
    doc: &mut DocumentSession,
    host: &mut dyn EditorHost,
) -> Result<(), CommandError> {
    let (meta, body) = get_meta_and_content(&doc.text);
    let html = markup.to_html(&body.join("\n"), &doc.syntax)?;
    let space_key = meta.require_space_key()?;
    let title = meta.require_title()?;
    let ancestor_title = meta.require_ancestor_title()?;

    let ancestors = api
        .get_content_by_title(space_key, ancestor_title)
        .map_err(CommandError::http("get ancestor"))?;
    let ancestor = ancestors
        .first()
        .ok_or_else(|| CommandError::AncestorNotFound(ancestor_title.to_owned()))?;

    let content = NewContent::page(title, space_key, AncestorRef::parse(&ancestor.id)?, &html);
    let page = api
        .create_content(&content)
        .map_err(CommandError::http("create content"))?;
    info!("Created page {} \"{}\" in {}", page.id, page.title, space_key);

    copy_page_uri(&page, host);
    doc.attach(&page);
    host.status_message("Content created and the url copied to the clipboard.");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{HostCall, RecordingHost};
    use pagesync_confluence::{MockContentApi, MockOperation, MockRequest};
    use pretty_assertions::assert_eq;

    const DOC: &str = "Space: TST\nAncestor Title: Home\nTitle: New Page\n\n# Hello";

    fn run(
        api: &MockContentApi,
        text: &str,
    ) -> (Result<(), CommandError>, DocumentSession, RecordingHost) {
        let mut doc = DocumentSession::new("new.md", text, "Markdown");
        let mut host = RecordingHost::default();
        let result = post(api, &Markup::default(), &mut doc, &mut host);
        (result, doc, host)
    }

    #[test]
    fn test_post_creates_child_page() {
        let api = MockContentApi::new().with_page("100", "TST", "Home", "<p>home</p>", 1);
        let (result, doc, host) = run(&api, DOC);
        result.unwrap();

        let created = api.requests().into_iter().find_map(|r| match r {
            MockRequest::Create(content) => Some(content),
            _ => None,
        });
        assert_eq!(
            created,
            Some(NewContent::page("New Page", "TST", AncestorRef { id: 100 }, "<h1>Hello</h1>"))
        );
        assert_eq!(doc.attached_page().map(|p| p.id), Some("101".to_owned()));
        assert_eq!(
            host.calls,
            vec![
                HostCall::Clipboard(
                    "https://wiki.example.com/pages/viewpage.action?pageId=101".to_owned()
                ),
                HostCall::Status("Content created and the url copied to the clipboard.".to_owned()),
            ]
        );
    }

    #[test]
    fn test_missing_ancestor() {
        let api = MockContentApi::new();
        let (result, doc, _) = run(&api, DOC);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Can not find ancestor page \"Home\"");
        assert_eq!(doc.attached_page(), None);
    }

    #[test]
    fn test_ancestor_lookup_failure() {
        let api = MockContentApi::new().failing(MockOperation::GetByTitle, 401);
        let (result, _, _) = run(&api, DOC);
        assert_eq!(
            result.unwrap_err().to_string(),
            "Can not get ancestor, reason: Unauthorized"
        );
    }

    #[test]
    fn test_create_failure() {
        let api = MockContentApi::new()
            .with_page("100", "TST", "Home", "<p>home</p>", 1)
            .failing(MockOperation::Create, 400);
        let (result, _, host) = run(&api, DOC);
        let err = result.unwrap_err();
        assert_eq!(err.to_string(), "Can not create content, reason: Bad Request");
        assert!(err.response_body().is_some());
        assert!(host.calls.is_empty());
    }

    #[test]
    fn test_missing_header_field() {
        let api = MockContentApi::new();
        let (result, _, _) = run(&api, "Space: TST\nTitle: T\n\nbody");
        assert!(matches!(
            result.unwrap_err(),
            CommandError::Markup(pagesync_markup::MarkupError::MissingMetadata("Ancestor Title"))
        ));
        assert!(api.requests().is_empty());
    }

    #[test]
    fn test_unsupported_syntax_makes_no_request() {
        let api = MockContentApi::new();
        let mut doc = DocumentSession::new("a.txt", DOC, "Plain Text");
        let mut host = RecordingHost::default();
        let err = post(&api, &Markup::default(), &mut doc, &mut host).unwrap_err();
        assert_eq!(err.to_string(), "Not support Plain Text syntax yet");
        assert!(api.requests().is_empty());
    }
}
