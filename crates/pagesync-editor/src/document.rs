//! Per-document session state.

use pagesync_confluence::Page;
use serde_json::{Map, Value};
use tracing::warn;

/// Setting key holding the attached page resource.
pub const PAGE_SETTING: &str = "confluence_content";

/// An open document as seen by the commands.
///
/// Besides the text and syntax, a document carries a settings map owned by
/// the host. Fetching, creating or updating a page stores the page resource
/// under [`PAGE_SETTING`], which makes later commands target that page.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DocumentSession {
    pub name: String,
    pub text: String,
    /// Syntax identifier in the host's naming.
    pub syntax: String,
    settings: Map<String, Value>,
}

impl DocumentSession {
    pub fn new(
        name: impl Into<String>,
        text: impl Into<String>,
        syntax: impl Into<String>,
    ) -> Self {
        Self {
            name: name.into(),
            text: text.into(),
            syntax: syntax.into(),
            settings: Map::new(),
        }
    }

    /// Restore a document with previously saved settings.
    #[must_use]
    pub fn with_settings(mut self, settings: Map<String, Value>) -> Self {
        self.settings = settings;
        self
    }

    pub fn settings(&self) -> &Map<String, Value> {
        &self.settings
    }

    /// The page this document is attached to.
    ///
    /// A setting that does not hold a page resource is ignored.
    pub fn attached_page(&self) -> Option<Page> {
        let value = self.settings.get(PAGE_SETTING)?;
        match serde_json::from_value(value.clone()) {
            Ok(page) => Some(page),
            Err(e) => {
                warn!("Ignoring invalid {PAGE_SETTING} setting: {e}");
                None
            }
        }
    }

    /// Attach the document to `page`, replacing any previous attachment.
    pub fn attach(&mut self, page: &Page) {
        match serde_json::to_value(page) {
            Ok(value) => {
                self.settings.insert(PAGE_SETTING.to_owned(), value);
            }
            Err(e) => warn!("Can not store page {}: {e}", page.id),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    fn page() -> Page {
        serde_json::from_value(json!({
            "id": "42",
            "type": "page",
            "title": "Attached",
            "version": {"number": 2}
        }))
        .unwrap()
    }

    #[test]
    fn test_new_document_is_untracked() {
        let doc = DocumentSession::new("notes.md", "# Notes", "Markdown");
        assert_eq!(doc.attached_page(), None);
    }

    #[test]
    fn test_attach_and_read_back() {
        let mut doc = DocumentSession::new("notes.md", "", "Markdown");
        doc.attach(&page());
        assert_eq!(doc.attached_page(), Some(page()));
        assert!(doc.settings().contains_key(PAGE_SETTING));
    }

    #[test]
    fn test_invalid_setting_ignored() {
        let mut settings = Map::new();
        settings.insert(PAGE_SETTING.to_owned(), json!("not a page"));
        let doc = DocumentSession::default().with_settings(settings);
        assert_eq!(doc.attached_page(), None);
    }
}
