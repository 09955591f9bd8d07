//! Request bodies for creating and updating content.

use serde::{Deserialize, Serialize};

use super::page::{Body, Page, SpaceRef, Storage, page_type};
use crate::error::ConfluenceError;

/// Reference to an ancestor page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct AncestorRef {
    /// Numeric page ID.
    pub id: u64,
}

impl AncestorRef {
    /// Parse a page ID as returned by the API (a numeric string).
    pub fn parse(id: &str) -> Result<Self, ConfluenceError> {
        id.trim()
            .parse()
            .map(|id| Self { id })
            .map_err(|_| ConfluenceError::InvalidContentId(id.to_owned()))
    }
}

/// Body of a create request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct NewContent {
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Parent pages.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub ancestors: Vec<AncestorRef>,
    /// Target space.
    pub space: SpaceRef,
    /// Page body.
    pub body: Body,
}

impl NewContent {
    /// New page under `ancestor` in `space_key`.
    pub fn page(title: &str, space_key: &str, ancestor: AncestorRef, html: &str) -> Self {
        Self {
            content_type: page_type(),
            title: title.to_owned(),
            ancestors: vec![ancestor],
            space: SpaceRef {
                key: space_key.to_owned(),
            },
            body: Body {
                storage: Some(Storage::new(html)),
            },
        }
    }
}

/// Version block of an update request.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct VersionUpdate {
    /// New version number.
    pub number: u32,
    /// Whether to suppress notifications.
    #[serde(rename = "minorEdit")]
    pub minor_edit: bool,
}

/// Body of an update request.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ContentUpdate {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Page space.
    pub space: SpaceRef,
    /// Version being written.
    pub version: VersionUpdate,
    /// Page body.
    pub body: Body,
}

impl ContentUpdate {
    /// Update replacing `current` with the next version.
    ///
    /// The version number is the current one plus one; the server rejects
    /// anything else.
    pub fn next_version(current: &Page, title: &str, space_key: &str, html: &str) -> Self {
        Self {
            id: current.id.clone(),
            content_type: page_type(),
            title: title.to_owned(),
            space: SpaceRef {
                key: space_key.to_owned(),
            },
            version: VersionUpdate {
                number: current.version_number().unwrap_or(0) + 1,
                minor_edit: false,
            },
            body: Body {
                storage: Some(Storage::new(html)),
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use serde_json::json;

    #[test]
    fn test_new_content_body() {
        let content =
            NewContent::page("New Page", "TST", AncestorRef { id: 100 }, "<h1>Hello</h1>");
        assert_eq!(
            serde_json::to_value(&content).unwrap(),
            json!({
                "type": "page",
                "title": "New Page",
                "ancestors": [{"id": 100}],
                "space": {"key": "TST"},
                "body": {"storage": {"value": "<h1>Hello</h1>", "representation": "storage"}}
            })
        );
    }

    #[test]
    fn test_next_version_increments() {
        let current: Page = serde_json::from_value(json!({
            "id": "42",
            "type": "page",
            "title": "Old",
            "version": {"number": 3, "minorEdit": true}
        }))
        .unwrap();

        let update = ContentUpdate::next_version(&current, "Old", "TST", "<p>new</p>");

        assert_eq!(
            serde_json::to_value(&update).unwrap(),
            json!({
                "id": "42",
                "type": "page",
                "title": "Old",
                "space": {"key": "TST"},
                "version": {"number": 4, "minorEdit": false},
                "body": {"storage": {"value": "<p>new</p>", "representation": "storage"}}
            })
        );
    }

    #[test]
    fn test_parse_ancestor_id() {
        assert_eq!(AncestorRef::parse("100").unwrap(), AncestorRef { id: 100 });
        assert!(matches!(
            AncestorRef::parse("abc"),
            Err(ConfluenceError::InvalidContentId(id)) if id == "abc"
        ));
    }
}
