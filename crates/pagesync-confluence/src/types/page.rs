//! Confluence page types.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Confluence page resource.
///
/// Fields the commands do not read are kept in `extra`, so a page attached
/// to a document serializes back to the JSON the server sent.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct Page {
    /// Page ID.
    pub id: String,
    /// Content type (always "page").
    #[serde(rename = "type", default = "page_type")]
    pub content_type: String,
    /// Page title.
    pub title: String,
    /// Space the page lives in.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub space: Option<SpaceRef>,
    /// Version information.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub version: Option<Version>,
    /// Page body content.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub body: Option<Body>,
    /// Hypermedia links.
    #[serde(rename = "_links", default, skip_serializing_if = "Option::is_none")]
    pub links: Option<Links>,
    /// Remaining fields, preserved verbatim.
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Page {
    /// Current version number, if the resource was fetched with versions.
    pub fn version_number(&self) -> Option<u32> {
        self.version.as_ref().map(|v| v.number)
    }

    /// Space key, if the resource was fetched with its space.
    pub fn space_key(&self) -> Option<&str> {
        self.space.as_ref().map(|s| s.key.as_str())
    }

    /// Storage format body, or an empty string.
    pub fn storage_value(&self) -> &str {
        self.body
            .as_ref()
            .and_then(|b| b.storage.as_ref())
            .map_or("", |s| s.value.as_str())
    }
}

pub(crate) fn page_type() -> String {
    "page".to_owned()
}

/// Reference to a space by key.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct SpaceRef {
    /// Space key.
    pub key: String,
}

/// Page version.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Version {
    /// Version number.
    pub number: u32,
    /// Whether the version was a minor edit.
    #[serde(rename = "minorEdit", default)]
    pub minor_edit: bool,
    /// Version message/comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub message: Option<String>,
}

/// Page body content.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Body {
    /// Storage format content.
    #[serde(default)]
    pub storage: Option<Storage>,
}

/// Storage format representation.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Storage {
    /// HTML content in Confluence storage format.
    pub value: String,
    /// Content representation (always "storage").
    pub representation: String,
}

impl Storage {
    /// Storage representation of an HTML value.
    pub fn new(value: impl Into<String>) -> Self {
        Self {
            value: value.into(),
            representation: "storage".to_owned(),
        }
    }
}

/// Hypermedia links.
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct Links {
    /// Site base URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub base: Option<String>,
    /// Web UI link, relative to `base`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub webui: Option<String>,
    /// API self link.
    #[serde(rename = "self", default, skip_serializing_if = "Option::is_none")]
    pub self_link: Option<String>,
}

/// Page entry in search results.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct PageSummary {
    /// Page ID.
    pub id: String,
    /// Page title.
    pub title: String,
    /// Hypermedia links.
    #[serde(rename = "_links", default)]
    pub links: Option<Links>,
}

/// Content search response.
///
/// Serde ignores paging fields like `start`, `limit` and `size`.
#[derive(Debug, Clone, Deserialize)]
pub struct SearchResults {
    /// Matching pages.
    pub results: Vec<PageSummary>,
}

/// Absolute web URL of a page: `_links.base` followed by `_links.webui`.
///
/// Returns `None` when the resource does not carry both links.
pub fn content_uri(page: &Page) -> Option<String> {
    let links = page.links.as_ref()?;
    let base = links.base.as_deref()?;
    let webui = links.webui.as_deref()?;
    Some(format!("{base}{webui}"))
}
