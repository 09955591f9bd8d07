//! Content history types.

use serde::Deserialize;

/// History of a content item.
#[derive(Debug, Clone, Deserialize)]
pub struct ContentHistory {
    /// Whether this is the latest version.
    #[serde(default)]
    pub latest: bool,
    /// Author of the first version.
    #[serde(rename = "createdBy", default)]
    pub created_by: Option<HistoryUser>,
    /// Creation timestamp (ISO 8601).
    #[serde(rename = "createdDate", default)]
    pub created_date: Option<String>,
    /// Latest version, when expanded by the server.
    #[serde(rename = "lastUpdated", default)]
    pub last_updated: Option<LastUpdated>,
}

/// User referenced by history entries.
#[derive(Debug, Clone, Deserialize)]
pub struct HistoryUser {
    /// Display name.
    #[serde(rename = "displayName", default)]
    pub display_name: Option<String>,
    /// Login name (Server/Data Center only).
    #[serde(default)]
    pub username: Option<String>,
}

impl HistoryUser {
    /// Best available name for display.
    pub fn name(&self) -> &str {
        self.display_name
            .as_deref()
            .or(self.username.as_deref())
            .unwrap_or("unknown")
    }
}

/// Latest version summary.
#[derive(Debug, Clone, Deserialize)]
pub struct LastUpdated {
    /// Version author.
    #[serde(default)]
    pub by: Option<HistoryUser>,
    /// Version timestamp (ISO 8601).
    #[serde(default)]
    pub when: Option<String>,
    /// Version number.
    pub number: u32,
}
