//! Confluence content types.

mod history;
mod page;
mod request;

pub use history::{ContentHistory, HistoryUser, LastUpdated};
pub use page::{
    Body, Links, Page, PageSummary, SearchResults, SpaceRef, Storage, Version, content_uri,
};
pub use request::{AncestorRef, ContentUpdate, NewContent, VersionUpdate};
