//! Confluence content API for pagesync.
//!
//! This crate provides:
//! - [`ContentApi`]: the content operations the editor commands rely on
//! - [`ConfluenceClient`]: blocking REST client with HTTP Basic authentication
//! - Page resource and request body types
//!
//! # Example
//!
//! ```no_run
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! use pagesync_confluence::{ClientOptions, ConfluenceClient, ContentApi, content_uri};
//!
//! let client = ConfluenceClient::new(
//!     "https://wiki.example.com/rest/api",
//!     "alice",
//!     "secret",
//!     ClientOptions::default(),
//! );
//!
//! let results = client.search_content(Some("TST"), "Release")?;
//! if let Some(first) = results.first() {
//!     let page = client.get_content_by_id(&first.id)?;
//!     println!("{:?}", content_uri(&page));
//! }
//! # Ok(())
//! # }
//! ```

mod api;
mod client;
mod cql;
pub mod error;
#[cfg(feature = "mock")]
mod mock;
mod types;

pub use api::ContentApi;
pub use client::{ClientOptions, ConfluenceClient};
pub use error::ConfluenceError;
#[cfg(feature = "mock")]
pub use mock::{MockContentApi, MockOperation, MockRequest};
pub use types::{
    AncestorRef, Body, ContentHistory, ContentUpdate, HistoryUser, LastUpdated, Links, NewContent,
    Page, PageSummary, SearchResults, SpaceRef, Storage, Version, VersionUpdate, content_uri,
};
