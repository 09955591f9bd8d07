//! Mock content API for testing.
//!
//! Provides [`MockContentApi`] for unit testing the editor commands without a
//! wiki server.

use std::collections::{BTreeMap, HashMap};
use std::sync::{Arc, Mutex, MutexGuard};

use serde_json::{Map, json};

use crate::api::ContentApi;
use crate::error::ConfluenceError;
use crate::types::{
    Body, ContentHistory, ContentUpdate, HistoryUser, LastUpdated, Links, NewContent, Page,
    PageSummary, SpaceRef, Version,
};

/// Site base URL of mock pages.
const MOCK_BASE: &str = "https://wiki.example.com";

const VERSION_CONFLICT: &str = "Version must be incremented on update.";

/// Operation selector for injected failures.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MockOperation {
    Create,
    GetByTitle,
    Search,
    GetById,
    History,
    Update,
    Delete,
}

/// Request received by the mock.
#[derive(Debug, Clone, PartialEq)]
pub enum MockRequest {
    Create(NewContent),
    GetByTitle { space_key: String, title: String },
    Search { space_key: Option<String>, title: String },
    GetById(String),
    History(String),
    Update { id: String, content: ContentUpdate },
    Delete(String),
}

#[derive(Debug, Default)]
struct MockState {
    pages: BTreeMap<u64, Page>,
    next_id: u64,
    failures: HashMap<MockOperation, u16>,
    requests: Vec<MockRequest>,
}

/// In-memory content API.
///
/// Clones share state, so a test can keep a handle while the code under test
/// owns another.
///
/// # Example
///
/// ```ignore
/// let api = MockContentApi::new().with_page("100", "TST", "Home", "<p>home</p>", 1);
/// let found = api.get_content_by_title("TST", "Home")?;
/// assert_eq!(found[0].id, "100");
/// ```
#[derive(Debug, Clone, Default)]
pub struct MockContentApi {
    state: Arc<Mutex<MockState>>,
}

impl MockContentApi {
    /// Create an empty mock.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a page.
    ///
    /// # Panics
    ///
    /// Panics if `id` is not numeric.
    #[must_use]
    pub fn with_page(
        self,
        id: &str,
        space_key: &str,
        title: &str,
        html: &str,
        version: u32,
    ) -> Self {
        let numeric: u64 = id.parse().expect("mock page ids are numeric");
        {
            let mut state = self.lock();
            state.next_id = state.next_id.max(numeric + 1);
            state
                .pages
                .insert(numeric, mock_page(numeric, space_key, title, html, version));
        }
        self
    }

    /// Make every call of `operation` fail with `status`.
    #[must_use]
    pub fn failing(self, operation: MockOperation, status: u16) -> Self {
        self.lock().failures.insert(operation, status);
        self
    }

    /// Requests received so far, in order.
    pub fn requests(&self) -> Vec<MockRequest> {
        self.lock().requests.clone()
    }

    /// Current state of a page.
    pub fn page(&self, id: &str) -> Option<Page> {
        let id: u64 = id.parse().ok()?;
        self.lock().pages.get(&id).cloned()
    }

    fn lock(&self) -> MutexGuard<'_, MockState> {
        self.state.lock().unwrap_or_else(std::sync::PoisonError::into_inner)
    }

    /// Record a request and return the injected failure, if any.
    fn record(
        &self,
        operation: MockOperation,
        request: MockRequest,
    ) -> Result<(), ConfluenceError> {
        let mut state = self.lock();
        state.requests.push(request);
        match state.failures.get(&operation) {
            Some(&status) => Err(ConfluenceError::from_status(
                status,
                format!(r#"{{"statusCode":{status},"message":"mock failure"}}"#),
            )),
            None => Ok(()),
        }
    }

    fn not_found(id: &str) -> ConfluenceError {
        ConfluenceError::from_status(
            404,
            format!(r#"{{"statusCode":404,"message":"No content found with id: {id}"}}"#),
        )
    }

    fn summaries<F>(&self, predicate: F) -> Vec<PageSummary>
    where
        F: Fn(&Page) -> bool,
    {
        self.lock()
            .pages
            .values()
            .filter(|page| predicate(page))
            .map(|page| PageSummary {
                id: page.id.clone(),
                title: page.title.clone(),
                links: page.links.clone().map(|links| Links { base: None, ..links }),
            })
            .collect()
    }
}

fn mock_page(id: u64, space_key: &str, title: &str, html: &str, version: u32) -> Page {
    Page {
        id: id.to_string(),
        content_type: "page".to_owned(),
        title: title.to_owned(),
        space: Some(SpaceRef {
            key: space_key.to_owned(),
        }),
        version: Some(Version {
            number: version,
            minor_edit: false,
            message: None,
        }),
        body: Some(Body {
            storage: Some(crate::types::Storage::new(html)),
        }),
        links: Some(Links {
            base: Some(MOCK_BASE.to_owned()),
            webui: Some(format!("/pages/viewpage.action?pageId={id}")),
            self_link: None,
        }),
        extra: Map::new(),
    }
}

fn storage_html(body: &Body) -> &str {
    body.storage.as_ref().map_or("", |s| s.value.as_str())
}

impl ContentApi for MockContentApi {
    fn create_content(&self, content: &NewContent) -> Result<Page, ConfluenceError> {
        self.record(MockOperation::Create, MockRequest::Create(content.clone()))?;
        let mut state = self.lock();
        let id = state.next_id.max(1);
        state.next_id = id + 1;
        let page = mock_page(
            id,
            &content.space.key,
            &content.title,
            storage_html(&content.body),
            1,
        );
        state.pages.insert(id, page.clone());
        Ok(page)
    }

    fn get_content_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        self.record(
            MockOperation::GetByTitle,
            MockRequest::GetByTitle {
                space_key: space_key.to_owned(),
                title: title.to_owned(),
            },
        )?;
        Ok(self.summaries(|page| page.space_key() == Some(space_key) && page.title == title))
    }

    fn search_content(
        &self,
        space_key: Option<&str>,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        self.record(
            MockOperation::Search,
            MockRequest::Search {
                space_key: space_key.map(str::to_owned),
                title: title.to_owned(),
            },
        )?;
        let needle = title.to_lowercase();
        Ok(self.summaries(|page| {
            space_key.is_none_or(|key| page.space_key() == Some(key))
                && page.title.to_lowercase().contains(&needle)
        }))
    }

    fn get_content_by_id(&self, id: &str) -> Result<Page, ConfluenceError> {
        self.record(MockOperation::GetById, MockRequest::GetById(id.to_owned()))?;
        self.page(id).ok_or_else(|| Self::not_found(id))
    }

    fn get_content_history(&self, id: &str) -> Result<ContentHistory, ConfluenceError> {
        self.record(MockOperation::History, MockRequest::History(id.to_owned()))?;
        let page = self.page(id).ok_or_else(|| Self::not_found(id))?;
        let author = HistoryUser {
            display_name: Some("Mock User".to_owned()),
            username: Some("mock".to_owned()),
        };
        Ok(ContentHistory {
            latest: true,
            created_by: Some(author.clone()),
            created_date: Some("2024-01-01T00:00:00.000Z".to_owned()),
            last_updated: Some(LastUpdated {
                by: Some(author),
                when: Some("2024-01-02T00:00:00.000Z".to_owned()),
                number: page.version_number().unwrap_or(1),
            }),
        })
    }

    fn update_content(&self, id: &str, content: &ContentUpdate) -> Result<Page, ConfluenceError> {
        self.record(
            MockOperation::Update,
            MockRequest::Update {
                id: id.to_owned(),
                content: content.clone(),
            },
        )?;
        let numeric: u64 = id.parse().map_err(|_| Self::not_found(id))?;
        let mut state = self.lock();
        let Some(page) = state.pages.get_mut(&numeric) else {
            return Err(Self::not_found(id));
        };
        let current = page.version_number().unwrap_or(0);
        if content.version.number != current + 1 {
            let body = json!({
                "statusCode": 409,
                "message": format!("{VERSION_CONFLICT} Current version is: {current}"),
            });
            return Err(ConfluenceError::from_status(409, body.to_string()));
        }
        page.title.clone_from(&content.title);
        page.version = Some(Version {
            number: content.version.number,
            minor_edit: content.version.minor_edit,
            message: None,
        });
        page.body = Some(content.body.clone());
        Ok(page.clone())
    }

    fn delete_content(&self, id: &str) -> Result<(), ConfluenceError> {
        self.record(MockOperation::Delete, MockRequest::Delete(id.to_owned()))?;
        let numeric: u64 = id.parse().map_err(|_| Self::not_found(id))?;
        self.lock()
            .pages
            .remove(&numeric)
            .map(|_| ())
            .ok_or_else(|| Self::not_found(id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::AncestorRef;

    #[test]
    fn test_create_then_find_by_title() {
        let api = MockContentApi::new().with_page("100", "TST", "Home", "<p>home</p>", 1);
        let created = api
            .create_content(&NewContent::page("Child", "TST", AncestorRef { id: 100 }, "<p>c</p>"))
            .unwrap();
        assert_eq!(created.id, "101");

        let found = api.get_content_by_title("TST", "Child").unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].id, "101");
    }

    #[test]
    fn test_update_requires_next_version() {
        let api = MockContentApi::new().with_page("7", "TST", "Page", "<p>a</p>", 3);
        let page = api.page("7").unwrap();

        let mut stale = ContentUpdate::next_version(&page, "Page", "TST", "<p>b</p>");
        stale.version.number = 3;
        let err = api.update_content("7", &stale).unwrap_err();
        assert_eq!(err.reason(), "Conflict");

        let update = ContentUpdate::next_version(&page, "Page", "TST", "<p>b</p>");
        let updated = api.update_content("7", &update).unwrap();
        assert_eq!(updated.version_number(), Some(4));
    }

    #[test]
    fn test_injected_failure_is_recorded() {
        let api = MockContentApi::new().failing(MockOperation::Delete, 403);
        let err = api.delete_content("1").unwrap_err();
        assert_eq!(err.reason(), "Forbidden");
        assert_eq!(api.requests(), vec![MockRequest::Delete("1".to_owned())]);
    }
}
