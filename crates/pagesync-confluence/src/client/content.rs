//! Content operations for Confluence API.

use tracing::info;

use super::{ConfluenceClient, read_body, read_json};
use crate::api::ContentApi;
use crate::cql;
use crate::error::ConfluenceError;
use crate::types::{ContentHistory, ContentUpdate, NewContent, Page, PageSummary, SearchResults};

/// Fields expanded when fetching a page by id.
const PAGE_EXPAND: &str = "body.storage,version,space";

impl ConfluenceClient {
    /// Run a CQL content search.
    fn search(&self, cql: &str) -> Result<Vec<PageSummary>, ConfluenceError> {
        info!("Searching content: {}", cql);

        let response = self
            .agent
            .get(self.url("content/search"))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .query("cql", cql)
            .call()?;

        let results: SearchResults = read_json(response)?;
        info!("Found {} pages", results.results.len());
        Ok(results.results)
    }
}

impl ContentApi for ConfluenceClient {
    fn create_content(&self, content: &NewContent) -> Result<Page, ConfluenceError> {
        info!(
            "Creating page \"{}\" in space {}",
            content.title, content.space.key
        );

        let response = self
            .agent
            .post(self.url("content/"))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send_json(content)?;

        let page: Page = read_json(response)?;
        info!("Created page {}", page.id);
        Ok(page)
    }

    fn get_content_by_title(
        &self,
        space_key: &str,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        self.search(&cql::exact_title(space_key, title))
    }

    fn search_content(
        &self,
        space_key: Option<&str>,
        title: &str,
    ) -> Result<Vec<PageSummary>, ConfluenceError> {
        self.search(&cql::title_contains(space_key, title))
    }

    fn get_content_by_id(&self, id: &str) -> Result<Page, ConfluenceError> {
        info!("Getting page {}", id);

        let url = self.url(&format!("content/{id}?expand={PAGE_EXPAND}"));
        let response = self
            .agent
            .get(url)
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        read_json(response)
    }

    fn get_content_history(&self, id: &str) -> Result<ContentHistory, ConfluenceError> {
        info!("Getting history of page {}", id);

        let response = self
            .agent
            .get(self.url(&format!("content/{id}/history")))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        read_json(response)
    }

    fn update_content(&self, id: &str, content: &ContentUpdate) -> Result<Page, ConfluenceError> {
        info!(
            "Updating page {} to version {}",
            id, content.version.number
        );

        let response = self
            .agent
            .put(self.url(&format!("content/{id}")))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .send_json(content)?;

        let page: Page = read_json(response)?;
        info!(
            "Updated page {} to version {}",
            page.id,
            page.version_number().unwrap_or(content.version.number)
        );
        Ok(page)
    }

    fn delete_content(&self, id: &str) -> Result<(), ConfluenceError> {
        info!("Deleting page {}", id);

        let response = self
            .agent
            .delete(self.url(&format!("content/{id}")))
            .header("Authorization", &self.auth_header)
            .header("Accept", "application/json")
            .call()?;

        read_body(response)?;
        Ok(())
    }
}
