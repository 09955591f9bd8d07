//! Confluence REST API client.
//!
//! Provides a sync HTTP client for the Confluence content REST API with HTTP
//! Basic authentication. One [`Agent`] is kept per client so the connection
//! is reused across the calls of a single command.

mod content;

use base64::Engine;
use base64::engine::general_purpose::STANDARD;
use serde::de::DeserializeOwned;
use tracing::{debug, info};
use ureq::http::Response;
use ureq::tls::TlsConfig;
use ureq::{Agent, Body};

use crate::error::ConfluenceError;

/// Connection options.
#[derive(Debug, Clone, Copy, Default)]
pub struct ClientOptions {
    /// Verify the server certificate. Off by default: wiki servers behind
    /// corporate proxies commonly use self-signed certificates.
    pub verify_tls: bool,
}

/// Confluence REST API client.
pub struct ConfluenceClient {
    agent: Agent,
    base_uri: String,
    auth_header: String,
}

impl ConfluenceClient {
    /// Create a client bound to one user and API root.
    ///
    /// # Arguments
    /// * `base_uri` - API root, e.g. `https://wiki.example.com/rest/api`
    /// * `username` - Basic auth username
    /// * `password` - Basic auth password
    /// * `options` - Connection options
    pub fn new(base_uri: &str, username: &str, password: &str, options: ClientOptions) -> Self {
        let tls = TlsConfig::builder()
            .disable_verification(!options.verify_tls)
            .build();
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .tls_config(tls)
            .build()
            .into();

        info!(
            "Confluence client username: {}, password: {}, base_uri: {}",
            username,
            "*".repeat(password.chars().count()),
            base_uri
        );

        Self {
            agent,
            base_uri: base_uri.trim_end_matches('/').to_owned(),
            auth_header: basic_auth_header(username, password),
        }
    }

    /// Absolute URL of an API path.
    fn url(&self, sub_uri: &str) -> String {
        format!("{}/{}", self.base_uri, sub_uri)
    }
}

/// `Authorization` header value for HTTP Basic authentication.
fn basic_auth_header(username: &str, password: &str) -> String {
    format!("Basic {}", STANDARD.encode(format!("{username}:{password}")))
}

/// Read a response body, turning error statuses into [`ConfluenceError::HttpResponse`].
fn read_body(response: Response<Body>) -> Result<String, ConfluenceError> {
    let status = response.status().as_u16();
    let mut body_reader = response.into_body();

    if status >= 400 {
        let error_body = body_reader
            .read_to_string()
            .unwrap_or_else(|_| "(unable to read error body)".to_owned());
        return Err(ConfluenceError::from_status(status, error_body));
    }

    debug!("Response status {}", status);
    Ok(body_reader.read_to_string()?)
}

/// Read and decode a JSON response body.
fn read_json<T: DeserializeOwned>(response: Response<Body>) -> Result<T, ConfluenceError> {
    let text = read_body(response)?;
    Ok(serde_json::from_str(&text)?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_basic_auth_header() {
        // RFC 7617 example credentials
        assert_eq!(
            basic_auth_header("Aladdin", "open sesame"),
            "Basic QWxhZGRpbjpvcGVuIHNlc2FtZQ=="
        );
    }

    #[test]
    fn test_url_joins_sub_uri() {
        let client = ConfluenceClient::new(
            "https://wiki.example.com/rest/api/",
            "alice",
            "secret",
            ClientOptions::default(),
        );
        assert_eq!(client.base_uri, "https://wiki.example.com/rest/api");
        assert_eq!(
            client.url("content/"),
            "https://wiki.example.com/rest/api/content/"
        );
    }
}
