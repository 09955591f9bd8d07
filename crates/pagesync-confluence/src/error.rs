//! Error types for the Confluence content API.

/// Error from Confluence API operations.
#[derive(Debug, thiserror::Error)]
pub enum ConfluenceError {
    /// HTTP request failed (network error, TLS failure, etc).
    #[error("HTTP request failed: {0}")]
    HttpRequest(#[from] ureq::Error),

    /// Server returned an error status.
    #[error("HTTP error: {status} {reason}")]
    HttpResponse {
        /// HTTP status code.
        status: u16,
        /// Canonical reason phrase for the status.
        reason: String,
        /// Response body (may contain error details).
        body: String,
    },

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// A content id returned by the server is not numeric.
    #[error("invalid content id: {0}")]
    InvalidContentId(String),
}

impl ConfluenceError {
    /// Short reason shown to the user.
    ///
    /// For server errors this is the HTTP reason phrase only; the body is
    /// meant for logs.
    pub fn reason(&self) -> String {
        match self {
            Self::HttpResponse { reason, .. } => reason.clone(),
            other => other.to_string(),
        }
    }

    /// Raw response body, when the server sent one.
    pub fn body(&self) -> Option<&str> {
        match self {
            Self::HttpResponse { body, .. } => Some(body),
            _ => None,
        }
    }

    /// Build a response error from a status code and body.
    pub(crate) fn from_status(status: u16, body: String) -> Self {
        let reason = ureq::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|s| s.canonical_reason())
            .unwrap_or("Unknown")
            .to_owned();
        Self::HttpResponse {
            status,
            reason,
            body,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_reason_is_phrase_only() {
        let err = ConfluenceError::from_status(404, r#"{"message":"No content"}"#.to_owned());
        assert_eq!(err.reason(), "Not Found");
        assert_eq!(err.body(), Some(r#"{"message":"No content"}"#));
        assert_eq!(err.to_string(), "HTTP error: 404 Not Found");
    }

    #[test]
    fn test_unknown_status_reason() {
        let err = ConfluenceError::from_status(599, String::new());
        assert_eq!(err.reason(), "Unknown");
    }

    #[test]
    fn test_non_http_reason_uses_display() {
        let err = ConfluenceError::InvalidContentId("abc".to_owned());
        assert_eq!(err.reason(), "invalid content id: abc");
        assert_eq!(err.body(), None);
    }
}
