//! HTTP Request representation for handlers

use crate::error::HandlerError;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Represents an incoming HTTP request
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Request {
    /// HTTP method (GET, POST, PUT, DELETE, etc.)
    pub method: String,

    /// Request path (e.g., "/api/hello")
    pub path: String,

    /// Query parameters
    #[serde(default)]
    pub query: HashMap<String, String>,

    /// HTTP headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Request body as text; `None` when the request had no body
    #[serde(default)]
    pub body: Option<String>,

    /// Set when the body bytes were not valid UTF-8. `body` then holds a
    /// lossy copy that must not be parsed.
    #[serde(default, skip_serializing_if = "std::ops::Not::not")]
    pub body_invalid_utf8: bool,

    /// Request ID for tracing
    #[serde(default)]
    pub request_id: String,
}

impl Request {
    /// Create a request with the given method and path and nothing else.
    pub fn new(method: impl Into<String>, path: impl Into<String>) -> Self {
        Self {
            method: method.into(),
            path: path.into(),
            ..Self::default()
        }
    }

    /// Add a query parameter (builder pattern).
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.insert(key.into(), value.into());
        self
    }

    /// Set the body (builder pattern).
    pub fn with_body(mut self, body: impl Into<String>) -> Self {
        self.body = Some(body.into());
        self
    }

    /// Set the body from raw bytes (builder pattern).
    ///
    /// An empty slice means no body. Bytes that are not UTF-8 are kept as a
    /// lossy copy and flagged, so [`json`](Self::json) rejects them.
    pub fn with_body_bytes(mut self, bytes: &[u8]) -> Self {
        if bytes.is_empty() {
            self.body = None;
            self.body_invalid_utf8 = false;
            return self;
        }
        match std::str::from_utf8(bytes) {
            Ok(text) => {
                self.body = Some(text.to_string());
                self.body_invalid_utf8 = false;
            }
            Err(_) => {
                self.body = Some(String::from_utf8_lossy(bytes).into_owned());
                self.body_invalid_utf8 = true;
            }
        }
        self
    }

    /// Parse the body as JSON into a typed value.
    ///
    /// A missing body, or one that was not UTF-8, is not valid JSON and fails
    /// the same way a malformed one does, with [`HandlerError::InvalidJson`].
    ///
    /// # Example
    /// ```ignore
    /// let payload: serde_json::Value = req.json()?;
    /// ```
    pub fn json<T: DeserializeOwned>(&self) -> Result<T, HandlerError> {
        if self.body_invalid_utf8 {
            return Err(HandlerError::InvalidJson("body is not valid UTF-8".to_string()));
        }
        serde_json::from_str(self.body.as_deref().unwrap_or(""))
            .map_err(|e| HandlerError::InvalidJson(e.to_string()))
    }

    /// Get a query parameter as a string reference.
    ///
    /// # Example
    /// ```ignore
    /// // URL: /api/hello?name=Ada
    /// let name = req.query_param("name"); // Some(&"Ada".to_string())
    /// ```
    pub fn query_param(&self, key: &str) -> Option<&String> {
        self.query.get(key)
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Check if request method matches (case-insensitive).
    ///
    /// # Example
    /// ```ignore
    /// if req.is_method("POST") { /* handle POST */ }
    /// ```
    pub fn is_method(&self, method: &str) -> bool {
        self.method.eq_ignore_ascii_case(method)
    }
}

impl Default for Request {
    fn default() -> Self {
        Self {
            method: "GET".to_string(),
            path: "/".to_string(),
            query: HashMap::new(),
            headers: HashMap::new(),
            body: None,
            body_invalid_utf8: false,
            request_id: String::new(),
        }
    }
}
