//! HTTP Response representation for handlers

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::error::HandlerError;
use crate::timestamp::utc_timestamp;

/// Represents an outgoing HTTP response.
///
/// # Quick Reference
///
/// | Method | Status | Use Case |
/// |--------|--------|----------|
/// | `ok(body)` | 200 | Successful response |
/// | `try_ok(body)` | 200 | Successful response, serialization errors propagated |
/// | `error(status, error, msg)` | any | Structured client error |
/// | `not_found(msg)` | 404 | Unknown function |
/// | `internal_error(msg)` | 500 | Catch-all failure |
///
/// Every body is JSON; every constructor sets `Content-Type: application/json`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Response {
    /// HTTP status code
    pub status: u16,

    /// Response headers
    #[serde(default)]
    pub headers: HashMap<String, String>,

    /// Response body
    #[serde(default)]
    pub body: Option<String>,
}

/// Structured error body shared by every error response.
///
/// `status` is only present on internal errors, where it is always `"error"`.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ErrorBody {
    pub error: String,
    pub message: String,
    pub timestamp: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<String>,
}

impl ErrorBody {
    pub fn new(error: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            error: error.into(),
            message: message.into(),
            timestamp: utc_timestamp(),
            status: None,
        }
    }
}

impl Response {
    /// Create a new response with the given status code (no body).
    pub fn new(status: u16) -> Self {
        Self {
            status,
            headers: HashMap::new(),
            body: None,
        }
    }

    /// Create a 200 OK response with JSON body.
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(json!({"message": "Success"}))
    /// ```
    pub fn ok<T: Serialize>(body: T) -> Self {
        Self::json(200, body)
    }

    /// Create a 200 OK response, propagating serialization failures.
    pub fn try_ok<T: Serialize>(body: T) -> Result<Self, HandlerError> {
        Self::try_json(200, body)
    }

    /// Create a JSON response with a custom status code.
    ///
    /// A body that fails to serialize leaves the response without a body; use
    /// [`try_json`](Self::try_json) where that must be an error instead.
    pub fn json<T: Serialize>(status: u16, body: T) -> Self {
        Self {
            status,
            headers: json_headers(),
            body: serde_json::to_string(&body).ok(),
        }
    }

    /// Create a JSON response, returning an error if the body cannot be
    /// serialized.
    pub fn try_json<T: Serialize>(status: u16, body: T) -> Result<Self, HandlerError> {
        Ok(Self {
            status,
            headers: json_headers(),
            body: Some(serde_json::to_string(&body)?),
        })
    }

    /// Create a structured error response: `{error, message, timestamp}`.
    ///
    /// # Example
    /// ```ignore
    /// Response::error(405, "Method not allowed", "This endpoint only accepts POST requests")
    /// ```
    pub fn error(status: u16, error: impl Into<String>, message: impl Into<String>) -> Self {
        Self::json(status, ErrorBody::new(error, message))
    }

    /// Create a 404 Not Found response with a custom message.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self::error(404, "Not found", message)
    }

    /// Create a 413 Payload Too Large response.
    pub fn payload_too_large(message: impl Into<String>) -> Self {
        Self::error(413, "Payload too large", message)
    }

    /// Create a 500 Internal Server Error response.
    ///
    /// Unlike the other error bodies this one carries `status: "error"`.
    pub fn internal_error(message: impl Into<String>) -> Self {
        let mut body = ErrorBody::new("Internal server error", message);
        body.status = Some("error".to_string());
        Self::json(500, body)
    }

    /// Add a header to the response (builder pattern).
    ///
    /// # Example
    /// ```ignore
    /// Response::ok(json!({"data": "value"}))
    ///     .with_header("X-Custom-Header", "value")
    /// ```
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.insert(key.into(), value.into());
        self
    }

    /// Mark the response as not cacheable (`Cache-Control: no-cache`).
    pub fn no_cache(self) -> Self {
        self.with_header("Cache-Control", "no-cache")
    }

    /// Get a header value (case-insensitive lookup).
    pub fn header(&self, key: &str) -> Option<&String> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(key))
            .map(|(_, v)| v)
    }

    /// Parse the body back as JSON.
    pub fn body_json<T: for<'de> Deserialize<'de>>(&self) -> Result<T, HandlerError> {
        let body = self.body.as_deref().unwrap_or("null");
        Ok(serde_json::from_str(body)?)
    }
}

impl Default for Response {
    fn default() -> Self {
        Self::new(200)
    }
}

fn json_headers() -> HashMap<String, String> {
    let mut headers = HashMap::new();
    headers.insert("Content-Type".to_string(), "application/json".to_string());
    headers
}
