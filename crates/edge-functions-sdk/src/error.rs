//! Error types for edge function handlers

use thiserror::Error;

use crate::Response;

/// Fixed message used for internal errors when the handler supplies none.
pub const DEFAULT_INTERNAL_MESSAGE: &str = "An error occurred while processing your request";

/// Errors that can occur in a handler
#[derive(Error, Debug)]
pub enum HandlerError {
    #[error("{0}")]
    MethodNotAllowed(String),

    #[error("{0}")]
    BadRequest(String),

    /// The body is not JSON; the payload carries the parser's reason.
    #[error("Invalid JSON format")]
    InvalidJson(String),

    #[error("Request body must contain valid JSON")]
    EmptyBody,

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("IPC error: {0}")]
    Ipc(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl HandlerError {
    /// Convert the error to an HTTP status code
    pub fn status_code(&self) -> u16 {
        match self {
            HandlerError::MethodNotAllowed(_) => 405,
            HandlerError::BadRequest(_) | HandlerError::InvalidJson(_) | HandlerError::EmptyBody => 400,
            HandlerError::Serialization(_) | HandlerError::Ipc(_) | HandlerError::Internal(_) => 500,
        }
    }

    /// Whether the caller is at fault. Client errors are safe to echo back.
    pub fn is_client_error(&self) -> bool {
        (400..500).contains(&self.status_code())
    }

    /// Convert to a Response.
    ///
    /// Server-side errors never leak their detail; they render the generic
    /// internal error body instead.
    pub fn to_response(&self) -> Response {
        self.to_response_with(DEFAULT_INTERNAL_MESSAGE)
    }

    /// Like [`to_response`](Self::to_response), with a handler-specific
    /// message for the internal error body.
    pub fn to_response_with(&self, internal_message: &str) -> Response {
        match self {
            HandlerError::MethodNotAllowed(_) => {
                Response::error(405, "Method not allowed", self.to_string())
            }
            HandlerError::BadRequest(_) | HandlerError::InvalidJson(_) | HandlerError::EmptyBody => {
                Response::error(400, "Bad request", self.to_string())
            }
            _ => Response::internal_error(internal_message),
        }
    }
}
