//! Handler signature and the shared error boundary
//!
//! Every handler has the same shape: a fallible core returning
//! `Result<Response, HandlerError>` wrapped by [`respond`], which turns any
//! error into a structured JSON response. Nothing escapes the boundary.
//!
//! # Example
//!
//! ```ignore
//! use edge_functions_sdk::prelude::*;
//!
//! pub fn handle(req: Request) -> Response {
//!     edge_functions_sdk::handler::respond("echo", "Echo failed", try_handle(&req))
//! }
//!
//! fn try_handle(req: &Request) -> Result<Response, HandlerError> {
//!     let payload: JsonValue = req.json()?;
//!     Response::try_ok(payload)
//! }
//! ```

use crate::{HandlerError, Request, Response};

/// Type alias for the handler function signature
///
/// Handlers are synchronous and stateless; the host decides where they run.
pub type HandlerFn = fn(Request) -> Response;

/// Convert the outcome of a handler's fallible core into a response.
///
/// Client errors are rendered as-is. Anything else is logged with its cause
/// and replaced by the generic internal error body carrying
/// `internal_message`.
pub fn respond(
    function: &str,
    internal_message: &str,
    result: Result<Response, HandlerError>,
) -> Response {
    match result {
        Ok(response) => response,
        Err(err) if err.is_client_error() => {
            tracing::warn!(function, status = err.status_code(), error = %err, "Rejected request");
            err.to_response()
        }
        Err(err) => {
            tracing::error!(function, error = %err, "Error processing {} request", function);
            err.to_response_with(internal_message)
        }
    }
}
