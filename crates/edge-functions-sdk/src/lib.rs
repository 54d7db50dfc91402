//! Edge Functions SDK - Types and utilities for writing edge function handlers
//!
//! This crate provides the core types that handlers use to talk to whatever
//! hosts them: the local function host (in-process) or a platform driving the
//! standalone handler binaries over the IPC protocol.

pub mod request;
pub mod response;
pub mod error;
pub mod handler;
pub mod ipc;
pub mod timestamp;
pub mod value;

pub mod prelude {
    //! Common imports for edge function handlers
    pub use crate::request::Request;
    pub use crate::response::{ErrorBody, Response};
    pub use crate::error::HandlerError;
    pub use crate::handler::HandlerFn;
    pub use crate::timestamp::utc_timestamp;
    pub use crate::value::{is_blank, render_value};
    pub use serde::{Deserialize, Serialize};
    pub use serde_json::{json, Value as JsonValue};
}

// Re-export key types at crate root
pub use request::Request;
pub use response::Response;
pub use error::HandlerError;
pub use handler::HandlerFn;
