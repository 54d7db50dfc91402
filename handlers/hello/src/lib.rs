//! Greeting handler: `Hello, {name}!` with the name taken from the query
//! string, the JSON body, or a default.

mod handler;

pub use handler::{handle, resolve_name, Greeting, DEFAULT_NAME, FUNCTION_NAME};
