//! Transform handler: accepts a JSON object over POST and returns it with
//! strings uppercased and numbers doubled.

mod handler;
pub mod transform;

pub use handler::{handle, ProcessResponse, FUNCTION_NAME};
pub use transform::{transform, TransformError, PROCESSING_VERSION};
