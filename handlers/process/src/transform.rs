//! The data transform behind the process endpoint

use edge_functions_sdk::timestamp::utc_timestamp;
use edge_functions_sdk::HandlerError;
use serde_json::{json, Map, Number, Value};
use thiserror::Error;

/// Version tag reported in `processing_info`.
pub const PROCESSING_VERSION: &str = "1.0";

/// Prefix applied to every transformed key.
pub const KEY_PREFIX: &str = "processed_";

/// Key holding the transform metadata in the output.
pub const INFO_KEY: &str = "processing_info";

#[derive(Error, Debug)]
pub enum TransformError {
    #[error("Doubling the number under '{key}' leaves the JSON number range")]
    NumberOutOfRange { key: String },
}

impl From<TransformError> for HandlerError {
    fn from(err: TransformError) -> Self {
        HandlerError::Internal(err.to_string())
    }
}

/// Transform every entry of `input`.
///
/// Each key `k` becomes `processed_k`, in input order, with its value
/// transformed by type: strings uppercased, numbers doubled, string elements
/// of arrays uppercased, anything else unchanged. A `processing_info` entry
/// follows with the time, the original keys and [`PROCESSING_VERSION`].
///
/// Not idempotent: applying it twice doubles numbers twice and prefixes keys
/// twice.
pub fn transform(input: &Map<String, Value>) -> Result<Map<String, Value>, TransformError> {
    let mut output = Map::with_capacity(input.len() + 1);

    for (key, value) in input {
        let processed = match value {
            Value::String(s) => Value::String(s.to_uppercase()),
            Value::Number(n) => Value::Number(
                double(n).ok_or_else(|| TransformError::NumberOutOfRange { key: key.clone() })?,
            ),
            Value::Array(items) => Value::Array(items.iter().map(uppercase_if_string).collect()),
            other => other.clone(),
        };
        output.insert(format!("{}{}", KEY_PREFIX, key), processed);
    }

    output.insert(
        INFO_KEY.to_string(),
        json!({
            "processed_at": utc_timestamp(),
            "original_keys": input.keys().collect::<Vec<_>>(),
            "processing_version": PROCESSING_VERSION,
        }),
    );

    Ok(output)
}

fn uppercase_if_string(item: &Value) -> Value {
    match item {
        Value::String(s) => Value::String(s.to_uppercase()),
        other => other.clone(),
    }
}

/// Double a number, keeping integers integral while they fit and falling
/// back to floating point when they don't. `None` if the result is not finite.
fn double(n: &Number) -> Option<Number> {
    if let Some(doubled) = n.as_i64().and_then(|i| i.checked_mul(2)) {
        return Some(doubled.into());
    }
    if let Some(doubled) = n.as_u64().and_then(|u| u.checked_mul(2)) {
        return Some(doubled.into());
    }
    n.as_f64().and_then(|f| Number::from_f64(f * 2.0))
}
