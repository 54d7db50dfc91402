use edge_functions_sdk::handler::respond;
use edge_functions_sdk::prelude::*;
use serde_json::Map;

use crate::transform::transform;

pub const FUNCTION_NAME: &str = "process";

const INTERNAL_ERROR_MESSAGE: &str = "An error occurred while processing your data";

/// Success body
#[derive(Debug, Serialize, Deserialize)]
pub struct ProcessResponse {
    pub message: String,
    pub timestamp: String,
    pub function: String,
    pub status: String,
    /// Character length of the request body as received
    pub input_size: usize,
    pub processed_data: Map<String, JsonValue>,
}

/// Handle a transform request.
///
/// Only `POST` with a non-blank JSON object body succeeds; everything else
/// gets a structured 4xx, and any failure past validation a generic 500.
pub fn handle(req: Request) -> Response {
    tracing::info!(request_id = %req.request_id, "HTTP trigger function processed a request for process endpoint");
    respond(FUNCTION_NAME, INTERNAL_ERROR_MESSAGE, process(&req))
}

fn process(req: &Request) -> Result<Response, HandlerError> {
    if !req.is_method("POST") {
        return Err(HandlerError::MethodNotAllowed(
            "This endpoint only accepts POST requests".to_string(),
        ));
    }

    let body: JsonValue = req.json().map_err(|err| {
        if let HandlerError::InvalidJson(source) = &err {
            tracing::error!(error = %source, "Invalid JSON in request body");
        }
        err
    })?;

    if is_blank(&body) {
        return Err(HandlerError::EmptyBody);
    }

    let input = body.as_object().ok_or_else(|| {
        HandlerError::Internal("Request body is not a JSON object".to_string())
    })?;

    let processed_data = transform(input)?;

    let response = ProcessResponse {
        message: "Data processed successfully".to_string(),
        timestamp: utc_timestamp(),
        function: FUNCTION_NAME.to_string(),
        status: "success".to_string(),
        input_size: req.body.as_deref().map(|b| b.chars().count()).unwrap_or(0),
        processed_data,
    };

    tracing::info!(keys = input.len(), "Successfully processed data request");
    Ok(Response::try_ok(response)?.no_cache())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn post(body: &str) -> Request {
        Request::new("POST", "/api/process").with_body(body)
    }

    #[test]
    fn test_successful_transform() {
        let response = handle(post(r#"{"a": "x", "b": 3, "c": ["y", 2]}"#));
        assert_eq!(response.status, 200);
        assert_eq!(response.header("Cache-Control").unwrap(), "no-cache");

        let body: ProcessResponse = response.body_json().unwrap();
        assert_eq!(body.message, "Data processed successfully");
        assert_eq!(body.function, "process");
        assert_eq!(body.status, "success");
        assert_eq!(body.input_size, 33);
        assert_eq!(body.processed_data["processed_a"], json!("X"));
        assert_eq!(body.processed_data["processed_b"], json!(6));
        assert_eq!(body.processed_data["processed_c"], json!(["Y", 2]));
        assert_eq!(
            body.processed_data["processing_info"]["original_keys"],
            json!(["a", "b", "c"])
        );
    }

    #[test]
    fn test_input_size_counts_characters_of_raw_body() {
        let compact: ProcessResponse = handle(post(r#"{"k":"é"}"#)).body_json().unwrap();
        assert_eq!(compact.input_size, 9);

        let spaced: ProcessResponse = handle(post(r#"{ "k" : "é" }"#)).body_json().unwrap();
        assert_eq!(spaced.input_size, 13);
    }

    #[test]
    fn test_non_post_methods_are_rejected() {
        for method in ["GET", "PUT", "DELETE", "PATCH", "HEAD", "OPTIONS"] {
            let req = Request::new(method, "/api/process").with_body(r#"{"a": 1}"#);
            let response = handle(req);
            assert_eq!(response.status, 405, "method {}", method);

            let body: ErrorBody = response.body_json().unwrap();
            assert_eq!(body.error, "Method not allowed");
            assert_eq!(body.message, "This endpoint only accepts POST requests");
            assert!(response.header("Cache-Control").is_none());
        }
    }

    #[test]
    fn test_lowercase_post_is_accepted() {
        let req = Request::new("post", "/api/process").with_body(r#"{"a": 1}"#);
        assert_eq!(handle(req).status, 200);
    }

    #[test]
    fn test_malformed_json() {
        let response = handle(post(r#"{"a": "#));
        assert_eq!(response.status, 400);

        let body: ErrorBody = response.body_json().unwrap();
        assert_eq!(body.error, "Bad request");
        assert_eq!(body.message, "Invalid JSON format");
        assert!(body.timestamp.ends_with('Z'));
    }

    #[test]
    fn test_missing_body_is_malformed() {
        let response = handle(Request::new("POST", "/api/process"));
        assert_eq!(response.status, 400);
        let body: ErrorBody = response.body_json().unwrap();
        assert_eq!(body.message, "Invalid JSON format");
    }

    #[test]
    fn test_blank_bodies_are_rejected() {
        for raw in ["{}", "[]", "0", "false", "null", "\"\""] {
            let response = handle(post(raw));
            assert_eq!(response.status, 400, "body {}", raw);

            let body: ErrorBody = response.body_json().unwrap();
            assert_eq!(body.error, "Bad request");
            assert_eq!(body.message, "Request body must contain valid JSON");
        }
    }

    #[test]
    fn test_non_object_body_is_internal_error() {
        for raw in ["[1, 2]", "\"text\"", "7", "true"] {
            let response = handle(post(raw));
            assert_eq!(response.status, 500, "body {}", raw);

            let body: ErrorBody = response.body_json().unwrap();
            assert_eq!(body.error, "Internal server error");
            assert_eq!(body.message, "An error occurred while processing your data");
            assert_eq!(body.status.as_deref(), Some("error"));
        }
    }

    #[test]
    fn test_transform_failure_is_internal_error() {
        let response = handle(post(r#"{"x": 1.7976931348623157e308}"#));
        assert_eq!(response.status, 500);
        let body: JsonValue = response.body_json().unwrap();
        assert!(body.get("processed_data").is_none());
    }

    #[test]
    fn test_processed_at_is_a_utc_timestamp() {
        let body: ProcessResponse = handle(post(r#"{"k": "v"}"#)).body_json().unwrap();
        let processed_at = body.processed_data["processing_info"]["processed_at"]
            .as_str()
            .unwrap()
            .to_string();
        assert!(processed_at.ends_with('Z'));
        assert!(chrono::DateTime::parse_from_rfc3339(&processed_at).is_ok());
    }
}
