//! Host router - turns HTTP requests into handler invocations
//!
//! Each request to `{prefix}/{function}` becomes an SDK [`Request`], runs on
//! the blocking pool, and its SDK [`Response`] is written back verbatim.
//!
//! [`Request`]: edge_functions_sdk::Request
//! [`Response`]: edge_functions_sdk::Response

use axum::{
    body::Body,
    extract::{Path, State},
    http::{HeaderValue, Request, StatusCode},
    response::{IntoResponse, Response},
    routing::{any, get},
    Router,
};
use edge_functions_sdk::error::DEFAULT_INTERNAL_MESSAGE;
use edge_functions_sdk::HandlerError;
use std::collections::HashMap;
use std::sync::Arc;
use uuid::Uuid;

use crate::HostState;

/// Header carrying the id assigned to each invocation
pub const REQUEST_ID_HEADER: &str = "x-request-id";

/// Create the router that serves every registered function
pub fn create_router(state: Arc<HostState>) -> Router {
    let function_route = format!("{}/{{function}}", state.config.route_prefix);

    Router::new()
        .route("/health", get(health_check))
        .route(&function_route, any(invoke_function))
        .fallback(no_route)
        .with_state(state)
}

/// Health check endpoint for the host
async fn health_check() -> impl IntoResponse {
    (StatusCode::OK, "OK")
}

async fn no_route(request: Request<Body>) -> Response {
    let message = format!("No route for {}", request.uri().path());
    into_http_response(edge_functions_sdk::Response::not_found(message), None)
}

/// Invoke a registered function with the incoming request
async fn invoke_function(
    State(state): State<Arc<HostState>>,
    Path(function): Path<String>,
    request: Request<Body>,
) -> Response {
    let request_id = Uuid::new_v4().to_string();
    let method = request.method().to_string();
    let path = request.uri().path().to_string();

    tracing::debug!(
        request_id = %request_id,
        function = %function,
        method = %method,
        path = %path,
        "Incoming request"
    );

    let Some(handler) = state.functions.get(&function) else {
        tracing::debug!(request_id = %request_id, "No function named {}", function);
        let response = edge_functions_sdk::Response::not_found(format!("No function named '{}'", function));
        return into_http_response(response, Some(&request_id));
    };

    let query: HashMap<String, String> = request
        .uri()
        .query()
        .map(|q| {
            url::form_urlencoded::parse(q.as_bytes())
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect()
        })
        .unwrap_or_default();

    let headers: HashMap<String, String> = request
        .headers()
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_str().unwrap_or("").to_string()))
        .collect();

    let body_bytes = match axum::body::to_bytes(request.into_body(), state.config.max_body_bytes).await {
        Ok(b) => b,
        Err(e) => {
            let response = if is_length_limit(e) {
                tracing::warn!(request_id = %request_id, limit = state.config.max_body_bytes, "Request body too large");
                edge_functions_sdk::Response::payload_too_large(format!(
                    "Request body exceeds {} bytes",
                    state.config.max_body_bytes
                ))
            } else {
                tracing::warn!(request_id = %request_id, "Failed to read request body");
                HandlerError::BadRequest("Failed to read request body".to_string()).to_response()
            };
            return into_http_response(response, Some(&request_id));
        }
    };

    let sdk_request = edge_functions_sdk::Request {
        method,
        path,
        query,
        headers,
        body: None,
        body_invalid_utf8: false,
        request_id: request_id.clone(),
    }
    .with_body_bytes(&body_bytes);

    let sdk_response = match tokio::task::spawn_blocking(move || handler(sdk_request)).await {
        Ok(response) => response,
        Err(e) => {
            tracing::error!(request_id = %request_id, function = %function, "Handler failed: {}", e);
            edge_functions_sdk::Response::internal_error(DEFAULT_INTERNAL_MESSAGE)
        }
    };

    tracing::debug!(request_id = %request_id, status = sdk_response.status, "Function completed");
    into_http_response(sdk_response, Some(&request_id))
}

fn is_length_limit(err: axum::Error) -> bool {
    err.into_inner()
        .downcast_ref::<http_body_util::LengthLimitError>()
        .is_some()
}

/// Convert an SDK response into an HTTP response
fn into_http_response(sdk_response: edge_functions_sdk::Response, request_id: Option<&str>) -> Response {
    let mut builder = Response::builder()
        .status(StatusCode::from_u16(sdk_response.status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR));

    for (key, value) in &sdk_response.headers {
        builder = builder.header(key, value);
    }

    if let Some(id) = request_id.and_then(|id| HeaderValue::from_str(id).ok()) {
        builder = builder.header(REQUEST_ID_HEADER, id);
    }

    match builder.body(Body::from(sdk_response.body.unwrap_or_default())) {
        Ok(response) => response,
        Err(_) => (StatusCode::INTERNAL_SERVER_ERROR, "Failed to build response").into_response(),
    }
}
