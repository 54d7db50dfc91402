use edge_functions_sdk::error::DEFAULT_INTERNAL_MESSAGE;
use edge_functions_sdk::handler::respond;
use edge_functions_sdk::prelude::*;

pub const FUNCTION_NAME: &str = "hello";

/// Name used when the request supplies none.
pub const DEFAULT_NAME: &str = "World";

/// Success body
#[derive(Debug, Serialize, Deserialize)]
pub struct Greeting {
    pub message: String,
    pub timestamp: String,
    pub function: String,
    pub status: String,
}

/// Handle a greeting request. Always 200 unless something unexpected fails.
pub fn handle(req: Request) -> Response {
    tracing::info!(request_id = %req.request_id, "HTTP trigger function processed a request for hello endpoint");
    respond(FUNCTION_NAME, DEFAULT_INTERNAL_MESSAGE, greet(&req))
}

fn greet(req: &Request) -> Result<Response, HandlerError> {
    let name = resolve_name(req);

    let greeting = Greeting {
        message: format!("Hello, {}!", name),
        timestamp: utc_timestamp(),
        function: FUNCTION_NAME.to_string(),
        status: "success".to_string(),
    };

    tracing::info!(name = %name, "Successfully processed hello request");
    Ok(Response::try_ok(greeting)?.no_cache())
}

/// Pick the name to greet: query `name`, then body field `name`, then
/// [`DEFAULT_NAME`]. Empty and blank values count as missing, and a body that
/// is not a JSON object is ignored.
pub fn resolve_name(req: &Request) -> String {
    if let Some(name) = req.query_param("name").filter(|n| !n.is_empty()) {
        return name.clone();
    }

    let from_body = req
        .json::<JsonValue>()
        .ok()
        .and_then(|body| body.get("name").cloned())
        .filter(|name| !is_blank(name));

    match from_body {
        Some(name) => render_value(&name),
        None => DEFAULT_NAME.to_string(),
    }
}
