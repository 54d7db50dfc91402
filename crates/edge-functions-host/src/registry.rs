//! Registry of the functions this host can invoke

use std::collections::HashMap;

use edge_functions_sdk::HandlerFn;

/// Maps function names (the last path segment) to handlers
#[derive(Debug, Clone, Default)]
pub struct FunctionRegistry {
    functions: HashMap<String, HandlerFn>,
}

impl FunctionRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// The `hello` and `process` functions
    pub fn builtin() -> Self {
        Self::new()
            .with_function(hello_function::FUNCTION_NAME, hello_function::handle)
            .with_function(process_function::FUNCTION_NAME, process_function::handle)
    }

    /// Register a handler under `name` (builder pattern)
    pub fn with_function(mut self, name: impl Into<String>, handler: HandlerFn) -> Self {
        self.functions.insert(name.into(), handler);
        self
    }

    pub fn get(&self, name: &str) -> Option<HandlerFn> {
        self.functions.get(name).copied()
    }

    /// Registered names, sorted
    pub fn names(&self) -> Vec<&str> {
        let mut names: Vec<&str> = self.functions.keys().map(String::as_str).collect();
        names.sort_unstable();
        names
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use edge_functions_sdk::{Request, Response};

    fn teapot(_req: Request) -> Response {
        Response::error(418, "Teapot", "short and stout")
    }

    #[test]
    fn test_builtin_functions() {
        let registry = FunctionRegistry::builtin();
        assert_eq!(registry.names(), ["hello", "process"]);
        assert!(registry.get("hello").is_some());
        assert!(registry.get("missing").is_none());
    }

    #[test]
    fn test_custom_function() {
        let registry = FunctionRegistry::new().with_function("teapot", teapot);
        let handler = registry.get("teapot").unwrap();
        assert_eq!(handler(Request::default()).status, 418);
    }
}
