//! Greeting handler served over stdin/stdout
edge_functions_sdk::handler_loop!(hello_function::handle);
