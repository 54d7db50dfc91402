//! Transform handler served over stdin/stdout
edge_functions_sdk::handler_loop!(process_function::handle);
