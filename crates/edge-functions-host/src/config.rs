//! Host configuration

use std::env;

/// Host configuration loaded from environment variables
#[derive(Debug, Clone)]
pub struct HostConfig {
    /// Address to bind the HTTP listener to
    pub bind_addr: String,

    /// Port for function requests
    pub port: u16,

    /// Path prefix in front of every function name, e.g. "/api"
    pub route_prefix: String,

    /// Largest request body passed to a handler
    pub max_body_bytes: usize,
}

impl HostConfig {
    /// Load configuration from environment variables
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Load configuration from an arbitrary variable source
    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        Self {
            bind_addr: lookup("EDGE_FUNCTIONS_BIND_ADDR")
                .unwrap_or_else(|| "0.0.0.0".to_string()),

            port: lookup("EDGE_FUNCTIONS_PORT")
                .and_then(|s| s.parse().ok())
                .unwrap_or(7071),

            route_prefix: normalize_prefix(
                &lookup("EDGE_FUNCTIONS_ROUTE_PREFIX").unwrap_or_else(|| "/api".to_string()),
            ),

            max_body_bytes: lookup("EDGE_FUNCTIONS_MAX_BODY_BYTES")
                .and_then(|s| s.parse().ok())
                .unwrap_or(1024 * 1024),
        }
    }

    /// Socket address string for the listener
    pub fn listen_addr(&self) -> String {
        format!("{}:{}", self.bind_addr, self.port)
    }
}

impl Default for HostConfig {
    fn default() -> Self {
        Self::from_lookup(|_| None)
    }
}

/// Leading slash, no trailing slash; an empty or "/" prefix means none.
fn normalize_prefix(raw: &str) -> String {
    let trimmed = raw.trim().trim_matches('/');
    if trimmed.is_empty() {
        String::new()
    } else {
        format!("/{}", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config_from(vars: &[(&str, &str)]) -> HostConfig {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        HostConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_defaults() {
        let config = HostConfig::default();
        assert_eq!(config.listen_addr(), "0.0.0.0:7071");
        assert_eq!(config.route_prefix, "/api");
        assert_eq!(config.max_body_bytes, 1024 * 1024);
    }

    #[test]
    fn test_overrides() {
        let config = config_from(&[
            ("EDGE_FUNCTIONS_BIND_ADDR", "127.0.0.1"),
            ("EDGE_FUNCTIONS_PORT", "9000"),
            ("EDGE_FUNCTIONS_ROUTE_PREFIX", "fn/"),
            ("EDGE_FUNCTIONS_MAX_BODY_BYTES", "64"),
        ]);
        assert_eq!(config.listen_addr(), "127.0.0.1:9000");
        assert_eq!(config.route_prefix, "/fn");
        assert_eq!(config.max_body_bytes, 64);
    }

    #[test]
    fn test_unparseable_values_fall_back() {
        let config = config_from(&[("EDGE_FUNCTIONS_PORT", "eighty")]);
        assert_eq!(config.port, 7071);
    }

    #[test]
    fn test_prefix_normalization() {
        assert_eq!(normalize_prefix("/"), "");
        assert_eq!(normalize_prefix(""), "");
        assert_eq!(normalize_prefix("/api/"), "/api");
        assert_eq!(normalize_prefix("v1/functions"), "/v1/functions");
    }
}
