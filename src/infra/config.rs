//! Centralized configuration (environment variables + defaults).

use std::time::Duration;

pub const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;
pub const DEFAULT_BIND_ADDR: &str = "0.0.0.0:8000";

/// Base URL of the clientes service (`CLIENTES_API_BASE_URL`).
///
/// The `/api/clientes/` paths are joined onto it.
pub fn api_base_url() -> String {
    std::env::var("CLIENTES_API_BASE_URL")
        .ok()
        .filter(|v| !v.trim().is_empty())
        .unwrap_or_else(|| DEFAULT_BASE_URL.to_string())
}

/// Per-request timeout in seconds (`CLIENTES_HTTP_TIMEOUT_SECS`). `0` disables it.
pub fn http_timeout_secs() -> u64 {
    parse_or("CLIENTES_HTTP_TIMEOUT_SECS", DEFAULT_TIMEOUT_SECS)
}

/// Listen address of the reference service (`API_SERVER_BIND`).
pub fn api_server_bind() -> String {
    std::env::var("API_SERVER_BIND").unwrap_or_else(|_| DEFAULT_BIND_ADDR.to_string())
}

/// Whether the reference service starts with sample records (`API_SERVER_SEED=true`).
pub fn api_server_seed() -> bool {
    std::env::var("API_SERVER_SEED").unwrap_or_default() == "true"
}

fn parse_or(key: &str, default: u64) -> u64 {
    match std::env::var(key) {
        Ok(v) => v.trim().parse::<u64>().unwrap_or_else(|_| {
            tracing::warn!(key, value = %v, default, "invalid number, using default");
            default
        }),
        Err(_) => default,
    }
}

/// Everything the HTTP gateway needs to reach the service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    pub base_url: String,
    pub timeout: Option<Duration>,
}

impl ClientConfig {
    pub fn new(base_url: impl Into<String>) -> Self {
        Self {
            base_url: base_url.into(),
            timeout: Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS)),
        }
    }

    pub fn from_env() -> Self {
        let secs = http_timeout_secs();
        Self {
            base_url: api_base_url(),
            timeout: (secs > 0).then(|| Duration::from_secs(secs)),
        }
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self::new(DEFAULT_BASE_URL)
    }
}
