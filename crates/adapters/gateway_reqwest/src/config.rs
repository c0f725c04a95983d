//! Gateway connection configuration.

use serde::Deserialize;

/// Configuration for the energy gateway.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct GatewayConfig {
    /// Identifier the gateway's records are published under.
    pub id: String,
    /// Root URL of the gateway, without the `/api` suffix.
    pub base_url: String,
    /// Upper bound for a single read, in seconds.
    pub timeout_secs: u64,
    /// Accept the self-signed certificate the gateway ships with.
    pub accept_invalid_certs: bool,
}

impl Default for GatewayConfig {
    fn default() -> Self {
        Self {
            id: String::new(),
            base_url: "https://192.168.91.1".to_string(),
            timeout_secs: 90,
            accept_invalid_certs: true,
        }
    }
}
