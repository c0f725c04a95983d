//! Gateway adapter error types.

use wattbridge_domain::error::ReadError;

/// Errors specific to the reqwest gateway adapter.
#[derive(Debug, thiserror::Error)]
pub enum GatewayHttpError {
    /// The configured base URL cannot be parsed or cannot carry a path.
    #[error("invalid gateway URL: {0}")]
    InvalidUrl(String),

    /// The HTTP client could not be built (TLS backend, options).
    #[error("failed to build HTTP client")]
    Client(#[source] reqwest::Error),

    /// No response was received: connect failure, TLS failure or timeout.
    #[error("request failed")]
    Request(#[source] reqwest::Error),

    /// The gateway answered with a non-success status.
    #[error("gateway answered HTTP {0}")]
    Status(u16),
}

impl GatewayHttpError {
    /// Convert into a [`ReadError`] for the gateway `path` that was read.
    pub fn into_read_error(self, path: &str) -> ReadError {
        match self {
            Self::Status(status) => ReadError::Remote {
                path: path.to_string(),
                status,
            },
            other => ReadError::Transport {
                path: path.to_string(),
                source: Box::new(other),
            },
        }
    }
}
