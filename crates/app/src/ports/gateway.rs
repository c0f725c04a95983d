//! Gateway port — raw read access to the vendor device API.

use std::future::Future;

use wattbridge_domain::error::ReadError;

/// Performs one read against the gateway API.
///
/// Implementations are responsible for bounding every call with a timeout
/// and for mapping connection failures to [`ReadError::Transport`] and
/// non-success statuses to [`ReadError::Remote`]. Decoding the body is
/// left to the caller.
pub trait GatewayTransport: Send + Sync {
    /// Read the resource at `path` (e.g. `"meters/aggregates"`) and return
    /// the raw response body.
    fn get(&self, path: &str) -> impl Future<Output = Result<String, ReadError>> + Send;
}

impl<T: GatewayTransport> GatewayTransport for std::sync::Arc<T> {
    fn get(&self, path: &str) -> impl Future<Output = Result<String, ReadError>> + Send {
        (**self).get(path)
    }
}
