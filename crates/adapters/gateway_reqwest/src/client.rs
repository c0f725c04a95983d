//! reqwest-backed [`GatewayTransport`].

use std::error::Error;
use std::time::Duration;

use url::Url;

use wattbridge_app::ports::GatewayTransport;
use wattbridge_domain::error::ReadError;

use crate::config::GatewayConfig;
use crate::error::GatewayHttpError;

/// HTTPS client for the gateway's `/api` tree.
#[derive(Debug, Clone)]
pub struct ReqwestGateway {
    http: reqwest::Client,
    base_url: Url,
}

impl ReqwestGateway {
    /// Build a client honoring the configured timeout and certificate policy.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayHttpError::InvalidUrl`] for an unusable base URL and
    /// [`GatewayHttpError::Client`] when the TLS backend cannot be set up.
    pub fn from_config(config: &GatewayConfig) -> Result<Self, GatewayHttpError> {
        let http = reqwest::Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .build()
            .map_err(GatewayHttpError::Client)?;
        let base_url = Url::parse(&config.base_url)
            .map_err(|err| GatewayHttpError::InvalidUrl(format!("{}: {err}", config.base_url)))?;
        Self::with_client(http, base_url)
    }

    /// Wrap an existing client.
    ///
    /// # Errors
    ///
    /// Returns [`GatewayHttpError::InvalidUrl`] when `base_url` cannot carry
    /// a path (e.g. `mailto:`).
    pub fn with_client(http: reqwest::Client, mut base_url: Url) -> Result<Self, GatewayHttpError> {
        if base_url.cannot_be_a_base() {
            return Err(GatewayHttpError::InvalidUrl(base_url.to_string()));
        }
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { http, base_url })
    }

    /// Absolute URL of an API path.
    fn endpoint(&self, path: &str) -> Result<Url, GatewayHttpError> {
        self.base_url
            .join(&format!("api/{path}"))
            .map_err(|err| GatewayHttpError::InvalidUrl(format!("api/{path}: {err}")))
    }

    async fn fetch(&self, path: &str) -> Result<String, GatewayHttpError> {
        let url = self.endpoint(path)?;
        tracing::trace!(%url, "GET");

        let response = self
            .http
            .get(url)
            .send()
            .await
            .map_err(GatewayHttpError::Request)?;

        let status = response.status();
        if !status.is_success() {
            return Err(GatewayHttpError::Status(status.as_u16()));
        }
        response.text().await.map_err(GatewayHttpError::Request)
    }
}

impl GatewayTransport for ReqwestGateway {
    async fn get(&self, path: &str) -> Result<String, ReadError> {
        self.fetch(path).await.map_err(|err| {
            tracing::debug!(error = &err as &dyn Error, path, "gateway read failed");
            err.into_read_error(path)
        })
    }
}
