//! The single I/O seam between the dispatcher and the network.
//!
//! # Design
//! `Transport` takes a fully built `HttpRequest` and hands back the raw
//! `HttpResponse`. Non-2xx statuses are data, not errors; only faults that
//! prevent a response from arriving at all become `TransportError`.
//! Timeouts, redirects and TLS are whatever the underlying client does.

use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::Method;
use thiserror::Error;

use crate::http::{HttpRequest, HttpResponse};

/// Failure to obtain any response.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// The request could not be expressed on the wire (bad method token,
    /// malformed header).
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    /// Any other fault from a host-provided `Transport`.
    #[error("transport error: {0}")]
    Other(String),
}

/// Executes one HTTP round trip.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// `Transport` backed by `reqwest`.
#[derive(Debug, Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Use a preconfigured client (timeouts, proxies, root certificates).
    pub fn with_client(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = Method::from_bytes(request.method.as_bytes())
            .map_err(|_| TransportError::InvalidRequest(format!("method `{}`", request.method)))?;

        let mut builder = self
            .client
            .request(method, &request.url)
            .headers(header_map(&request.headers)?);
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder.send().await.map_err(|e| {
            if e.is_builder() {
                TransportError::InvalidRequest(e.to_string())
            } else {
                TransportError::Http(e)
            }
        })?;

        let status = response.status();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(k, v)| v.to_str().ok().map(|v| (k.to_string(), v.to_string())))
            .collect();
        let body = response.text().await?;

        Ok(HttpResponse {
            status: status.as_u16(),
            status_text: status.canonical_reason().unwrap_or_default().to_string(),
            headers,
            body,
        })
    }
}

/// One wire value per header name. `HeaderMap::insert` replaces, so a later
/// entry wins over an earlier one spelled in a different case.
fn header_map(headers: &[(String, String)]) -> Result<HeaderMap, TransportError> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| TransportError::InvalidRequest(format!("header name `{name}`")))?;
        let value = HeaderValue::from_str(value)
            .map_err(|_| TransportError::InvalidRequest(format!("value of header `{name}`")))?;
        map.insert(name, value);
    }
    Ok(map)
}
