//! The request dispatcher.
//!
//! # Design
//! `Client` owns the connection configuration and the persistent header
//! mapping, and exposes one generic operation, `call`. A call is split the
//! same way the rest of the crate is: `build_request` assembles an
//! `HttpRequest` from the configuration read at that moment,
//! a `Transport` performs the round trip, and `parse_response` turns the
//! `HttpResponse` into a JSON value or a classified `FrontierError`.
//!
//! Mutators take `&mut self` and `call` takes `&self`, so a dispatcher
//! cannot be reconfigured while one of its calls is in flight. Callers that
//! need separate identities use separate `Client` values.

use std::fmt;
use std::sync::Arc;

use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use tracing::{debug, warn};
use url::Url;

use crate::config::{
    ClientConfig, SdkIdentity, HEADER_JWT, HEADER_KEY, HEADER_LOCALE, HEADER_PROJECT,
};
use crate::error::{FrontierError, Result};
use crate::http::{Headers, HttpRequest, HttpResponse, Params};
use crate::transport::{ReqwestTransport, Transport, TransportError};

/// Dispatcher for the Frontier account API.
#[derive(Clone)]
pub struct Client {
    config: ClientConfig,
    headers: Headers,
    identity: SdkIdentity,
    transport: Arc<dyn Transport>,
}

impl fmt::Debug for Client {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Client")
            .field("endpoint", &self.config.endpoint)
            .field("project", &self.config.project)
            .field("locale", &self.config.locale)
            .field("identity", &self.identity)
            .finish_non_exhaustive()
    }
}

impl Default for Client {
    fn default() -> Self {
        Self::from_config(ClientConfig::default())
    }
}

impl Client {
    pub fn new(endpoint: &str) -> Self {
        Self::from_config(ClientConfig {
            endpoint: endpoint.to_string(),
            ..ClientConfig::default()
        })
    }

    pub fn from_config(config: ClientConfig) -> Self {
        let headers = config
            .headers()
            .into_iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Self {
            config,
            headers,
            identity: SdkIdentity::default(),
            transport: Arc::new(ReqwestTransport::new()),
        }
    }

    pub fn with_transport(mut self, transport: Arc<dyn Transport>) -> Self {
        self.transport = transport;
        self
    }

    pub fn with_identity(mut self, identity: SdkIdentity) -> Self {
        self.identity = identity;
        self
    }

    // -----------------------------------------------------------------------
    // Configuration
    // -----------------------------------------------------------------------

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.config.endpoint = endpoint.into();
        self
    }

    pub fn set_project(&mut self, project: impl Into<String>) -> &mut Self {
        let project = project.into();
        self.headers.insert(HEADER_PROJECT.to_string(), project.clone());
        self.config.project = Some(project);
        self
    }

    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        let key = key.into();
        self.headers.insert(HEADER_KEY.to_string(), key.clone());
        self.config.key = Some(key);
        self
    }

    pub fn set_jwt(&mut self, jwt: impl Into<String>) -> &mut Self {
        let jwt = jwt.into();
        self.headers.insert(HEADER_JWT.to_string(), jwt.clone());
        self.config.jwt = Some(jwt);
        self
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) -> &mut Self {
        let locale = locale.into();
        self.headers.insert(HEADER_LOCALE.to_string(), locale.clone());
        self.config.locale = locale;
        self
    }

    /// Insert or replace one persistent header. The four `X-Frontier-*`
    /// names, in any letter case, go through their setters so config and
    /// headers stay in step.
    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        let name = name.into();
        let reserved = |header: &str| name.eq_ignore_ascii_case(header);
        if reserved(HEADER_PROJECT) {
            self.set_project(value)
        } else if reserved(HEADER_KEY) {
            self.set_key(value)
        } else if reserved(HEADER_JWT) {
            self.set_jwt(value)
        } else if reserved(HEADER_LOCALE) {
            self.set_locale(value)
        } else {
            self.headers.insert(name, value.into());
            self
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn endpoint(&self) -> &str {
        &self.config.endpoint
    }

    pub fn project(&self) -> Option<&str> {
        self.config.project.as_deref()
    }

    pub fn key(&self) -> Option<&str> {
        self.config.key.as_deref()
    }

    pub fn jwt(&self) -> Option<&str> {
        self.config.jwt.as_deref()
    }

    pub fn locale(&self) -> &str {
        &self.config.locale
    }

    /// The persistent header mapping (identity block excluded).
    pub fn headers(&self) -> &Headers {
        &self.headers
    }

    pub fn identity(&self) -> &SdkIdentity {
        &self.identity
    }

    // -----------------------------------------------------------------------
    // Dispatch
    // -----------------------------------------------------------------------

    /// Assemble the request for one call.
    ///
    /// GET sends every non-null parameter as a query pair in mapping order
    /// and no body. Every other method sends `params` as the JSON body and
    /// no added query. `path` is appended to the endpoint verbatim.
    pub fn build_request(
        &self,
        method: &str,
        path: &str,
        overrides: &Headers,
        params: &Params,
    ) -> Result<HttpRequest> {
        let method = method.to_uppercase();
        let target = format!("{}{}", self.config.endpoint, path);
        let mut url = Url::parse(&target)
            .map_err(|e| FrontierError::validation(format!("invalid request URL `{target}`: {e}")))?;

        let body = if method == "GET" {
            let mut present = params.iter().filter(|(_, v)| !v.is_null()).peekable();
            if present.peek().is_some() {
                let mut pairs = url.query_pairs_mut();
                for (key, value) in present {
                    pairs.append_pair(key, &query_value(value));
                }
            }
            None
        } else {
            let body = serde_json::to_string(params)
                .map_err(|e| FrontierError::new(format!("failed to encode request body: {e}")))?;
            Some(body)
        };

        Ok(HttpRequest {
            method,
            url: url.to_string(),
            headers: self.merged_headers(overrides),
            body,
        })
    }

    /// Normalize a response: the decoded body on 2xx, a classified error
    /// otherwise. A body that is empty or not JSON decodes as `{}`.
    pub fn parse_response(&self, response: HttpResponse) -> Result<Value> {
        let data = decode_body(&response.body);
        if response.is_success() {
            Ok(data)
        } else {
            Err(FrontierError::from_status(response.status, &response.status_text, data))
        }
    }

    /// Send one request and return the decoded JSON body.
    pub async fn call(
        &self,
        method: &str,
        path: &str,
        overrides: &Headers,
        params: &Params,
    ) -> Result<Value> {
        let request = self.build_request(method, path, overrides, params)?;
        debug!(method = %request.method, url = %request.url, "dispatching request");

        let response = self.transport.execute(request).await.map_err(|e| {
            warn!(error = %e, "transport failure");
            let message = e.to_string();
            match e {
                TransportError::InvalidRequest(_) => FrontierError::validation(message),
                TransportError::Http(_) | TransportError::Other(_) => FrontierError::network(message),
            }
        })?;
        debug!(status = response.status, "received response");

        self.parse_response(response)
    }

    /// `call`, then decode the body into `T`. A body that does not fit `T`
    /// is a validation failure carrying the body as its response.
    pub async fn call_as<T: DeserializeOwned>(
        &self,
        method: &str,
        path: &str,
        overrides: &Headers,
        params: &Params,
    ) -> Result<T> {
        let value = self.call(method, path, overrides, params).await?;
        decode(value)
    }

    /// Identity block, then persistent headers, then config-derived
    /// headers, then per-call overrides. A later entry replaces every
    /// earlier one whose name differs only in letter case.
    fn merged_headers(&self, overrides: &Headers) -> Vec<(String, String)> {
        let mut merged = Vec::new();
        for (name, value) in self.identity.headers() {
            replace_header(&mut merged, name, value);
        }
        for (name, value) in &self.headers {
            replace_header(&mut merged, name, value);
        }
        for (name, value) in self.config.headers() {
            replace_header(&mut merged, name, value);
        }
        for (name, value) in overrides {
            replace_header(&mut merged, name, value);
        }
        merged
    }
}

fn replace_header(headers: &mut Vec<(String, String)>, name: &str, value: &str) {
    headers.retain(|(k, _)| !k.eq_ignore_ascii_case(name));
    headers.push((name.to_string(), value.to_string()));
}

pub(crate) fn decode<T: DeserializeOwned>(value: Value) -> Result<T> {
    let decoded = T::deserialize(&value);
    match decoded {
        Ok(decoded) => Ok(decoded),
        Err(e) => Err(FrontierError::validation(format!("unexpected response shape: {e}")).with_response(value)),
    }
}

fn decode_body(body: &str) -> Value {
    match serde_json::from_str(body) {
        Ok(value) => value,
        Err(e) => {
            if !body.is_empty() {
                warn!(error = %e, "response body is not JSON, using empty object");
            }
            Value::Object(Map::new())
        }
    }
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
