//! Connection configuration and SDK identification.
//!
//! # Design
//! `ClientConfig` is the mutable part: endpoint, project, credentials and
//! locale. It derives `Deserialize` with defaults so a host can load it
//! from whatever format it already uses. `SdkIdentity` is fixed once when
//! a `Client` is built and never changes afterwards.

use serde::{Deserialize, Serialize};

pub const HEADER_PROJECT: &str = "X-Frontier-Project";
pub const HEADER_KEY: &str = "X-Frontier-Key";
pub const HEADER_JWT: &str = "X-Frontier-JWT";
pub const HEADER_LOCALE: &str = "X-Frontier-Locale";

pub const DEFAULT_ENDPOINT: &str = "http://localhost:8000";
pub const DEFAULT_LOCALE: &str = "en";

/// Persistent connection settings read by every call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ClientConfig {
    /// Base URL. Paths are appended verbatim, so a trailing slash here
    /// produces a double slash on the wire.
    pub endpoint: String,
    pub project: Option<String>,
    pub key: Option<String>,
    pub jwt: Option<String>,
    pub locale: String,
}

impl Default for ClientConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            project: None,
            key: None,
            jwt: None,
            locale: DEFAULT_LOCALE.to_string(),
        }
    }
}

impl ClientConfig {
    /// Headers derived from the current settings. Unset credentials
    /// produce no header; the locale is always sent.
    pub fn headers(&self) -> Vec<(&'static str, &str)> {
        let mut headers = Vec::with_capacity(4);
        if let Some(project) = &self.project {
            headers.push((HEADER_PROJECT, project.as_str()));
        }
        if let Some(key) = &self.key {
            headers.push((HEADER_KEY, key.as_str()));
        }
        if let Some(jwt) = &self.jwt {
            headers.push((HEADER_JWT, jwt.as_str()));
        }
        headers.push((HEADER_LOCALE, self.locale.as_str()));
        headers
    }
}

/// Static identification sent with every request.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SdkIdentity {
    pub name: String,
    pub platform: String,
    pub language: String,
    pub version: String,
}

impl Default for SdkIdentity {
    fn default() -> Self {
        Self {
            name: "Frontier".to_string(),
            platform: "client".to_string(),
            language: "rust".to_string(),
            version: env!("CARGO_PKG_VERSION").to_string(),
        }
    }
}

impl SdkIdentity {
    /// The fixed header block, content type included.
    pub fn headers(&self) -> [(&'static str, &str); 5] {
        [
            ("content-type", "application/json"),
            ("x-sdk-name", self.name.as_str()),
            ("x-sdk-platform", self.platform.as_str()),
            ("x-sdk-language", self.language.as_str()),
            ("x-sdk-version", self.version.as_str()),
        ]
    }
}
