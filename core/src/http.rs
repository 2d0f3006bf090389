//! HTTP request and response types as plain data.
//!
//! # Design
//! The dispatcher builds an `HttpRequest` and parses an `HttpResponse`
//! without touching the network; a `Transport` performs the one round trip
//! in between. Keeping both ends as owned data makes request assembly and
//! response classification testable without a server.

use std::collections::BTreeMap;

use serde_json::{Map, Value};

/// Header name → value. Keys are case-sensitive; a later insert for the
/// same key replaces the earlier value.
pub type Headers = BTreeMap<String, String>;

/// Call parameters in insertion order. `Value::Null` marks an absent
/// parameter, which is left out of GET query strings.
pub type Params = Map<String, Value>;

/// An HTTP request described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    /// Upper-cased method, e.g. `GET`.
    pub method: String,
    /// Absolute URL including any query string.
    pub url: String,
    pub headers: Vec<(String, String)>,
    /// JSON body for every non-GET method.
    pub body: Option<String>,
}

impl HttpRequest {
    /// Value of the header named `name`, compared case-insensitively.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// An HTTP response described as plain data.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub status: u16,
    /// Canonical reason phrase, e.g. `Unauthorized`.
    pub status_text: String,
    pub headers: Vec<(String, String)>,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}
