//! Client library for the Frontier account backend.
//!
//! # Overview
//! Signs users up, logs them in and carries project, key, JWT and locale
//! context on every later call. Every failure comes back as a typed
//! `FrontierError`.
//!
//! # Design
//! - `Client` is the dispatcher: it owns the connection configuration and
//!   exposes one generic `call`. Each call is split into `build_request`
//!   (pure), one `Transport::execute` round trip, and `parse_response`
//!   (pure), so request assembly and error classification are testable
//!   without a server.
//! - `Account` is a stateless façade fixing method, path and body shape
//!   per operation; paths and field names come from `AccountRoutes`.
//! - `Frontier` wires one `Client` to the account façade and exposes the
//!   fluent setters.
//! - No retries, caching or pooling policy; every failure reaches the
//!   caller on first occurrence.

pub mod account;
pub mod client;
pub mod config;
pub mod error;
pub mod frontier;
pub mod http;
pub mod transport;
pub mod types;

#[cfg(test)]
mod test_support;

pub use account::{Account, AccountFields, AccountRoutes};
pub use client::Client;
pub use config::{ClientConfig, SdkIdentity};
pub use error::{ErrorKind, FrontierError, Result};
pub use frontier::Frontier;
pub use http::{Headers, HttpRequest, HttpResponse, Params};
pub use transport::{ReqwestTransport, Transport, TransportError};
pub use types::{Jwt, Preferences, Session, SessionList, User};
