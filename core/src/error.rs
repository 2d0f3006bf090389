//! Error taxonomy for the Frontier client.
//!
//! # Design
//! Every failure surfaces as a single `FrontierError` value. The variant
//! identity lives in `ErrorKind`, so callers can branch on
//! `kind()` or on the machine-readable `error_type()` tag without ever
//! inspecting message text. Each kind supplies its own default code and
//! type tag; the backend may override both.
//!
//! Status classification:
//! - 401 / 403 → `Auth`
//! - 400 / 422 → `Validation`
//! - any other non-2xx → `Generic`
//!
//! Transport faults become `Network`. Schema mismatches detected while
//! decoding a typed entity become `Validation`.

use serde_json::Value;
use thiserror::Error;

/// Result alias used throughout the crate.
pub type Result<T> = std::result::Result<T, FrontierError>;

/// The four failure kinds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    Generic,
    Auth,
    Network,
    Validation,
}

impl ErrorKind {
    pub fn default_code(self) -> u16 {
        match self {
            ErrorKind::Generic | ErrorKind::Network => 0,
            ErrorKind::Auth => 401,
            ErrorKind::Validation => 400,
        }
    }

    pub fn default_type(self) -> &'static str {
        match self {
            ErrorKind::Generic => "",
            ErrorKind::Auth => "auth_error",
            ErrorKind::Network => "network_error",
            ErrorKind::Validation => "validation_error",
        }
    }

    /// Kind for a non-success HTTP status.
    pub fn for_status(status: u16) -> Self {
        match status {
            401 | 403 => ErrorKind::Auth,
            400 | 422 => ErrorKind::Validation,
            _ => ErrorKind::Generic,
        }
    }
}

/// A failed call: message, numeric code, type tag, and the raw backend
/// payload when one was received (`Value::Null` otherwise).
#[derive(Debug, Clone, PartialEq, Error)]
#[error("{message}")]
pub struct FrontierError {
    kind: ErrorKind,
    message: String,
    code: u16,
    error_type: String,
    response: Value,
}

impl FrontierError {
    fn with_kind(kind: ErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
            code: kind.default_code(),
            error_type: kind.default_type().to_string(),
            response: Value::Null,
        }
    }

    /// A generic failure: code 0, empty type tag.
    pub fn new(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Generic, message)
    }

    pub fn auth(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Auth, message)
    }

    pub fn network(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Network, message)
    }

    pub fn validation(message: impl Into<String>) -> Self {
        Self::with_kind(ErrorKind::Validation, message)
    }

    pub fn with_code(mut self, code: u16) -> Self {
        self.code = code;
        self
    }

    pub fn with_type(mut self, error_type: impl Into<String>) -> Self {
        self.error_type = error_type.into();
        self
    }

    pub fn with_response(mut self, response: Value) -> Self {
        self.response = response;
        self
    }

    /// Build the error for a non-success response.
    ///
    /// `body` is the already-decoded response (`{}` when the body was not
    /// JSON). The backend's `message` and `type` fields win over the
    /// defaults when they are non-empty strings. Without a message the
    /// status line is used, `HTTP <status>` alone when the reason is empty.
    pub fn from_status(status: u16, status_text: &str, body: Value) -> Self {
        let kind = ErrorKind::for_status(status);
        let message = non_empty_str(&body, "message")
            .map(str::to_string)
            .unwrap_or_else(|| match status_text.trim() {
                "" => format!("HTTP {status}"),
                reason => format!("HTTP {status}: {reason}"),
            });
        let error_type = non_empty_str(&body, "type")
            .unwrap_or(kind.default_type())
            .to_string();

        Self::with_kind(kind, message)
            .with_code(status)
            .with_type(error_type)
            .with_response(body)
    }

    pub fn kind(&self) -> ErrorKind {
        self.kind
    }

    pub fn message(&self) -> &str {
        &self.message
    }

    pub fn code(&self) -> u16 {
        self.code
    }

    pub fn error_type(&self) -> &str {
        &self.error_type
    }

    pub fn response(&self) -> &Value {
        &self.response
    }

    pub fn is_auth(&self) -> bool {
        self.kind == ErrorKind::Auth
    }

    pub fn is_network(&self) -> bool {
        self.kind == ErrorKind::Network
    }

    pub fn is_validation(&self) -> bool {
        self.kind == ErrorKind::Validation
    }
}

fn non_empty_str<'a>(body: &'a Value, field: &str) -> Option<&'a str> {
    body.get(field)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn kinds_apply_their_defaults() {
        let generic = FrontierError::new("boom");
        assert_eq!(generic.kind(), ErrorKind::Generic);
        assert_eq!(generic.code(), 0);
        assert_eq!(generic.error_type(), "");
        assert_eq!(generic.response(), &Value::Null);

        let auth = FrontierError::auth("nope");
        assert_eq!(auth.code(), 401);
        assert_eq!(auth.error_type(), "auth_error");

        let network = FrontierError::network("down");
        assert_eq!(network.code(), 0);
        assert_eq!(network.error_type(), "network_error");

        let validation = FrontierError::validation("bad");
        assert_eq!(validation.code(), 400);
        assert_eq!(validation.error_type(), "validation_error");
    }

    #[test]
    fn builders_override_defaults() {
        let err = FrontierError::auth("expired")
            .with_code(403)
            .with_type("session_expired")
            .with_response(json!({"message": "expired"}));
        assert_eq!(err.kind(), ErrorKind::Auth);
        assert_eq!(err.code(), 403);
        assert_eq!(err.error_type(), "session_expired");
        assert_eq!(err.response()["message"], "expired");
    }

    #[test]
    fn missing_reason_phrase_leaves_bare_status_line() {
        let err = FrontierError::from_status(599, "", json!({}));
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.message(), "HTTP 599");
        assert_eq!(err.code(), 599);

        let err = FrontierError::from_status(503, "Service Unavailable", json!({}));
        assert_eq!(err.message(), "HTTP 503: Service Unavailable");
    }

    #[test]
    fn display_is_the_message() {
        assert_eq!(FrontierError::network("connection refused").to_string(), "connection refused");
    }

    #[test]
    fn status_401_uses_backend_message() {
        let body = json!({"message": "invalid credentials"});
        let err = FrontierError::from_status(401, "Unauthorized", body.clone());
        assert!(err.is_auth());
        assert_eq!(err.code(), 401);
        assert_eq!(err.message(), "invalid credentials");
        assert_eq!(err.error_type(), "auth_error");
        assert_eq!(err.response(), &body);
    }

    #[test]
    fn backend_type_tag_wins() {
        let body = json!({"message": "taken", "type": "user_already_exists"});
        let err = FrontierError::from_status(409, "Conflict", body);
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.error_type(), "user_already_exists");
    }

    #[test]
    fn missing_message_falls_back_to_status_line() {
        let err = FrontierError::from_status(500, "Internal Server Error", json!({}));
        assert_eq!(err.message(), "HTTP 500: Internal Server Error");
        assert_eq!(err.kind(), ErrorKind::Generic);
        assert_eq!(err.error_type(), "");
        assert_eq!(err.response(), &json!({}));
    }

    #[test]
    fn empty_message_falls_back_to_status_line() {
        let err = FrontierError::from_status(404, "Not Found", json!({"message": ""}));
        assert_eq!(err.message(), "HTTP 404: Not Found");
    }

    #[test]
    fn non_string_message_is_ignored() {
        let err = FrontierError::from_status(400, "Bad Request", json!({"message": 42}));
        assert!(err.is_validation());
        assert_eq!(err.message(), "HTTP 400: Bad Request");
        assert_eq!(err.code(), 400);
    }

    #[test]
    fn status_classification() {
        assert_eq!(ErrorKind::for_status(401), ErrorKind::Auth);
        assert_eq!(ErrorKind::for_status(403), ErrorKind::Auth);
        assert_eq!(ErrorKind::for_status(400), ErrorKind::Validation);
        assert_eq!(ErrorKind::for_status(422), ErrorKind::Validation);
        assert_eq!(ErrorKind::for_status(404), ErrorKind::Generic);
        assert_eq!(ErrorKind::for_status(503), ErrorKind::Generic);
    }
}
