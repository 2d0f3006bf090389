//! Account operations over the dispatcher.
//!
//! # Design
//! Each operation is one `Client::call_as` with a fixed method and a path
//! taken from `AccountRoutes`. Paths and the create-body field names are
//! data, not code, because deployments disagree on them; load a different
//! `AccountRoutes` to target another backend. `Account` borrows its
//! client and routes and holds nothing else, so it is free to build one per
//! call.

use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::client::Client;
use crate::error::Result;
use crate::http::{Headers, Params};
use crate::types::{Jwt, Preferences, Session, SessionList, User};

/// Placeholder replaced by the session id in `AccountRoutes::session`.
pub const SESSION_ID_PLACEHOLDER: &str = "{sessionId}";

/// Body field names for account creation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountFields {
    pub user_id: String,
    pub email: String,
    pub password: String,
    pub name: String,
}

impl Default for AccountFields {
    fn default() -> Self {
        Self {
            user_id: "userId".to_string(),
            email: "email".to_string(),
            password: "password".to_string(),
            name: "name".to_string(),
        }
    }
}

/// Paths for every account operation, relative to the client endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AccountRoutes {
    pub create: String,
    pub email_session: String,
    pub current: String,
    pub prefs: String,
    pub jwt: String,
    pub sessions: String,
    /// Single-session path; must contain `{sessionId}`.
    pub session: String,
    pub fields: AccountFields,
}

impl Default for AccountRoutes {
    fn default() -> Self {
        Self {
            create: "/account".to_string(),
            email_session: "/account/sessions/email".to_string(),
            current: "/account".to_string(),
            prefs: "/account/prefs".to_string(),
            jwt: "/account/jwt".to_string(),
            sessions: "/account/sessions".to_string(),
            session: "/account/sessions/{sessionId}".to_string(),
            fields: AccountFields::default(),
        }
    }
}

impl AccountRoutes {
    /// The single-session path with `session_id` substituted as-is.
    pub fn session_path(&self, session_id: &str) -> String {
        self.session.replace(SESSION_ID_PLACEHOLDER, session_id)
    }
}

/// Account façade borrowing a shared dispatcher.
#[derive(Debug, Clone, Copy)]
pub struct Account<'a> {
    client: &'a Client,
    routes: &'a AccountRoutes,
}

impl<'a> Account<'a> {
    pub fn new(client: &'a Client, routes: &'a AccountRoutes) -> Self {
        Self { client, routes }
    }

    /// Sign up. `name` is left out of the body when `None`.
    pub async fn create(
        &self,
        user_id: &str,
        email: &str,
        password: &str,
        name: Option<&str>,
    ) -> Result<User> {
        let fields = &self.routes.fields;
        let mut params = Params::new();
        params.insert(fields.user_id.clone(), user_id.into());
        params.insert(fields.email.clone(), email.into());
        params.insert(fields.password.clone(), password.into());
        if let Some(name) = name {
            params.insert(fields.name.clone(), name.into());
        }
        self.client
            .call_as("POST", &self.routes.create, &Headers::new(), &params)
            .await
    }

    /// Log in with email and password.
    pub async fn create_email_session(&self, email: &str, password: &str) -> Result<Session> {
        let fields = &self.routes.fields;
        let mut params = Params::new();
        params.insert(fields.email.clone(), email.into());
        params.insert(fields.password.clone(), password.into());
        self.client
            .call_as("POST", &self.routes.email_session, &Headers::new(), &params)
            .await
    }

    /// The account behind the current session or JWT.
    pub async fn get(&self) -> Result<User> {
        self.client
            .call_as("GET", &self.routes.current, &Headers::new(), &Params::new())
            .await
    }

    /// Replace the account preferences.
    pub async fn update_prefs(&self, prefs: Preferences) -> Result<User> {
        let mut params = Params::new();
        params.insert("prefs".to_string(), Value::Object(prefs));
        self.client
            .call_as("PATCH", &self.routes.prefs, &Headers::new(), &params)
            .await
    }

    /// Mint a JWT for the current session.
    pub async fn create_jwt(&self) -> Result<Jwt> {
        self.client
            .call_as("POST", &self.routes.jwt, &Headers::new(), &Params::new())
            .await
    }

    pub async fn list_sessions(&self) -> Result<SessionList> {
        self.client
            .call_as("GET", &self.routes.sessions, &Headers::new(), &Params::new())
            .await
    }

    /// Log out one session. `"current"` addresses the calling session.
    pub async fn delete_session(&self, session_id: &str) -> Result<()> {
        self.client
            .call("DELETE", &self.routes.session_path(session_id), &Headers::new(), &Params::new())
            .await?;
        Ok(())
    }
}
