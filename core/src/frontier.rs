//! Composition root: one dispatcher, one set of account routes.

use crate::account::{Account, AccountRoutes};
use crate::client::Client;
use crate::config::ClientConfig;

/// Entry point for applications.
///
/// ```rust,no_run
/// # async fn run() -> frontier_core::Result<()> {
/// let mut frontier = frontier_core::Frontier::new();
/// frontier
///     .set_endpoint("https://auth.example.com/v1")
///     .set_project("my-project");
///
/// let session = frontier
///     .account()
///     .create_email_session("user@example.com", "secret")
///     .await?;
/// println!("logged in as {}", session.user_id);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct Frontier {
    client: Client,
    account_routes: AccountRoutes,
}

impl Frontier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_config(config: ClientConfig) -> Self {
        Self::from_client(Client::from_config(config))
    }

    pub fn from_client(client: Client) -> Self {
        Self {
            client,
            account_routes: AccountRoutes::default(),
        }
    }

    pub fn set_endpoint(&mut self, endpoint: impl Into<String>) -> &mut Self {
        self.client.set_endpoint(endpoint);
        self
    }

    pub fn set_project(&mut self, project: impl Into<String>) -> &mut Self {
        self.client.set_project(project);
        self
    }

    /// API key for server-side use.
    pub fn set_key(&mut self, key: impl Into<String>) -> &mut Self {
        self.client.set_key(key);
        self
    }

    /// JWT sent with every subsequent request.
    pub fn set_jwt(&mut self, jwt: impl Into<String>) -> &mut Self {
        self.client.set_jwt(jwt);
        self
    }

    pub fn set_locale(&mut self, locale: impl Into<String>) -> &mut Self {
        self.client.set_locale(locale);
        self
    }

    pub fn add_header(&mut self, name: impl Into<String>, value: impl Into<String>) -> &mut Self {
        self.client.add_header(name, value);
        self
    }

    pub fn set_account_routes(&mut self, routes: AccountRoutes) -> &mut Self {
        self.account_routes = routes;
        self
    }

    pub fn account(&self) -> Account<'_> {
        Account::new(&self.client, &self.account_routes)
    }

    pub fn account_routes(&self) -> &AccountRoutes {
        &self.account_routes
    }

    pub fn client(&self) -> &Client {
        &self.client
    }

    pub fn client_mut(&mut self) -> &mut Client {
        &mut self.client
    }
}
