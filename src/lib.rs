//! Client library for the Bookaro services marketplace API.
//!
//! The crate is organized around two components:
//!
//! - [`auth::Session`] / [`auth::SessionStore`]: the current credential and
//!   user identity, persisted across restarts, with login/register/logout.
//! - [`api::ApiGateway`]: the single network egress point. It attaches the
//!   current bearer token to every request and, when the backend rejects a
//!   credential with a 401, clears the session and notifies subscribers so
//!   the host application can navigate to its login surface.
//!
//! [`BookaroClient`] wires the two together:
//!
//! ```no_run
//! # async fn run() -> anyhow::Result<()> {
//! use bookaro_client::{BookaroClient, Config};
//!
//! let client = BookaroClient::new(&Config::load()?)?;
//! client.gateway.on_session_invalidated(|| {
//!     // navigate to the login screen
//! });
//!
//! let result = client.auth.login("dana@example.com", "hunter2").await;
//! if result.is_success() {
//!     let bookings = client.gateway.list_bookings(None).await?;
//!     println!("{} bookings", bookings.len());
//! }
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod config;
pub mod models;

use std::sync::Arc;

use anyhow::Result;

pub use api::{ApiError, ApiGateway, CredentialSource};
pub use auth::{AuthResult, RegisterRequest, Session, SessionStore, SessionUser};
pub use config::Config;

/// Session, gateway, and auth operations wired together from a [`Config`].
pub struct BookaroClient {
    pub session: Arc<Session>,
    pub gateway: ApiGateway,
    pub auth: SessionStore,
}

impl BookaroClient {
    /// Restore any persisted session and build the gateway against the
    /// configured base URL.
    pub fn new(config: &Config) -> Result<Self> {
        let session = Arc::new(Session::restore(config.data_dir()?));
        let gateway = ApiGateway::new(config.api_base_url.as_str(), session.clone())?;
        let auth = SessionStore::new(session.clone(), gateway.clone());
        Ok(Self {
            session,
            gateway,
            auth,
        })
    }
}
