//! Login, registration, and logout against the auth endpoints.
//!
//! `SessionStore` is the write side of the session: it is the only component
//! that establishes a session from an auth response, and every failure is
//! absorbed into an [`AuthResult`] value - nothing propagates to the caller.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, info};

use crate::api::{ApiError, ApiGateway};

use super::{Session, SessionUser};

/// Fallback when a login fails without a usable backend message
const LOGIN_FALLBACK_MESSAGE: &str = "Login failed";

/// Fallback when a registration fails without a usable backend message
const REGISTER_FALLBACK_MESSAGE: &str = "Registration failed";

/// Outcome of a login or registration attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AuthResult {
    Success { user: SessionUser },
    Failure { message: String },
}

impl AuthResult {
    pub fn is_success(&self) -> bool {
        matches!(self, AuthResult::Success { .. })
    }

    pub fn failure_message(&self) -> Option<&str> {
        match self {
            AuthResult::Success { .. } => None,
            AuthResult::Failure { message } => Some(message),
        }
    }
}

/// Registration payload for `POST /auth/register`.
#[derive(Debug, Clone, Serialize)]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub contact: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub location: Option<String>,
}

#[derive(Serialize)]
struct LoginRequest<'a> {
    email: &'a str,
    password: &'a str,
}

/// Auth endpoint payload: the token plus the identity fields, flattened.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
struct AuthData {
    token: String,
    id: i64,
    email: String,
    first_name: String,
    last_name: String,
    role: String,
}

impl AuthData {
    fn into_parts(self) -> (String, SessionUser) {
        (
            self.token,
            SessionUser {
                id: self.id,
                email: self.email,
                first_name: self.first_name,
                last_name: self.last_name,
                role: self.role,
            },
        )
    }
}

/// Single source of truth for "who is the current user, and what proves it".
pub struct SessionStore {
    session: Arc<Session>,
    gateway: ApiGateway,
}

impl SessionStore {
    pub fn new(session: Arc<Session>, gateway: ApiGateway) -> Self {
        Self { session, gateway }
    }

    /// One attempt against `POST /auth/login`. On success the session is
    /// replaced; on failure existing state is left untouched. Concurrent
    /// attempts are not serialized - whichever result lands last wins.
    pub async fn login(&self, email: &str, password: &str) -> AuthResult {
        let request = LoginRequest { email, password };
        match self
            .gateway
            .post_public::<AuthData, _>("/auth/login", &request)
            .await
        {
            Ok(data) => {
                let (token, user) = data.into_parts();
                self.session.establish(token, user.clone());
                info!(user_id = user.id, "Login succeeded");
                AuthResult::Success { user }
            }
            Err(e) => {
                debug!(error = %e, "Login failed");
                AuthResult::Failure {
                    message: e
                        .backend_message()
                        .unwrap_or(LOGIN_FALLBACK_MESSAGE)
                        .to_string(),
                }
            }
        }
    }

    /// One attempt against `POST /auth/register`. Field-validation messages
    /// from the backend are joined comma-separated, order preserved.
    pub async fn register(&self, request: &RegisterRequest) -> AuthResult {
        match self
            .gateway
            .post_public::<AuthData, _>("/auth/register", request)
            .await
        {
            Ok(data) => {
                let (token, user) = data.into_parts();
                self.session.establish(token, user.clone());
                info!(user_id = user.id, "Registration succeeded");
                AuthResult::Success { user }
            }
            Err(e) => {
                debug!(error = %e, "Registration failed");
                AuthResult::Failure {
                    message: Self::register_failure_message(&e),
                }
            }
        }
    }

    fn register_failure_message(error: &ApiError) -> String {
        let errors = error.validation_errors();
        if !errors.is_empty() {
            return errors.join(", ");
        }
        error
            .backend_message()
            .unwrap_or(REGISTER_FALLBACK_MESSAGE)
            .to_string()
    }

    /// Clear the session unconditionally. Idempotent; never calls the network.
    pub fn logout(&self) {
        self.session.clear();
    }

    pub fn is_authenticated(&self) -> bool {
        self.session.is_authenticated()
    }

    pub fn current_user(&self) -> Option<SessionUser> {
        self.session.current_user()
    }
}
