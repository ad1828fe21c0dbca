//! HTTP gateway for the Bookaro REST API.
//!
//! Every backend call in the crate goes through [`ApiGateway`]. The gateway
//! applies two cross-cutting policies uniformly:
//!
//! - outbound: the current bearer token (looked up at call time through
//!   [`CredentialSource`]) is attached to every request that has one;
//! - inbound: a 401 on any bearer-scoped endpoint evicts the session and
//!   fires the registered session-invalidated hooks.
//!
//! The gateway performs exactly one network attempt per call. It does not
//! cache, deduplicate, or retry.

use std::sync::{Arc, PoisonError, RwLock};
use std::time::Duration;

use reqwest::{Client, RequestBuilder};
use serde::{de::DeserializeOwned, Deserialize, Serialize};
use tracing::{debug, warn};

use super::ApiError;

/// HTTP request timeout in seconds.
/// 30s allows for slow API responses while failing fast enough for good UX.
const REQUEST_TIMEOUT_SECS: u64 = 30;

/// Narrow capability the gateway needs from the session layer: read whatever
/// credential is current at call time, and drop it when the backend says it
/// is dead. Implemented by `auth::Session`; tests inject fakes.
pub trait CredentialSource: Send + Sync {
    /// The bearer token currently held, if any.
    fn current_token(&self) -> Option<String>;

    /// Discard all session state. Called on an authorization failure.
    fn evict(&self);
}

/// Callback invoked after the gateway evicts a dead session. The hosting
/// application translates this into navigation to its login surface.
pub type SessionInvalidatedHook = Arc<dyn Fn() + Send + Sync>;

/// Whether a 401 from this endpoint means "dead session".
///
/// The auth endpoints are public: a 401 there is a rejected login attempt
/// and must not touch whatever session is already held.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum AuthScope {
    Bearer,
    Public,
}

/// Response envelope the backend wraps every payload in.
#[derive(Debug, Deserialize)]
struct ApiEnvelope<T> {
    #[serde(default)]
    success: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default = "Option::default")]
    data: Option<T>,
}

/// API gateway for the Bookaro backend.
/// Clone is cheap - reqwest::Client uses Arc internally for connection pooling.
#[derive(Clone)]
pub struct ApiGateway {
    http: Client,
    base_url: String,
    credentials: Arc<dyn CredentialSource>,
    invalidated_hooks: Arc<RwLock<Vec<SessionInvalidatedHook>>>,
}

impl ApiGateway {
    /// Create a gateway against the given base URL, resolving credentials
    /// through `credentials` on every request.
    pub fn new(
        base_url: impl Into<String>,
        credentials: Arc<dyn CredentialSource>,
    ) -> Result<Self, ApiError> {
        let http = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()?;

        Ok(Self {
            http,
            base_url: base_url.into().trim_end_matches('/').to_string(),
            credentials,
            invalidated_hooks: Arc::new(RwLock::new(Vec::new())),
        })
    }

    /// Register a callback to run after a 401 forces the session out.
    /// Hooks fire on every eviction, regardless of which endpoint tripped it.
    pub fn on_session_invalidated(&self, hook: impl Fn() + Send + Sync + 'static) {
        self.invalidated_hooks
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .push(Arc::new(hook));
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    // ===== Verb helpers =====

    pub(crate) async fn get<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.http.get(self.url(path));
        self.dispatch(req, AuthScope::Bearer).await
    }

    pub(crate) async fn get_with_query<T: DeserializeOwned>(
        &self,
        path: &str,
        query: &[(&str, String)],
    ) -> Result<T, ApiError> {
        let req = self.http.get(self.url(path)).query(query);
        self.dispatch(req, AuthScope::Bearer).await
    }

    pub(crate) async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        self.dispatch(req, AuthScope::Bearer).await
    }

    /// POST without a body (e.g. adding a favorite by path parameter).
    pub(crate) async fn post_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path));
        self.dispatch(req, AuthScope::Bearer).await
    }

    /// POST to a public auth endpoint. A 401 here means the submitted
    /// credentials were rejected, not that the held session expired, so the
    /// eviction policy is skipped.
    pub(crate) async fn post_public<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.post(self.url(path)).json(body);
        self.dispatch(req, AuthScope::Public).await
    }

    pub(crate) async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> Result<T, ApiError> {
        let req = self.http.put(self.url(path)).json(body);
        self.dispatch(req, AuthScope::Bearer).await
    }

    /// PUT without a body (e.g. marking an address as default).
    pub(crate) async fn put_empty<T: DeserializeOwned>(&self, path: &str) -> Result<T, ApiError> {
        let req = self.http.put(self.url(path));
        self.dispatch(req, AuthScope::Bearer).await
    }

    /// DELETE where the envelope carries no payload (`data: null`).
    pub(crate) async fn delete(&self, path: &str) -> Result<(), ApiError> {
        let req = self.http.delete(self.url(path));
        let text = self.dispatch_raw(req, AuthScope::Bearer).await?;
        Self::unwrap_envelope_unit(&text)
    }

    // ===== Interception core =====

    async fn dispatch<T: DeserializeOwned>(
        &self,
        req: RequestBuilder,
        scope: AuthScope,
    ) -> Result<T, ApiError> {
        let text = self.dispatch_raw(req, scope).await?;
        Self::unwrap_envelope(&text)
    }

    /// Single network attempt: attach the current token, send, and map the
    /// outcome. Only the 401 case has a side effect.
    async fn dispatch_raw(&self, req: RequestBuilder, scope: AuthScope) -> Result<String, ApiError> {
        let req = match self.credentials.current_token() {
            Some(token) => req.bearer_auth(token),
            None => req,
        };

        let response = req.send().await?;
        let status = response.status();
        let text = response.text().await?;

        if status.is_success() {
            return Ok(text);
        }

        let err = ApiError::from_status(status, &text);
        if matches!(err, ApiError::Unauthorized { .. }) && scope == AuthScope::Bearer {
            self.evict_session();
        } else {
            debug!(status = %status, "Request rejected by backend");
        }
        Err(err)
    }

    fn evict_session(&self) {
        warn!("Authorization failure - evicting session");
        self.credentials.evict();

        let hooks = self
            .invalidated_hooks
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone();
        for hook in hooks {
            hook();
        }
    }

    fn unwrap_envelope<T: DeserializeOwned>(text: &str) -> Result<T, ApiError> {
        let envelope: ApiEnvelope<T> = serde_json::from_str(text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response envelope: {}", e))
        })?;

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Request rejected".to_string()),
            ));
        }

        envelope
            .data
            .ok_or_else(|| ApiError::InvalidResponse("Response envelope had no data".to_string()))
    }

    fn unwrap_envelope_unit(text: &str) -> Result<(), ApiError> {
        let envelope: ApiEnvelope<serde_json::Value> = serde_json::from_str(text).map_err(|e| {
            ApiError::InvalidResponse(format!("Failed to parse response envelope: {}", e))
        })?;

        if !envelope.success {
            return Err(ApiError::Rejected(
                envelope
                    .message
                    .unwrap_or_else(|| "Request rejected".to_string()),
            ));
        }
        Ok(())
    }
}
