use std::fs;
use std::path::{Path, PathBuf};
use std::sync::{PoisonError, RwLock};

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

/// Raw bearer token file name in the data directory
const TOKEN_FILE: &str = "token";

/// Serialized session user file name in the data directory
const USER_FILE: &str = "user.json";

/// Identity of the signed-in user, as returned by the auth endpoints.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SessionUser {
    pub id: i64,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

impl SessionUser {
    pub fn display_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
    }
}

/// Token and user always live and die together.
#[derive(Debug, Clone)]
struct SessionEntry {
    token: String,
    user: SessionUser,
}

/// The current credential/identity pair and its persisted copy.
///
/// `Session` is the only writer of the two session files; everything else
/// reads through its accessors. Shared as `Arc<Session>` between the
/// `SessionStore` (which establishes and clears it) and the `ApiGateway`
/// (which reads the token per request and evicts on a 401).
pub struct Session {
    data_dir: PathBuf,
    state: RwLock<Option<SessionEntry>>,
}

impl Session {
    /// Restore a session from disk. Missing or malformed files mean an
    /// unauthenticated start; this never touches the network and never fails.
    pub fn restore(data_dir: impl Into<PathBuf>) -> Self {
        let data_dir = data_dir.into();
        let entry = Self::load_persisted(&data_dir);
        if entry.is_some() {
            debug!("Restored persisted session");
        }
        Self {
            data_dir,
            state: RwLock::new(entry),
        }
    }

    fn load_persisted(dir: &Path) -> Option<SessionEntry> {
        let token = fs::read_to_string(dir.join(TOKEN_FILE)).ok()?;
        let token = token.trim().to_string();
        if token.is_empty() {
            return None;
        }

        let raw = fs::read_to_string(dir.join(USER_FILE)).ok()?;
        match serde_json::from_str::<SessionUser>(&raw) {
            Ok(user) => Some(SessionEntry { token, user }),
            Err(e) => {
                debug!(error = %e, "Ignoring malformed persisted session user");
                None
            }
        }
    }

    /// Install a new credential/user pair, replacing any existing one.
    /// Memory and the persisted copy are updated under the same lock.
    pub(crate) fn establish(&self, token: String, user: SessionUser) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if let Err(e) = self.persist(&token, &user) {
            warn!(error = %e, "Failed to persist session; in-memory session still active");
        }
        *guard = Some(SessionEntry { token, user });
    }

    fn persist(&self, token: &str, user: &SessionUser) -> Result<()> {
        fs::create_dir_all(&self.data_dir).context("Failed to create session data directory")?;
        fs::write(self.data_dir.join(TOKEN_FILE), token).context("Failed to write token file")?;
        let raw = serde_json::to_string_pretty(user)?;
        fs::write(self.data_dir.join(USER_FILE), raw).context("Failed to write user file")?;
        Ok(())
    }

    /// Drop the credential and user, in memory and on disk. Idempotent.
    pub fn clear(&self) {
        let mut guard = self.state.write().unwrap_or_else(PoisonError::into_inner);
        *guard = None;

        for file in [TOKEN_FILE, USER_FILE] {
            let path = self.data_dir.join(file);
            if path.exists() {
                if let Err(e) = fs::remove_file(&path) {
                    warn!(error = %e, file, "Failed to remove session file");
                }
            }
        }
    }

    /// The bearer token currently held, if any.
    pub fn token(&self) -> Option<String> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|entry| entry.token.clone())
    }

    /// The signed-in user, if any.
    pub fn current_user(&self) -> Option<SessionUser> {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .as_ref()
            .map(|entry| entry.user.clone())
    }

    /// Derived from credential presence; never stored separately.
    pub fn is_authenticated(&self) -> bool {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .is_some()
    }
}

impl crate::api::CredentialSource for Session {
    fn current_token(&self) -> Option<String> {
        self.token()
    }

    fn evict(&self) {
        self.clear();
    }
}
