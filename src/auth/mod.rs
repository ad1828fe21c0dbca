//! Session state and authentication operations.
//!
//! This module provides:
//! - `Session`: the credential/user pair, persisted across restarts
//! - `SessionStore`: login, registration, and logout through the gateway
//!
//! The gateway reads the credential through the `CredentialSource` trait the
//! session implements; no other component mutates session state.

pub mod session;
pub mod store;

pub use session::{Session, SessionUser};
pub use store::{AuthResult, RegisterRequest, SessionStore};
