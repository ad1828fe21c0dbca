//! REST API gateway for the Bookaro marketplace backend.
//!
//! All network traffic leaves through [`ApiGateway`]: it attaches the current
//! bearer token on the way out and evicts the session on a 401 on the way in.
//! `endpoints` adds the typed resource methods on top.

pub mod endpoints;
pub mod error;
pub mod gateway;

pub use error::ApiError;
pub use gateway::{ApiGateway, CredentialSource, SessionInvalidatedHook};
