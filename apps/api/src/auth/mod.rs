//! Auth collaborator: resolves bearer tokens to users and proxies sign-in,
//! sign-up and sign-out to the external auth service.
//!
//! "No current user" is a normal state. Only persistence needs an identity.

pub mod extract;
pub mod handlers;
pub mod remote;
#[cfg(test)]
pub mod testing;

use async_trait::async_trait;
use thiserror::Error;
use tokio::sync::broadcast;

use crate::models::user::{AuthSession, AuthUser};

pub use extract::CurrentUser;
pub use remote::HttpAuthProvider;

#[derive(Debug, Clone, PartialEq)]
pub enum AuthEvent {
    SignedIn(AuthUser),
    SignedOut,
}

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("auth service error (status {status}): {message}")]
    Service { status: u16, message: String },

    #[error("invalid email or password")]
    InvalidCredentials,
}

#[async_trait]
pub trait AuthProvider: Send + Sync {
    /// `Ok(None)` for an unknown or expired token.
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError>;

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError>;

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError>;

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError>;

    /// Auth state changes observed through this provider.
    fn subscribe(&self) -> broadcast::Receiver<AuthEvent>;
}
