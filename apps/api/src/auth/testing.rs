use std::collections::HashMap;

use async_trait::async_trait;
use tokio::sync::broadcast;
use uuid::Uuid;

use super::{AuthError, AuthEvent, AuthProvider};
use crate::models::user::{AuthSession, AuthUser};

/// Auth provider with a fixed token table.
pub struct StaticAuthProvider {
    users: HashMap<String, AuthUser>,
    events: broadcast::Sender<AuthEvent>,
}

impl StaticAuthProvider {
    pub fn new() -> Self {
        let (events, _) = broadcast::channel(8);
        Self {
            users: HashMap::new(),
            events,
        }
    }

    /// Registers a user reachable through `token`.
    pub fn with_user(mut self, token: &str) -> (Self, AuthUser) {
        let user = AuthUser {
            id: Uuid::new_v4(),
            email: Some(format!("{token}@example.com")),
        };
        self.users.insert(token.to_string(), user.clone());
        (self, user)
    }
}

#[async_trait]
impl AuthProvider for StaticAuthProvider {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        Ok(self.users.get(access_token).cloned())
    }

    async fn sign_in(&self, email: &str, _password: &str) -> Result<AuthSession, AuthError> {
        let (token, user) = self
            .users
            .iter()
            .find(|(_, u)| u.email.as_deref() == Some(email))
            .ok_or(AuthError::InvalidCredentials)?;
        let _ = self.events.send(AuthEvent::SignedIn(user.clone()));
        Ok(AuthSession {
            access_token: token.clone(),
            user: user.clone(),
        })
    }

    async fn sign_up(&self, email: &str, _password: &str) -> Result<AuthUser, AuthError> {
        Ok(AuthUser {
            id: Uuid::new_v4(),
            email: Some(email.to_string()),
        })
    }

    async fn sign_out(&self, _access_token: &str) -> Result<(), AuthError> {
        let _ = self.events.send(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
