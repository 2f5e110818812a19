use std::time::Duration;

use async_trait::async_trait;
use reqwest::{Client, RequestBuilder, Response, StatusCode};
use serde::{Deserialize, Serialize};
use tokio::sync::broadcast;
use tracing::{debug, warn};

use super::{AuthError, AuthEvent, AuthProvider};
use crate::models::user::{AuthSession, AuthUser};

const EVENT_CAPACITY: usize = 64;

#[derive(Debug, Serialize)]
struct Credentials<'a> {
    email: &'a str,
    password: &'a str,
}

/// `/signup` answers with a session when accounts are auto-confirmed and with
/// the bare user otherwise.
#[derive(Debug, Deserialize)]
#[serde(untagged)]
enum SignUpResponse {
    Session { user: AuthUser },
    User(AuthUser),
}

#[derive(Debug, Deserialize)]
struct ServiceError {
    #[serde(alias = "error_description", alias = "msg")]
    message: Option<String>,
}

/// Client for a GoTrue-compatible auth service (`/user`, `/token`, `/signup`,
/// `/logout`).
pub struct HttpAuthProvider {
    client: Client,
    base_url: String,
    api_key: String,
    events: broadcast::Sender<AuthEvent>,
}

impl HttpAuthProvider {
    pub fn new(base_url: &str, api_key: String) -> Result<Self, AuthError> {
        let client = Client::builder().timeout(Duration::from_secs(15)).build()?;
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Ok(Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
            api_key,
            events,
        })
    }

    fn request(&self, builder: RequestBuilder) -> RequestBuilder {
        builder
            .header("apikey", &self.api_key)
            .header("content-type", "application/json")
    }

    fn publish(&self, event: AuthEvent) {
        // no subscribers is fine
        let _ = self.events.send(event);
    }
}

async fn service_error(response: Response) -> AuthError {
    let status = response.status().as_u16();
    let body = response.text().await.unwrap_or_default();
    let message = serde_json::from_str::<ServiceError>(&body)
        .ok()
        .and_then(|e| e.message)
        .unwrap_or(body);
    warn!("Auth service returned {status}: {message}");
    AuthError::Service { status, message }
}

#[async_trait]
impl AuthProvider for HttpAuthProvider {
    async fn current_user(&self, access_token: &str) -> Result<Option<AuthUser>, AuthError> {
        let response = self
            .request(self.client.get(format!("{}/user", self.base_url)))
            .bearer_auth(access_token)
            .send()
            .await?;
        match response.status() {
            StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => {
                debug!("Auth service rejected bearer token");
                Ok(None)
            }
            status if status.is_success() => Ok(Some(response.json().await?)),
            _ => Err(service_error(response).await),
        }
    }

    async fn sign_in(&self, email: &str, password: &str) -> Result<AuthSession, AuthError> {
        let response = self
            .request(
                self.client
                    .post(format!("{}/token?grant_type=password", self.base_url)),
            )
            .json(&Credentials { email, password })
            .send()
            .await?;
        let status = response.status();
        if status == StatusCode::BAD_REQUEST || status == StatusCode::UNAUTHORIZED {
            return Err(AuthError::InvalidCredentials);
        }
        if !status.is_success() {
            return Err(service_error(response).await);
        }
        let session: AuthSession = response.json().await?;
        self.publish(AuthEvent::SignedIn(session.user.clone()));
        Ok(session)
    }

    async fn sign_up(&self, email: &str, password: &str) -> Result<AuthUser, AuthError> {
        let response = self
            .request(self.client.post(format!("{}/signup", self.base_url)))
            .json(&Credentials { email, password })
            .send()
            .await?;
        if !response.status().is_success() {
            return Err(service_error(response).await);
        }
        let user = match response.json::<SignUpResponse>().await? {
            SignUpResponse::Session { user } => {
                self.publish(AuthEvent::SignedIn(user.clone()));
                user
            }
            SignUpResponse::User(user) => user,
        };
        Ok(user)
    }

    async fn sign_out(&self, access_token: &str) -> Result<(), AuthError> {
        let response = self
            .request(self.client.post(format!("{}/logout", self.base_url)))
            .bearer_auth(access_token)
            .send()
            .await?;
        // an already-invalid token is as signed out as it gets
        if !response.status().is_success() && response.status() != StatusCode::UNAUTHORIZED {
            return Err(service_error(response).await);
        }
        self.publish(AuthEvent::SignedOut);
        Ok(())
    }

    fn subscribe(&self) -> broadcast::Receiver<AuthEvent> {
        self.events.subscribe()
    }
}
