use axum::{extract::State, http::HeaderMap, http::StatusCode, Json};
use serde::Deserialize;

use super::extract::bearer_token;
use super::AuthError;
use crate::errors::AppError;
use crate::models::user::{AuthSession, AuthUser};
use crate::state::AppState;

#[derive(Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

fn auth_failure(e: AuthError) -> AppError {
    match e {
        AuthError::InvalidCredentials => AppError::Unauthorized(e.to_string()),
        other => {
            tracing::error!("Auth service call failed: {other}");
            AppError::Collaborator("The authentication service is unavailable".to_string())
        }
    }
}

fn validate(req: &CredentialsRequest) -> Result<(), AppError> {
    if req.email.trim().is_empty() || req.password.is_empty() {
        return Err(AppError::Validation(
            "Email and password are required".to_string(),
        ));
    }
    Ok(())
}

/// POST /api/v1/auth/sign-in
pub async fn handle_sign_in(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<Json<AuthSession>, AppError> {
    validate(&req)?;
    let session = state
        .auth
        .sign_in(req.email.trim(), &req.password)
        .await
        .map_err(auth_failure)?;
    Ok(Json(session))
}

/// POST /api/v1/auth/sign-up
pub async fn handle_sign_up(
    State(state): State<AppState>,
    Json(req): Json<CredentialsRequest>,
) -> Result<(StatusCode, Json<AuthUser>), AppError> {
    validate(&req)?;
    let user = state
        .auth
        .sign_up(req.email.trim(), &req.password)
        .await
        .map_err(auth_failure)?;
    Ok((StatusCode::CREATED, Json(user)))
}

/// POST /api/v1/auth/sign-out
pub async fn handle_sign_out(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<StatusCode, AppError> {
    if let Some(token) = bearer_token(&headers) {
        state.auth.sign_out(token).await.map_err(auth_failure)?;
    }
    Ok(StatusCode::NO_CONTENT)
}
