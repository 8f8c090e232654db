use axum::{extract::State, Extension, Json};
use axum_extra::{
    headers::{authorization::Bearer, Authorization},
    TypedHeader,
};
use serde::{Deserialize, Serialize};

use crate::domain::{Identity, Session};
use crate::error::{AppError, AppResult};
use crate::AppState;

const MIN_PASSWORD_LEN: usize = 6;

#[derive(Debug, Deserialize)]
pub struct CredentialsRequest {
    pub email: String,
    pub password: String,
}

impl CredentialsRequest {
    fn validate(&self) -> AppResult<()> {
        let email = self.email.trim();
        if email.is_empty() || !email.contains('@') {
            return Err(AppError::Validation("A valid email is required".to_string()));
        }
        if self.password.len() < MIN_PASSWORD_LEN {
            return Err(AppError::Validation(format!(
                "Password must be at least {} characters",
                MIN_PASSWORD_LEN
            )));
        }
        Ok(())
    }
}

#[derive(Debug, Serialize)]
pub struct AuthResponse {
    pub token: String,
    pub user: Identity,
}

impl From<Session> for AuthResponse {
    fn from(session: Session) -> Self {
        Self {
            token: session.access_token,
            user: session.identity,
        }
    }
}

/// Register a new account
pub async fn register(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    payload.validate()?;

    let session = state
        .gateway
        .sign_up(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Login with email and password
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<CredentialsRequest>,
) -> AppResult<Json<AuthResponse>> {
    let session = state
        .gateway
        .sign_in(payload.email.trim(), &payload.password)
        .await?;

    Ok(Json(session.into()))
}

/// Current session's identity
pub async fn session(Extension(identity): Extension<Identity>) -> Json<Identity> {
    Json(identity)
}

/// End the current session
pub async fn logout(
    State(state): State<AppState>,
    TypedHeader(auth): TypedHeader<Authorization<Bearer>>,
) -> AppResult<Json<serde_json::Value>> {
    state.gateway.sign_out(auth.token()).await?;
    Ok(Json(serde_json::json!({ "message": "Signed out" })))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn credentials(email: &str, password: &str) -> CredentialsRequest {
        CredentialsRequest {
            email: email.to_string(),
            password: password.to_string(),
        }
    }

    #[test]
    fn test_credentials_validation() {
        assert!(credentials("renter@example.com", "hunter22").validate().is_ok());
        assert!(credentials("  ", "hunter22").validate().is_err());
        assert!(credentials("renter", "hunter22").validate().is_err());
        assert!(credentials("renter@example.com", "12345").validate().is_err());
    }
}
