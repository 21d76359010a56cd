use axum::{
    extract::{Path, State},
    http::StatusCode,
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::guard::CurrentAccount;
use crate::errors::AppError;
use crate::models::account::{Account, AccountPatch, NewAccount, Role};
use crate::state::AppState;

/// Minimum password length enforced on the reset form.
const MIN_PASSWORD_LEN: usize = 6;

#[derive(Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Deserialize)]
pub struct ResetPasswordRequest {
    pub token: String,
    pub password: String,
}

#[derive(Deserialize)]
pub struct VerifyEmailRequest {
    pub token: String,
}

#[derive(Serialize)]
pub struct VerifyEmailResponse {
    pub verified: bool,
}

/// POST /api/v1/auth/login
pub async fn handle_login(
    State(state): State<AppState>,
    Json(req): Json<LoginRequest>,
) -> Result<Json<Account>, AppError> {
    let account = state.store.authenticate(&req.email, &req.password).await?;
    Ok(Json(account))
}

/// POST /api/v1/auth/register
pub async fn handle_register(
    State(state): State<AppState>,
    Json(req): Json<NewAccount>,
) -> Result<Json<Account>, AppError> {
    let account = state.store.register(req).await?;
    Ok(Json(account))
}

/// POST /api/v1/auth/logout
pub async fn handle_logout(State(state): State<AppState>) -> Result<StatusCode, AppError> {
    state.store.logout().await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/v1/auth/session
///
/// Body is the session account, or `null` when nobody is signed in; never
/// an error, so the frontend can ask on boot.
pub async fn handle_session(
    State(state): State<AppState>,
) -> Result<Json<Option<Account>>, AppError> {
    Ok(Json(state.store.current_session().await?))
}

/// POST /api/v1/auth/forgot-password
pub async fn handle_forgot_password(
    State(state): State<AppState>,
    Json(req): Json<ForgotPasswordRequest>,
) -> Result<StatusCode, AppError> {
    state.store.request_password_reset(&req.email).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/reset-password
pub async fn handle_reset_password(
    State(state): State<AppState>,
    Json(req): Json<ResetPasswordRequest>,
) -> Result<StatusCode, AppError> {
    if req.password.len() < MIN_PASSWORD_LEN {
        return Err(AppError::Validation(
            "Password must be at least 6 characters".to_string(),
        ));
    }
    state.store.reset_password(&req.token, &req.password).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// POST /api/v1/auth/verify-email
pub async fn handle_verify_email(
    State(state): State<AppState>,
    Json(req): Json<VerifyEmailRequest>,
) -> Result<Json<VerifyEmailResponse>, AppError> {
    let verified = state.store.verify_email(&req.token).await?;
    Ok(Json(VerifyEmailResponse { verified }))
}

/// PATCH /api/v1/accounts/:id
///
/// Self-service profile edits, and admin-driven edits of any account.
/// Only administrators may touch `role` or another account's record.
pub async fn handle_update_account(
    State(state): State<AppState>,
    CurrentAccount(current): CurrentAccount,
    Path(id): Path<String>,
    Json(patch): Json<AccountPatch>,
) -> Result<Json<Account>, AppError> {
    let is_admin = current.role == Role::Admin;
    if !is_admin && current.id != id {
        return Err(AppError::Forbidden);
    }
    if !is_admin && patch.role.is_some() {
        return Err(AppError::Forbidden);
    }
    let account = state.store.update_profile(&id, patch).await?;
    Ok(Json(account))
}
