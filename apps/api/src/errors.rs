use std::fmt;

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde_json::json;
use thiserror::Error;

/// Which token family a lookup failed against. Only changes the wording of
/// the error message; both kinds map to the same status code.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Reset,
    Verification,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::Reset => write!(f, "reset"),
            TokenKind::Verification => write!(f, "verification"),
        }
    }
}

/// Application-level error type.
/// Implements `IntoResponse` so Axum handlers can return `Result<T, AppError>`.
#[derive(Debug, Error)]
pub enum AppError {
    #[error("Invalid credentials")]
    InvalidCredentials,

    #[error("Email already registered")]
    EmailAlreadyRegistered,

    /// Account lookups surface different wording depending on the entry
    /// point ("No account found with this email address" vs "User not
    /// found"), so the message travels with the variant.
    #[error("{0}")]
    AccountNotFound(String),

    #[error("Invalid or expired {0} token")]
    InvalidOrExpiredToken(TokenKind),

    #[error("Resume not found")]
    ResumeNotFound,

    #[error("Validation error: {0}")]
    Validation(String),

    #[error("Unauthorized")]
    Unauthorized,

    #[error("Forbidden")]
    Forbidden,

    #[error("Internal server error: {0}")]
    Internal(#[from] anyhow::Error),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let (status, code, message) = match &self {
            AppError::InvalidCredentials => (
                StatusCode::UNAUTHORIZED,
                "INVALID_CREDENTIALS",
                self.to_string(),
            ),
            AppError::EmailAlreadyRegistered => (
                StatusCode::CONFLICT,
                "EMAIL_ALREADY_REGISTERED",
                self.to_string(),
            ),
            AppError::AccountNotFound(msg) => {
                (StatusCode::NOT_FOUND, "ACCOUNT_NOT_FOUND", msg.clone())
            }
            AppError::InvalidOrExpiredToken(_) => {
                (StatusCode::BAD_REQUEST, "INVALID_TOKEN", self.to_string())
            }
            AppError::ResumeNotFound => (
                StatusCode::NOT_FOUND,
                "RESUME_NOT_FOUND",
                "Resume not found".to_string(),
            ),
            AppError::Validation(msg) => (StatusCode::BAD_REQUEST, "VALIDATION_ERROR", msg.clone()),
            AppError::Unauthorized => (
                StatusCode::UNAUTHORIZED,
                "UNAUTHORIZED",
                "Authentication required".to_string(),
            ),
            AppError::Forbidden => (
                StatusCode::FORBIDDEN,
                "FORBIDDEN",
                "Access denied".to_string(),
            ),
            AppError::Internal(e) => {
                tracing::error!("Internal error: {e:?}");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    "INTERNAL_ERROR",
                    "An internal server error occurred".to_string(),
                )
            }
        };

        let body = Json(json!({
            "error": {
                "code": code,
                "message": message
            }
        }));

        (status, body).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_token_kind_wording() {
        assert_eq!(
            AppError::InvalidOrExpiredToken(TokenKind::Reset).to_string(),
            "Invalid or expired reset token"
        );
        assert_eq!(
            AppError::InvalidOrExpiredToken(TokenKind::Verification).to_string(),
            "Invalid or expired verification token"
        );
    }

    #[test]
    fn test_internal_error_is_sanitized() {
        let response =
            AppError::Internal(anyhow::anyhow!("redis connection refused")).into_response();
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
