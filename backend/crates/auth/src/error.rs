//! Auth Error Types
//!
//! Account and verification errors, integrated with the unified
//! `kernel::error::AppError` response format.

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{STORE_UNAVAILABLE_MESSAGE, is_store_unavailable},
    kind::ErrorKind,
};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

const NEW_EMAIL_ACTION: &str = "Request a new verification email";

#[derive(Debug, Error)]
pub enum AuthError {
    /// Missing or malformed input, detected before any store access
    #[error("{0}")]
    Validation(String),

    #[error("User already exists")]
    EmailTaken,

    /// Same message for unknown email and wrong password
    #[error("Invalid email or password")]
    InvalidCredentials,

    #[error(
        "Please verify your email before logging in. Check your inbox for the verification link."
    )]
    NeedsVerification,

    #[error("Invalid verification token. Please request a new verification email.")]
    InvalidToken,

    #[error("Verification token has expired. Please request a new verification email.")]
    TokenExpired,

    #[error(
        "Verification token could not be matched to a single account. Please request a new verification email."
    )]
    AmbiguousToken,

    #[error("Account not found")]
    AccountNotFound,

    /// Store unreachable; surfaced immediately, never retried inside a request
    #[error("Database unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::Validation(_)
            | AuthError::InvalidToken
            | AuthError::TokenExpired
            | AuthError::AmbiguousToken => ErrorKind::BadRequest,
            AuthError::EmailTaken => ErrorKind::Conflict,
            AuthError::InvalidCredentials | AuthError::NeedsVerification => {
                ErrorKind::Unauthorized
            }
            AuthError::AccountNotFound => ErrorKind::NotFound,
            AuthError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> u16 {
        self.kind().status_code()
    }

    /// Convert to AppError; server-side details stay in the logs
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::NeedsVerification => AppError::new(self.kind(), self.to_string())
                .with_detail("needsVerification", true),
            AuthError::InvalidToken | AuthError::TokenExpired | AuthError::AmbiguousToken => {
                AppError::new(self.kind(), self.to_string()).with_action(NEW_EMAIL_ACTION)
            }
            AuthError::StoreUnavailable(_) => {
                AppError::new(self.kind(), STORE_UNAVAILABLE_MESSAGE)
            }
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            AuthError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Account store unavailable");
            }
            AuthError::Database(e) => {
                tracing::error!(error = %e, "Auth database error");
            }
            AuthError::Internal(msg) => {
                tracing::error!(message = %msg, "Auth internal error");
            }
            AuthError::InvalidCredentials => {
                tracing::warn!("Invalid login attempt");
            }
            AuthError::InvalidToken | AuthError::AmbiguousToken => {
                tracing::warn!(error = %self, "Verification token rejected");
            }
            _ => {
                tracing::debug!(error = %self, "Auth error");
            }
        }
    }
}

impl From<sqlx::Error> for AuthError {
    fn from(err: sqlx::Error) -> Self {
        if is_store_unavailable(&err) {
            AuthError::StoreUnavailable(err)
        } else {
            AuthError::Database(err)
        }
    }
}

/// Value-object validation failures are client errors; anything else is ours
impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
