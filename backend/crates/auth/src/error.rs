//! Auth error types.
//!
//! Every variant maps onto a [`kernel::error::kind::ErrorKind`] so handlers
//! can return `AuthResult<T>` directly.

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use kernel::error::{app_error::AppError, conversions, kind::ErrorKind};
use thiserror::Error;

pub type AuthResult<T> = Result<T, AuthError>;

#[derive(Debug, Error)]
pub enum AuthError {
    #[error("User not found")]
    UserNotFound,

    /// Another account already holds the (case-insensitive) user name.
    #[error("Username already taken.")]
    UserNameTaken,

    /// Unknown user name or wrong password. The two are never distinguished.
    #[error("Invalid username or password")]
    InvalidCredentials,

    #[error("You are not allowed to act on this account")]
    Forbidden,

    #[error("Administrator role required")]
    AdminRequired,

    #[error("{0}")]
    Validation(String),

    #[error("Passwords do not match")]
    PasswordMismatch,

    /// The user still authors posts; they must be removed first.
    #[error("User still has posts and cannot be deleted")]
    UserHasPosts,

    #[error("Session not found or expired")]
    SessionInvalid,

    #[error("Session fingerprint mismatch")]
    SessionFingerprintMismatch,

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl AuthError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            AuthError::UserNotFound => ErrorKind::NotFound,
            AuthError::UserNameTaken
            | AuthError::Validation(_)
            | AuthError::PasswordMismatch
            | AuthError::UserHasPosts => ErrorKind::BadRequest,
            AuthError::InvalidCredentials
            | AuthError::SessionInvalid
            | AuthError::SessionFingerprintMismatch => ErrorKind::Unauthorized,
            AuthError::Forbidden | AuthError::AdminRequired => ErrorKind::Forbidden,
            AuthError::Database(_) | AuthError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    /// Client-facing form. Infrastructure details stay in the logs.
    pub fn to_app_error(&self) -> AppError {
        match self {
            AuthError::Database(_) | AuthError::Internal(_) => {
                AppError::internal("An unexpected error occurred")
            }
            AuthError::SessionInvalid | AuthError::SessionFingerprintMismatch => {
                AppError::new(self.kind(), "Authentication required").with_action("Please log in")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    /// Maps constraint violations onto domain errors.
    pub(crate) fn from_constraint(err: sqlx::Error) -> Self {
        match conversions::sqlstate(&err).as_deref() {
            Some(conversions::pg_code::UNIQUE_VIOLATION) => AuthError::UserNameTaken,
            Some(conversions::pg_code::FOREIGN_KEY_VIOLATION) => AuthError::UserHasPosts,
            _ => AuthError::Database(err),
        }
    }

    fn log(&self) {
        match self {
            AuthError::Database(e) => tracing::error!(error = %e, "Auth database error"),
            AuthError::Internal(msg) => tracing::error!(message = %msg, "Auth internal error"),
            AuthError::InvalidCredentials => tracing::warn!("Invalid login attempt"),
            AuthError::SessionFingerprintMismatch => {
                tracing::warn!("Session fingerprint mismatch detected")
            }
            AuthError::Forbidden | AuthError::AdminRequired => {
                tracing::info!(error = %self, "Auth request forbidden")
            }
            _ => tracing::debug!(error = %self, "Auth error"),
        }
    }
}

impl IntoResponse for AuthError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

impl From<AppError> for AuthError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => AuthError::Validation(err.message().to_string()),
            _ => AuthError::Internal(err.to_string()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(AuthError::Validation("x".into()).status_code(), 400);
        assert_eq!(AuthError::UserNameTaken.status_code(), 400);
        assert_eq!(AuthError::PasswordMismatch.status_code(), 400);
        assert_eq!(AuthError::InvalidCredentials.status_code(), 401);
        assert_eq!(AuthError::SessionInvalid.status_code(), 401);
        assert_eq!(AuthError::Forbidden.status_code(), 403);
        assert_eq!(AuthError::AdminRequired.status_code(), 403);
        assert_eq!(AuthError::UserNotFound.status_code(), 404);
        assert_eq!(AuthError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn internal_details_are_not_exposed() {
        let app = AuthError::Internal("connection string leaked".into()).to_app_error();
        assert!(!app.message().contains("connection string"));
    }

    #[test]
    fn non_database_errors_pass_through_constraint_mapping() {
        assert!(matches!(
            AuthError::from_constraint(sqlx::Error::RowNotFound),
            AuthError::Database(_)
        ));
    }
}
