//! Blog error types.

use axum::response::{IntoResponse, Response};
use http::StatusCode;
use kernel::error::{app_error::AppError, kind::ErrorKind};
use thiserror::Error;

pub type BlogResult<T> = Result<T, BlogError>;

#[derive(Debug, Error)]
pub enum BlogError {
    #[error("Post not found")]
    PostNotFound,

    /// Neither the author nor an administrator.
    #[error("You are not allowed to modify this post")]
    Forbidden,

    #[error("Authentication required")]
    Unauthenticated,

    #[error("{0}")]
    Validation(String),

    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl BlogError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            BlogError::PostNotFound => ErrorKind::NotFound,
            BlogError::Forbidden => ErrorKind::Forbidden,
            BlogError::Unauthenticated => ErrorKind::Unauthorized,
            BlogError::Validation(_) => ErrorKind::BadRequest,
            BlogError::Database(_) | BlogError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn status_code(&self) -> StatusCode {
        StatusCode::from_u16(self.kind().status_code())
            .unwrap_or(StatusCode::INTERNAL_SERVER_ERROR)
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            BlogError::Database(_) | BlogError::Internal(_) => {
                AppError::internal("An unexpected error occurred")
            }
            BlogError::Unauthenticated => {
                AppError::unauthorized(self.to_string()).with_action("Please log in")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            BlogError::Database(e) => tracing::error!(error = %e, "Blog database error"),
            BlogError::Internal(msg) => tracing::error!(message = %msg, "Blog internal error"),
            BlogError::Forbidden => tracing::info!("Post modification forbidden"),
            _ => tracing::debug!(error = %self, "Blog error"),
        }
    }
}

impl IntoResponse for BlogError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn taxonomy_maps_to_status_codes() {
        assert_eq!(BlogError::Validation("x".into()).status_code(), 400);
        assert_eq!(BlogError::Unauthenticated.status_code(), 401);
        assert_eq!(BlogError::Forbidden.status_code(), 403);
        assert_eq!(BlogError::PostNotFound.status_code(), 404);
        assert_eq!(BlogError::Internal("x".into()).status_code(), 500);
    }

    #[test]
    fn infrastructure_details_are_hidden() {
        let hidden = BlogError::Internal("pool exhausted".into()).to_app_error();
        assert!(!hidden.message().contains("pool"));
    }
}
