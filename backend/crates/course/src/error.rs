//! Course Error Types

use axum::response::{IntoResponse, Response};
use kernel::error::{
    app_error::AppError,
    conversions::{STORE_UNAVAILABLE_MESSAGE, is_store_unavailable},
    kind::ErrorKind,
};
use thiserror::Error;

pub type CourseResult<T> = Result<T, CourseError>;

#[derive(Debug, Error)]
pub enum CourseError {
    #[error("{0}")]
    Validation(String),

    /// `createdBy` does not name an existing account
    #[error("Unknown course author")]
    UnknownAuthor,

    #[error("A course with this ID already exists")]
    DuplicateCode,

    #[error("Course not found")]
    NotFound,

    #[error("Database unavailable: {0}")]
    StoreUnavailable(#[source] sqlx::Error),

    #[error("Database error: {0}")]
    Database(#[source] sqlx::Error),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl CourseError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            CourseError::Validation(_) | CourseError::UnknownAuthor => ErrorKind::BadRequest,
            CourseError::DuplicateCode => ErrorKind::Conflict,
            CourseError::NotFound => ErrorKind::NotFound,
            CourseError::StoreUnavailable(_) => ErrorKind::ServiceUnavailable,
            CourseError::Database(_) | CourseError::Internal(_) => ErrorKind::InternalServerError,
        }
    }

    pub fn to_app_error(&self) -> AppError {
        match self {
            CourseError::StoreUnavailable(_) => {
                AppError::new(self.kind(), STORE_UNAVAILABLE_MESSAGE)
            }
            CourseError::Database(_) | CourseError::Internal(_) => {
                AppError::new(self.kind(), "Internal server error")
            }
            _ => AppError::new(self.kind(), self.to_string()),
        }
    }

    fn log(&self) {
        match self {
            CourseError::StoreUnavailable(e) => {
                tracing::error!(error = %e, "Course store unavailable");
            }
            CourseError::Database(e) => {
                tracing::error!(error = %e, "Course database error");
            }
            CourseError::Internal(msg) => {
                tracing::error!(message = %msg, "Course internal error");
            }
            _ => {
                tracing::debug!(error = %self, "Course request rejected");
            }
        }
    }
}

impl From<sqlx::Error> for CourseError {
    fn from(err: sqlx::Error) -> Self {
        if is_store_unavailable(&err) {
            CourseError::StoreUnavailable(err)
        } else {
            CourseError::Database(err)
        }
    }
}

impl From<AppError> for CourseError {
    fn from(err: AppError) -> Self {
        match err.kind() {
            ErrorKind::BadRequest => CourseError::Validation(err.message().to_string()),
            _ => CourseError::Internal(err.to_string()),
        }
    }
}

impl IntoResponse for CourseError {
    fn into_response(self) -> Response {
        self.log();
        self.to_app_error().into_response()
    }
}
