//! Course Code Value Object
//!
//! The user-facing course identifier (`courseId` on the wire), unique across
//! the catalog. Distinct from the internal `CourseId`.

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

const COURSE_CODE_MAX_LENGTH: usize = 64;

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct CourseCode(String);

impl CourseCode {
    /// Trimmed, 1 to 64 characters, no control characters
    pub fn new(code: impl Into<String>) -> AppResult<Self> {
        let code = code.into();
        let code = code.trim();

        if code.is_empty() {
            return Err(AppError::bad_request("Course ID is required"));
        }
        if code.chars().count() > COURSE_CODE_MAX_LENGTH {
            return Err(AppError::bad_request(format!(
                "Course ID must be at most {} characters",
                COURSE_CODE_MAX_LENGTH
            )));
        }
        if code.chars().any(char::is_control) {
            return Err(AppError::bad_request("Course ID contains invalid characters"));
        }

        Ok(Self(code.to_string()))
    }

    pub fn from_db(code: impl Into<String>) -> Self {
        Self(code.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for CourseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}
