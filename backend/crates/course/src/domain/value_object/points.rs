//! Course Points

use kernel::error::app_error::{AppError, AppResult};
use serde::Serialize;

/// Credit points awarded for a course; zero is allowed
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(transparent)]
pub struct Points(i32);

impl Points {
    pub fn new(value: i64) -> AppResult<Self> {
        if value < 0 {
            return Err(AppError::bad_request("Points must be a non-negative number"));
        }
        i32::try_from(value)
            .map(Self)
            .map_err(|_| AppError::bad_request("Points value is too large"))
    }

    pub fn from_db(value: i32) -> Self {
        Self(value)
    }

    pub fn value(&self) -> i32 {
        self.0
    }
}
