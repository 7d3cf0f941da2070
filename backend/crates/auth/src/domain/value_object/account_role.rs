use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Role chosen at registration
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AccountRole {
    #[default]
    Student,
    Teacher,
}

impl AccountRole {
    #[inline]
    pub const fn code(&self) -> &'static str {
        match self {
            AccountRole::Student => "student",
            AccountRole::Teacher => "teacher",
        }
    }

    /// Parse user input; blank input means the default role
    pub fn parse(input: Option<&str>) -> AppResult<Self> {
        match input.map(str::trim).filter(|s| !s.is_empty()) {
            None => Ok(Self::default()),
            Some(code) => Self::from_code(&code.to_ascii_lowercase()).ok_or_else(|| {
                AppError::bad_request("Role must be either 'student' or 'teacher'")
            }),
        }
    }

    #[inline]
    pub fn from_code(code: &str) -> Option<Self> {
        match code {
            "student" => Some(AccountRole::Student),
            "teacher" => Some(AccountRole::Teacher),
            _ => None,
        }
    }
}

impl fmt::Display for AccountRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.code())
    }
}
