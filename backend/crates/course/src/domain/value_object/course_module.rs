//! Course Modules
//!
//! A course holds between one and ten modules, kept sorted by `order`.

use kernel::error::app_error::{AppError, AppResult};
use serde::{Deserialize, Serialize};

pub const MIN_MODULES: usize = 1;
pub const MAX_MODULES: usize = 10;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ModuleKind {
    Text,
    Video,
}

impl ModuleKind {
    pub fn parse(input: &str) -> AppResult<Self> {
        match input.trim().to_ascii_lowercase().as_str() {
            "text" => Ok(ModuleKind::Text),
            "video" => Ok(ModuleKind::Video),
            _ => Err(AppError::bad_request(
                "Module type must be either 'text' or 'video'",
            )),
        }
    }
}

/// One unit of course content; `content` is text or a video URL
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseModule {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: ModuleKind,
    pub content: String,
    pub order: i32,
}

impl CourseModule {
    pub fn new(title: &str, kind: &str, content: &str, order: i32) -> AppResult<Self> {
        let title = title.trim();
        if title.is_empty() {
            return Err(AppError::bad_request("Module title is required"));
        }
        if content.trim().is_empty() {
            return Err(AppError::bad_request("Module content is required"));
        }
        Ok(Self {
            title: title.to_string(),
            kind: ModuleKind::parse(kind)?,
            content: content.to_string(),
            order,
        })
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CourseModules(Vec<CourseModule>);

impl CourseModules {
    pub fn new(mut modules: Vec<CourseModule>) -> AppResult<Self> {
        if !(MIN_MODULES..=MAX_MODULES).contains(&modules.len()) {
            return Err(AppError::bad_request(format!(
                "A course must have between {} and {} modules",
                MIN_MODULES, MAX_MODULES
            )));
        }
        modules.sort_by_key(|m| m.order);
        Ok(Self(modules))
    }

    pub fn from_db(modules: Vec<CourseModule>) -> Self {
        Self(modules)
    }

    pub fn as_slice(&self) -> &[CourseModule] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}
