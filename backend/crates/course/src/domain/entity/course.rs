//! Course Entity

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, CourseId};

use crate::domain::value_object::{CourseCode, CourseModules, Points};

#[derive(Debug, Clone, PartialEq)]
pub struct Course {
    pub course_id: CourseId,
    pub code: CourseCode,
    pub name: String,
    pub points: Points,
    pub description: String,
    pub created_by: AccountId,
    pub modules: CourseModules,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

/// Editable fields, already validated
#[derive(Debug, Clone)]
pub struct CourseContent {
    pub code: CourseCode,
    pub name: String,
    pub points: Points,
    pub description: String,
    pub modules: CourseModules,
}

impl Course {
    pub fn create(content: CourseContent, created_by: AccountId, now: DateTime<Utc>) -> Self {
        Self {
            course_id: CourseId::new(),
            code: content.code,
            name: content.name,
            points: content.points,
            description: content.description,
            created_by,
            modules: content.modules,
            created_at: now,
            updated_at: now,
        }
    }

    /// Replace the editable fields; author and creation time are kept
    pub fn apply(&mut self, content: CourseContent, now: DateTime<Utc>) {
        self.code = content.code;
        self.name = content.name;
        self.points = content.points;
        self.description = content.description;
        self.modules = content.modules;
        self.updated_at = now;
    }
}
