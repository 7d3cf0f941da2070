//! Course Input Validation
//!
//! Create and update share the editable fields and their rules.

use crate::domain::entity::course::CourseContent;
use crate::domain::value_object::{CourseCode, CourseModule, CourseModules, Points};
use crate::error::{CourseError, CourseResult};

#[derive(Debug, Clone, Default)]
pub struct ModuleInput {
    pub title: String,
    pub kind: String,
    pub content: String,
    /// Defaults to the 1-based position in the submitted list
    pub order: Option<i32>,
}

#[derive(Debug, Clone, Default)]
pub struct CourseInput {
    pub name: String,
    pub code: String,
    pub points: Option<i64>,
    pub description: String,
    pub modules: Vec<ModuleInput>,
}

impl CourseInput {
    pub fn validate(self) -> CourseResult<CourseContent> {
        if self.name.trim().is_empty()
            || self.code.trim().is_empty()
            || self.points.is_none()
            || self.description.trim().is_empty()
            || self.modules.is_empty()
        {
            return Err(CourseError::Validation("Missing required fields".to_string()));
        }

        let code = CourseCode::new(self.code)?;
        let points = Points::new(self.points.unwrap_or_default())?;

        let modules = self
            .modules
            .iter()
            .zip(1..)
            .map(|(m, position)| {
                CourseModule::new(&m.title, &m.kind, &m.content, m.order.unwrap_or(position))
            })
            .collect::<Result<Vec<_>, _>>()?;

        Ok(CourseContent {
            code,
            name: self.name.trim().to_string(),
            points,
            description: self.description.trim().to_string(),
            modules: CourseModules::new(modules)?,
        })
    }
}
