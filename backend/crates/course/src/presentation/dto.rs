//! API DTOs

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, CourseId};
use serde::{Deserialize, Serialize};

use crate::application::{CourseInput, ModuleInput};
use crate::domain::entity::course::Course;
use crate::domain::repository::AuthoredCourse;
use crate::domain::value_object::CourseModule;

const UNKNOWN_AUTHOR_NAME: &str = "Unknown";

// ============================================================================
// Requests
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ModuleRequest {
    pub title: String,
    #[serde(rename = "type")]
    pub kind: String,
    pub content: String,
    pub order: Option<i32>,
}

/// Body of create and update; `createdBy` is ignored on update
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CourseRequest {
    pub name: String,
    pub course_id: String,
    pub points: Option<i64>,
    pub description: String,
    pub modules: Vec<ModuleRequest>,
    pub created_by: String,
}

impl CourseRequest {
    pub fn into_input(self) -> (CourseInput, String) {
        let input = CourseInput {
            name: self.name,
            code: self.course_id,
            points: self.points,
            description: self.description,
            modules: self
                .modules
                .into_iter()
                .map(|m| ModuleInput {
                    title: m.title,
                    kind: m.kind,
                    content: m.content,
                    order: m.order,
                })
                .collect(),
        };
        (input, self.created_by)
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ListCoursesQuery {
    pub teacher_id: Option<String>,
}

// ============================================================================
// Responses
// ============================================================================

#[derive(Debug, Clone, Serialize)]
pub struct AuthorResponse {
    pub id: AccountId,
    pub name: String,
}

impl AuthorResponse {
    fn of(course: &AuthoredCourse) -> Self {
        Self {
            id: course.course.created_by,
            name: course
                .author_name
                .clone()
                .unwrap_or_else(|| UNKNOWN_AUTHOR_NAME.to_string()),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseResponse {
    pub id: CourseId,
    pub name: String,
    pub course_id: String,
    pub points: i32,
    pub description: String,
    pub modules: Vec<CourseModule>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<&Course> for CourseResponse {
    fn from(course: &Course) -> Self {
        Self {
            id: course.course_id,
            name: course.name.clone(),
            course_id: course.code.as_str().to_string(),
            points: course.points.value(),
            description: course.description.clone(),
            modules: course.modules.as_slice().to_vec(),
            created_at: course.created_at,
            updated_at: course.updated_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseMutationResponse {
    pub message: String,
    pub course: CourseResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseDetailResponse {
    #[serde(flatten)]
    pub course: CourseResponse,
    pub created_by: AuthorResponse,
}

impl From<&AuthoredCourse> for CourseDetailResponse {
    fn from(authored: &AuthoredCourse) -> Self {
        Self {
            course: CourseResponse::from(&authored.course),
            created_by: AuthorResponse::of(authored),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseEnvelope {
    pub course: CourseDetailResponse,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CourseSummaryResponse {
    pub id: CourseId,
    pub name: String,
    pub course_id: String,
    pub points: i32,
    pub description: String,
    pub module_count: usize,
    pub created_by: AuthorResponse,
    pub created_at: DateTime<Utc>,
}

impl From<&AuthoredCourse> for CourseSummaryResponse {
    fn from(authored: &AuthoredCourse) -> Self {
        let course = &authored.course;
        Self {
            id: course.course_id,
            name: course.name.clone(),
            course_id: course.code.as_str().to_string(),
            points: course.points.value(),
            description: course.description.clone(),
            module_count: course.modules.len(),
            created_by: AuthorResponse::of(authored),
            created_at: course.created_at,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CourseListResponse {
    pub courses: Vec<CourseSummaryResponse>,
}
