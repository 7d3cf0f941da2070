//! List Courses Use Case

use std::sync::Arc;

use kernel::id::AccountId;

use crate::domain::repository::{AuthoredCourse, CourseRepository};
use crate::error::{CourseError, CourseResult};

pub struct ListCoursesUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
}

impl<R> ListCoursesUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    pub async fn execute(&self, teacher_id: Option<&str>) -> CourseResult<Vec<AuthoredCourse>> {
        let author = match teacher_id.map(str::trim).filter(|s| !s.is_empty()) {
            None => None,
            Some(raw) => Some(
                AccountId::parse_str(raw)
                    .ok_or_else(|| CourseError::Validation("Invalid teacherId".to_string()))?,
            ),
        };
        self.repo.list(author.as_ref()).await
    }
}
