//! Get Course Use Case

use std::sync::Arc;

use kernel::id::CourseId;

use crate::domain::repository::{AuthoredCourse, CourseRepository};
use crate::error::{CourseError, CourseResult};

pub struct GetCourseUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
}

impl<R> GetCourseUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>) -> Self {
        Self { repo }
    }

    /// A malformed id is reported as not found
    pub async fn execute(&self, course_id: &str) -> CourseResult<AuthoredCourse> {
        let course_id = CourseId::parse_str(course_id).ok_or(CourseError::NotFound)?;
        self.repo
            .find_by_id(&course_id)
            .await?
            .ok_or(CourseError::NotFound)
    }
}
