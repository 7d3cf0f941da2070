//! Update Course Use Case

use std::sync::Arc;

use kernel::id::CourseId;
use platform::clock::Clock;

use crate::application::input::CourseInput;
use crate::domain::entity::course::Course;
use crate::domain::repository::CourseRepository;
use crate::error::{CourseError, CourseResult};

pub struct UpdateCourseUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> UpdateCourseUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(&self, course_id: &str, input: CourseInput) -> CourseResult<Course> {
        let content = input.validate()?;
        let course_id = CourseId::parse_str(course_id).ok_or(CourseError::NotFound)?;

        let mut course = self
            .repo
            .find_by_id(&course_id)
            .await?
            .ok_or(CourseError::NotFound)?
            .course;

        if content.code != course.code {
            let taken = self
                .repo
                .find_by_code(&content.code)
                .await?
                .is_some_and(|other| other.course_id != course.course_id);
            if taken {
                return Err(CourseError::DuplicateCode);
            }
        }

        course.apply(content, self.clock.now());
        if !self.repo.update(&course).await? {
            return Err(CourseError::NotFound);
        }

        tracing::info!(course_id = %course.course_id, code = %course.code, "Course updated");
        Ok(course)
    }
}
