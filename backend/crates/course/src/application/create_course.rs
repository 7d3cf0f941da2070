//! Create Course Use Case

use std::sync::Arc;

use kernel::id::AccountId;
use platform::clock::Clock;

use crate::application::input::CourseInput;
use crate::domain::entity::course::Course;
use crate::domain::repository::CourseRepository;
use crate::error::{CourseError, CourseResult};

pub struct CreateCourseInput {
    pub course: CourseInput,
    pub created_by: String,
}

pub struct CreateCourseUseCase<R>
where
    R: CourseRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> CreateCourseUseCase<R>
where
    R: CourseRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(&self, input: CreateCourseInput) -> CourseResult<Course> {
        if input.created_by.trim().is_empty() {
            return Err(CourseError::Validation("Missing required fields".to_string()));
        }
        let content = input.course.validate()?;
        let created_by = AccountId::parse_str(&input.created_by)
            .ok_or_else(|| CourseError::Validation("Invalid course author".to_string()))?;

        if !self.repo.author_exists(&created_by).await? {
            return Err(CourseError::UnknownAuthor);
        }
        if self.repo.find_by_code(&content.code).await?.is_some() {
            return Err(CourseError::DuplicateCode);
        }

        let course = Course::create(content, created_by, self.clock.now());
        self.repo.create(&course).await?;

        tracing::info!(
            course_id = %course.course_id,
            code = %course.code,
            created_by = %course.created_by,
            "Course created"
        );
        Ok(course)
    }
}
