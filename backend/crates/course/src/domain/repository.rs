//! Repository Trait

use kernel::id::{AccountId, CourseId};

use crate::domain::entity::course::Course;
use crate::domain::value_object::CourseCode;
use crate::error::CourseResult;

/// A course with its author's display name (`None` when the author is gone)
#[derive(Debug, Clone)]
pub struct AuthoredCourse {
    pub course: Course,
    pub author_name: Option<String>,
}

#[trait_variant::make(CourseRepository: Send)]
pub trait LocalCourseRepository {
    /// `DuplicateCode` when the code is taken, `UnknownAuthor` when
    /// `created_by` names no account
    async fn create(&self, course: &Course) -> CourseResult<()>;

    async fn find_by_id(&self, course_id: &CourseId) -> CourseResult<Option<AuthoredCourse>>;

    async fn find_by_code(&self, code: &CourseCode) -> CourseResult<Option<Course>>;

    /// Newest first, optionally only one author's courses
    async fn list(&self, created_by: Option<&AccountId>) -> CourseResult<Vec<AuthoredCourse>>;

    /// `Ok(false)` when the course no longer exists
    async fn update(&self, course: &Course) -> CourseResult<bool>;

    async fn author_exists(&self, account_id: &AccountId) -> CourseResult<bool>;
}
