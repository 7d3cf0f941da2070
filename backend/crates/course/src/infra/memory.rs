//! In-Memory Course Repository
//!
//! Authors are registered explicitly; in PostgreSQL they come from the
//! `accounts` table.

use std::collections::HashMap;
use std::sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard};

use kernel::id::{AccountId, CourseId};

use crate::domain::entity::course::Course;
use crate::domain::repository::{AuthoredCourse, CourseRepository};
use crate::domain::value_object::CourseCode;
use crate::error::{CourseError, CourseResult};

#[derive(Default)]
struct Catalog {
    courses: HashMap<CourseId, Course>,
    authors: HashMap<AccountId, String>,
}

impl Catalog {
    fn authored(&self, course: &Course) -> AuthoredCourse {
        AuthoredCourse {
            course: course.clone(),
            author_name: self.authors.get(&course.created_by).cloned(),
        }
    }
}

#[derive(Clone, Default)]
pub struct InMemoryCourseRepository {
    catalog: Arc<RwLock<Catalog>>,
}

impl InMemoryCourseRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_author(&self, account_id: AccountId, name: impl Into<String>) {
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.authors.insert(account_id, name.into());
        }
    }

    pub fn remove_author(&self, account_id: &AccountId) {
        if let Ok(mut catalog) = self.catalog.write() {
            catalog.authors.remove(account_id);
        }
    }

    fn read(&self) -> CourseResult<RwLockReadGuard<'_, Catalog>> {
        self.catalog
            .read()
            .map_err(|_| CourseError::Internal("course store lock poisoned".to_string()))
    }

    fn write(&self) -> CourseResult<RwLockWriteGuard<'_, Catalog>> {
        self.catalog
            .write()
            .map_err(|_| CourseError::Internal("course store lock poisoned".to_string()))
    }
}

impl CourseRepository for InMemoryCourseRepository {
    async fn create(&self, course: &Course) -> CourseResult<()> {
        let mut catalog = self.write()?;
        if !catalog.authors.contains_key(&course.created_by) {
            return Err(CourseError::UnknownAuthor);
        }
        if catalog.courses.values().any(|c| c.code == course.code) {
            return Err(CourseError::DuplicateCode);
        }
        catalog.courses.insert(course.course_id, course.clone());
        Ok(())
    }

    async fn find_by_id(&self, course_id: &CourseId) -> CourseResult<Option<AuthoredCourse>> {
        let catalog = self.read()?;
        Ok(catalog.courses.get(course_id).map(|c| catalog.authored(c)))
    }

    async fn find_by_code(&self, code: &CourseCode) -> CourseResult<Option<Course>> {
        Ok(self
            .read()?
            .courses
            .values()
            .find(|c| &c.code == code)
            .cloned())
    }

    async fn list(&self, created_by: Option<&AccountId>) -> CourseResult<Vec<AuthoredCourse>> {
        let catalog = self.read()?;
        let mut courses: Vec<AuthoredCourse> = catalog
            .courses
            .values()
            .filter(|c| created_by.is_none_or(|author| &c.created_by == author))
            .map(|c| catalog.authored(c))
            .collect();
        courses.sort_by(|a, b| b.course.created_at.cmp(&a.course.created_at));
        Ok(courses)
    }

    async fn update(&self, course: &Course) -> CourseResult<bool> {
        let mut catalog = self.write()?;
        if catalog
            .courses
            .values()
            .any(|c| c.code == course.code && c.course_id != course.course_id)
        {
            return Err(CourseError::DuplicateCode);
        }
        match catalog.courses.get_mut(&course.course_id) {
            Some(stored) => {
                *stored = course.clone();
                Ok(true)
            }
            None => Ok(false),
        }
    }

    async fn author_exists(&self, account_id: &AccountId) -> CourseResult<bool> {
        Ok(self.read()?.authors.contains_key(account_id))
    }
}
