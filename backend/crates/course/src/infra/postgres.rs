//! PostgreSQL Course Repository

use chrono::{DateTime, Utc};
use kernel::id::{AccountId, CourseId};
use platform::database::{DatabaseConfig, shared_pool};
use sqlx::PgPool;
use sqlx::types::Json;
use uuid::Uuid;

use crate::domain::entity::course::Course;
use crate::domain::repository::{AuthoredCourse, CourseRepository};
use crate::domain::value_object::{CourseCode, CourseModule, CourseModules, Points};
use crate::error::{CourseError, CourseResult};

#[derive(Clone, Debug)]
pub struct PgCourseRepository {
    db: DatabaseConfig,
}

impl PgCourseRepository {
    pub fn new(db: DatabaseConfig) -> Self {
        Self { db }
    }

    async fn pool(&self) -> CourseResult<PgPool> {
        Ok(shared_pool(&self.db).await?)
    }
}

/// Constraint violations that have a meaning for the caller
fn map_write_error(err: sqlx::Error) -> CourseError {
    if let sqlx::Error::Database(db) = &err {
        if db.is_unique_violation() {
            return CourseError::DuplicateCode;
        }
        if db.is_foreign_key_violation() {
            return CourseError::UnknownAuthor;
        }
    }
    err.into()
}

impl CourseRepository for PgCourseRepository {
    async fn create(&self, course: &Course) -> CourseResult<()> {
        let pool = self.pool().await?;

        sqlx::query(
            r#"
            INSERT INTO courses (
                course_id,
                code,
                name,
                points,
                description,
                created_by,
                modules,
                created_at,
                updated_at
            ) VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            "#,
        )
        .bind(course.course_id.as_uuid())
        .bind(course.code.as_str())
        .bind(&course.name)
        .bind(course.points.value())
        .bind(&course.description)
        .bind(course.created_by.as_uuid())
        .bind(Json(course.modules.as_slice()))
        .bind(course.created_at)
        .bind(course.updated_at)
        .execute(&pool)
        .await
        .map_err(map_write_error)?;

        Ok(())
    }

    async fn find_by_id(&self, course_id: &CourseId) -> CourseResult<Option<AuthoredCourse>> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                c.course_id,
                c.code,
                c.name,
                c.points,
                c.description,
                c.created_by,
                c.modules,
                c.created_at,
                c.updated_at,
                a.display_name AS author_name
            FROM courses c
            LEFT JOIN accounts a ON a.account_id = c.created_by
            WHERE c.course_id = $1
            "#,
        )
        .bind(course_id.as_uuid())
        .fetch_optional(&pool)
        .await?;

        Ok(row.map(CourseRow::into_authored))
    }

    async fn find_by_code(&self, code: &CourseCode) -> CourseResult<Option<Course>> {
        let pool = self.pool().await?;
        let row = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                course_id,
                code,
                name,
                points,
                description,
                created_by,
                modules,
                created_at,
                updated_at,
                NULL::text AS author_name
            FROM courses
            WHERE code = $1
            "#,
        )
        .bind(code.as_str())
        .fetch_optional(&pool)
        .await?;

        Ok(row.map(|r| r.into_authored().course))
    }

    async fn list(&self, created_by: Option<&AccountId>) -> CourseResult<Vec<AuthoredCourse>> {
        let pool = self.pool().await?;
        let rows = sqlx::query_as::<_, CourseRow>(
            r#"
            SELECT
                c.course_id,
                c.code,
                c.name,
                c.points,
                c.description,
                c.created_by,
                c.modules,
                c.created_at,
                c.updated_at,
                a.display_name AS author_name
            FROM courses c
            LEFT JOIN accounts a ON a.account_id = c.created_by
            WHERE ($1::uuid IS NULL OR c.created_by = $1)
            ORDER BY c.created_at DESC
            "#,
        )
        .bind(created_by.map(|id| *id.as_uuid()))
        .fetch_all(&pool)
        .await?;

        Ok(rows.into_iter().map(CourseRow::into_authored).collect())
    }

    async fn update(&self, course: &Course) -> CourseResult<bool> {
        let pool = self.pool().await?;

        let result = sqlx::query(
            r#"
            UPDATE courses
            SET code = $2,
                name = $3,
                points = $4,
                description = $5,
                modules = $6,
                updated_at = $7
            WHERE course_id = $1
            "#,
        )
        .bind(course.course_id.as_uuid())
        .bind(course.code.as_str())
        .bind(&course.name)
        .bind(course.points.value())
        .bind(&course.description)
        .bind(Json(course.modules.as_slice()))
        .bind(course.updated_at)
        .execute(&pool)
        .await
        .map_err(map_write_error)?;

        Ok(result.rows_affected() == 1)
    }

    async fn author_exists(&self, account_id: &AccountId) -> CourseResult<bool> {
        let pool = self.pool().await?;
        let exists: bool =
            sqlx::query_scalar("SELECT EXISTS (SELECT 1 FROM accounts WHERE account_id = $1)")
                .bind(account_id.as_uuid())
                .fetch_one(&pool)
                .await?;
        Ok(exists)
    }
}

// ============================================================================
// Row Types
// ============================================================================

#[derive(sqlx::FromRow)]
struct CourseRow {
    course_id: Uuid,
    code: String,
    name: String,
    points: i32,
    description: String,
    created_by: Uuid,
    modules: Json<Vec<CourseModule>>,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    author_name: Option<String>,
}

impl CourseRow {
    fn into_authored(self) -> AuthoredCourse {
        AuthoredCourse {
            course: Course {
                course_id: CourseId::from_uuid(self.course_id),
                code: CourseCode::from_db(self.code),
                name: self.name,
                points: Points::from_db(self.points),
                description: self.description,
                created_by: AccountId::from_uuid(self.created_by),
                modules: CourseModules::from_db(self.modules.0),
                created_at: self.created_at,
                updated_at: self.updated_at,
            },
            author_name: self.author_name,
        }
    }
}
