//! HTTP Handlers

use std::sync::Arc;

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use platform::clock::Clock;

use crate::application::{
    CreateCourseInput, CreateCourseUseCase, GetCourseUseCase, ListCoursesUseCase,
    UpdateCourseUseCase,
};
use crate::domain::repository::CourseRepository;
use crate::error::CourseResult;
use crate::presentation::dto::{
    CourseDetailResponse, CourseEnvelope, CourseListResponse, CourseMutationResponse,
    CourseRequest, CourseResponse, CourseSummaryResponse, ListCoursesQuery,
};

pub struct CourseAppState<R> {
    pub repo: Arc<R>,
    pub clock: Arc<dyn Clock>,
}

impl<R> Clone for CourseAppState<R> {
    fn clone(&self) -> Self {
        Self {
            repo: self.repo.clone(),
            clock: self.clock.clone(),
        }
    }
}

/// POST /api/courses
pub async fn create_course<R>(
    State(state): State<CourseAppState<R>>,
    Json(req): Json<CourseRequest>,
) -> CourseResult<(StatusCode, Json<CourseMutationResponse>)>
where
    R: CourseRepository + Send + Sync + 'static,
{
    let (course, created_by) = req.into_input();
    let use_case = CreateCourseUseCase::new(state.repo.clone(), state.clock.clone());
    let course = use_case
        .execute(CreateCourseInput { course, created_by })
        .await?;

    Ok((
        StatusCode::CREATED,
        Json(CourseMutationResponse {
            message: "Course created successfully".to_string(),
            course: CourseResponse::from(&course),
        }),
    ))
}

/// GET /api/courses?teacherId=...
pub async fn list_courses<R>(
    State(state): State<CourseAppState<R>>,
    Query(query): Query<ListCoursesQuery>,
) -> CourseResult<Json<CourseListResponse>>
where
    R: CourseRepository + Send + Sync + 'static,
{
    let courses = ListCoursesUseCase::new(state.repo.clone())
        .execute(query.teacher_id.as_deref())
        .await?;

    Ok(Json(CourseListResponse {
        courses: courses.iter().map(CourseSummaryResponse::from).collect(),
    }))
}

/// GET /api/courses/{id}
pub async fn get_course<R>(
    State(state): State<CourseAppState<R>>,
    Path(id): Path<String>,
) -> CourseResult<Json<CourseEnvelope>>
where
    R: CourseRepository + Send + Sync + 'static,
{
    let course = GetCourseUseCase::new(state.repo.clone()).execute(&id).await?;
    Ok(Json(CourseEnvelope {
        course: CourseDetailResponse::from(&course),
    }))
}

/// PUT /api/courses/{id}
pub async fn update_course<R>(
    State(state): State<CourseAppState<R>>,
    Path(id): Path<String>,
    Json(req): Json<CourseRequest>,
) -> CourseResult<Json<CourseMutationResponse>>
where
    R: CourseRepository + Send + Sync + 'static,
{
    let (input, _) = req.into_input();
    let use_case = UpdateCourseUseCase::new(state.repo.clone(), state.clock.clone());
    let course = use_case.execute(&id, input).await?;

    Ok(Json(CourseMutationResponse {
        message: "Course updated successfully".to_string(),
        course: CourseResponse::from(&course),
    }))
}
