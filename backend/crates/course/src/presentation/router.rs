//! Course Router

use std::sync::Arc;

use axum::{
    Router,
    routing::{get, post},
};
use platform::clock::{Clock, SystemClock};

use crate::domain::repository::CourseRepository;
use crate::infra::PgCourseRepository;
use crate::presentation::handlers::{self, CourseAppState};

/// Create the Course router with the PostgreSQL repository
pub fn course_router(repo: PgCourseRepository) -> Router {
    course_router_generic(repo, Arc::new(SystemClock))
}

/// Create a generic Course router for any repository implementation
pub fn course_router_generic<R>(repo: R, clock: Arc<dyn Clock>) -> Router
where
    R: CourseRepository + Send + Sync + 'static,
{
    let state = CourseAppState {
        repo: Arc::new(repo),
        clock,
    };

    Router::new()
        .route(
            "/",
            post(handlers::create_course::<R>).get(handlers::list_courses::<R>),
        )
        .route(
            "/{id}",
            get(handlers::get_course::<R>).put(handlers::update_course::<R>),
        )
        .with_state(state)
}
