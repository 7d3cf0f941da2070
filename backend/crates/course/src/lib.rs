//! Course Catalog Backend Module
//!
//! Teachers publish courses made of one to ten ordered modules; anyone can
//! browse them. Layout mirrors the `auth` crate:
//! `domain/` → `application/` → `infra/` → `presentation/`.

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;


pub use error::{CourseError, CourseResult};
pub use infra::PgCourseRepository;
pub use presentation::router::{course_router, course_router_generic};
