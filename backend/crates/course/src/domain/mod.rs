//! Domain Layer
//!
//! Course entity, value objects and the repository trait.

pub mod entity;
pub mod repository;
pub mod value_object;

pub use entity::course::Course;
pub use repository::{AuthoredCourse, CourseRepository};
