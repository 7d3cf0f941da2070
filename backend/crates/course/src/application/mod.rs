//! Application Layer
//!
//! Course catalog use cases.

pub mod create_course;
pub mod get_course;
pub mod input;
pub mod list_courses;
pub mod update_course;

// Re-exports
pub use create_course::{CreateCourseInput, CreateCourseUseCase};
pub use get_course::GetCourseUseCase;
pub use input::{CourseInput, ModuleInput};
pub use list_courses::ListCoursesUseCase;
pub use update_course::UpdateCourseUseCase;
