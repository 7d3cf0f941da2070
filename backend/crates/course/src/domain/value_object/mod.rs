//! Value Objects

pub mod course_code;
pub mod course_module;
pub mod points;

pub use course_code::CourseCode;
pub use course_module::{CourseModule, CourseModules, ModuleKind};
pub use points::Points;
