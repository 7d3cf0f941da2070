//! Domain Layer
//!
//! Entities, value objects, pure domain services and the ports
//! (repository, notifier) implemented in the infrastructure layer.

pub mod entity;
pub mod notifier;
pub mod repository;
pub mod service;
pub mod value_object;

// Re-exports
pub use entity::account::Account;
pub use notifier::VerificationNotifier;
pub use repository::{AccountRepository, VerificationFields};
