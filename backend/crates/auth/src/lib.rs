//! Account Verification Backend Module
//!
//! Clean Architecture structure:
//! - `domain/` - Business logic, entities, repository and notifier traits
//! - `application/` - Use cases and application services
//! - `infra/` - PostgreSQL repository, SMTP notifier (in-memory doubles in test builds)
//! - `presentation/` - HTTP handlers, DTOs, router
//!
//! ## Features
//! - Registration with email, password and role (student / teacher)
//! - Email verification through a single-use, 24 hour link token
//! - Layered token matching (exact, containment, encoding-tolerant fuzzy)
//! - Login gated on verification, with token refresh when it lapsed
//! - Development-only force-verify and token diagnostics endpoints
//!
//! ## Consistency Model
//! - Verification columns have exactly one write path
//!   (`AccountRepository::set_verification_fields`)
//! - `Unverified -> Verified` is a conditional update; concurrent requests
//!   for the same token produce one transition

pub mod application;
pub mod domain;
pub mod error;
pub mod infra;
pub mod presentation;

#[cfg(test)]
mod tests;

// Re-exports for convenience
pub use application::config::AuthConfig;
pub use error::{AuthError, AuthResult};
pub use infra::{MailNotifier, PgAccountRepository};
pub use presentation::router::{auth_router, auth_router_generic};

// Re-export kernel error types for unified error handling
pub use kernel::error::{
    app_error::{AppError, AppResult},
    kind::ErrorKind,
};

pub mod models {
    pub use crate::domain::entity::account::Account;
    pub use crate::domain::value_object::*;
    pub use crate::presentation::dto::*;
}
