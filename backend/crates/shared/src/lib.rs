//! Shared Kernel - Domain-crossing minimal core
//!
//! Vocabulary shared by every bounded context of the career guidance backend:
//! - Unified error type ([`error::app_error::AppError`]) and its HTTP mapping
//! - Typed entity identifiers ([`id::Id`])
//!
//! Only things whose meaning is identical in the account and course contexts
//! belong here.

pub mod error {
    pub mod app_error;
    pub mod conversions;
    pub mod kind;
}
pub mod id;
