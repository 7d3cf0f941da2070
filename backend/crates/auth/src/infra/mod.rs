//! Infrastructure Layer
//!
//! Database implementations and external service integrations.

#[cfg(test)]
pub mod memory;
pub mod notifier;
pub mod postgres;

#[cfg(test)]
pub use memory::{InMemoryAccountRepository, RecordingNotifier};
pub use notifier::MailNotifier;
pub use postgres::PgAccountRepository;
