//! Platform Crate - Technical Infrastructure
//!
//! Shared technical foundations used by the bounded contexts:
//! - Cryptographic utilities (CSPRNG bytes, SHA-256, hex)
//! - Password hashing (Argon2id with optional pepper)
//! - Injectable wall clock
//! - Environment-based configuration helpers
//! - Process-wide PostgreSQL pool with lazy initialization
//! - SMTP mail delivery

pub mod clock;
pub mod config;
pub mod crypto;
pub mod database;
pub mod mail;
pub mod password;
