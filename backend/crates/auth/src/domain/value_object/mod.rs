//! Value Object Module

pub mod account_id;
pub mod account_role;
pub mod display_name;
pub mod email;
pub mod user_password;
pub mod verification_state;
pub mod verification_token;
