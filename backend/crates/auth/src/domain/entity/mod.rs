//! Entity Module

pub mod account;
