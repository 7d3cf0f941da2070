//! Environment configuration helpers
//!
//! Values are read from the process environment (after `dotenvy` has loaded
//! `.env` in the binary). Unset or empty variables fall back to defaults;
//! present but malformed variables are errors.

use std::env;
use std::str::FromStr;

use thiserror::Error;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ConfigError {
    #[error("Missing required environment variable {0}")]
    Missing(&'static str),

    #[error("Invalid value for {key}: {value:?}")]
    Invalid { key: &'static str, value: String },
}

/// Non-empty, trimmed value of `key`
pub fn env_opt(key: &'static str) -> Option<String> {
    env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

pub fn env_required(key: &'static str) -> Result<String, ConfigError> {
    env_opt(key).ok_or(ConfigError::Missing(key))
}

pub fn env_or(key: &'static str, default: &str) -> String {
    env_opt(key).unwrap_or_else(|| default.to_string())
}

pub fn env_parse<T: FromStr>(key: &'static str, default: T) -> Result<T, ConfigError> {
    match env_opt(key) {
        Some(value) => parse_value(key, &value),
        None => Ok(default),
    }
}

/// Accepts `1/0`, `true/false`, `yes/no`, `on/off` (case-insensitive)
pub fn env_bool(key: &'static str, default: bool) -> Result<bool, ConfigError> {
    match env_opt(key) {
        Some(value) => parse_bool(key, &value),
        None => Ok(default),
    }
}

/// Comma-separated list, empty entries dropped
pub fn env_list(key: &'static str, default: &str) -> Vec<String> {
    split_list(&env_or(key, default))
}

fn parse_value<T: FromStr>(key: &'static str, value: &str) -> Result<T, ConfigError> {
    value.parse().map_err(|_| ConfigError::Invalid {
        key,
        value: value.to_string(),
    })
}

fn parse_bool(key: &'static str, value: &str) -> Result<bool, ConfigError> {
    match value.to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(ConfigError::Invalid {
            key,
            value: value.to_string(),
        }),
    }
}

fn split_list(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
