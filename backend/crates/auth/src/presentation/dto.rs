//! API DTOs (Data Transfer Objects)
//!
//! Request fields default to empty so that a missing field reaches the use
//! case and yields its own validation message.

use serde::{Deserialize, Serialize};

use crate::application::{CandidateReport, DebugTokenReport};
use crate::domain::entity::account::Account;
use crate::domain::value_object::{account_id::AccountId, account_role::AccountRole};

// ============================================================================
// Shared
// ============================================================================

/// Public view of an account; no hash, no token
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct UserResponse {
    pub id: AccountId,
    pub name: String,
    pub email: String,
    pub role: AccountRole,
    pub is_verified: bool,
}

impl From<&Account> for UserResponse {
    fn from(account: &Account) -> Self {
        Self {
            id: account.account_id,
            name: account.display_name.as_str().to_string(),
            email: account.email.as_str().to_string(),
            role: account.role,
            is_verified: account.is_verified(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

// ============================================================================
// Register / Login
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RegisterRequest {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RegisterResponse {
    pub message: String,
    pub user: UserResponse,
    pub verification_email_sent: bool,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct LoginResponse {
    pub message: String,
    pub user: UserResponse,
}

// ============================================================================
// Verification
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct VerifyEmailQuery {
    pub token: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ResendRequest {
    pub email: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct ForceVerifyRequest {
    pub email: String,
    pub password: String,
}

// ============================================================================
// Token diagnostics
// ============================================================================

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct DebugTokenRequest {
    pub token: String,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebugTokenResponse {
    /// Snippet of the submitted token, never the token itself
    pub input_token: String,
    pub input_length: usize,
    pub tokens_found_count: usize,
    pub exact_match_count: usize,
    pub substring_match_count: usize,
    pub fuzzy_match_count: usize,
    pub total_potential_matches: usize,
    pub potential_matches: Vec<CandidateResponse>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CandidateResponse {
    pub id: AccountId,
    pub masked_email: String,
    pub token_length: usize,
    pub token_snippet: String,
    pub is_exact_match: bool,
    pub is_substring_match: bool,
    pub is_fuzzy_match: bool,
    pub is_verified: bool,
    pub has_expires: bool,
    pub is_expired: bool,
}

impl From<CandidateReport> for CandidateResponse {
    fn from(c: CandidateReport) -> Self {
        Self {
            id: c.account_id,
            masked_email: c.masked_email,
            token_length: c.token_length,
            token_snippet: c.token_snippet,
            is_exact_match: c.is_exact_match,
            is_substring_match: c.is_substring_match,
            is_fuzzy_match: c.is_fuzzy_match,
            is_verified: c.is_verified,
            has_expires: c.has_expires,
            is_expired: c.is_expired,
        }
    }
}

impl From<DebugTokenReport> for DebugTokenResponse {
    fn from(report: DebugTokenReport) -> Self {
        Self {
            input_token: report.input_snippet,
            input_length: report.input_length,
            tokens_found_count: report.tokens_found,
            exact_match_count: report.exact_matches,
            substring_match_count: report.substring_matches,
            fuzzy_match_count: report.fuzzy_matches,
            total_potential_matches: report.potential_matches.len(),
            potential_matches: report
                .potential_matches
                .into_iter()
                .map(CandidateResponse::from)
                .collect(),
        }
    }
}
