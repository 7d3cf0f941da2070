//! Debug Token Use Case (development only)
//!
//! Explains how an inbound token relates to every stored token, per matcher
//! tier. Emails are masked and tokens shortened to snippets.

use std::sync::Arc;

use platform::clock::Clock;

use crate::domain::repository::AccountRepository;
use crate::domain::service::FuzzyPattern;
use crate::domain::service::token_matcher::{is_contained, is_exact};
use crate::domain::value_object::{account_id::AccountId, verification_token::snippet};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CandidateReport {
    pub account_id: AccountId,
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

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebugTokenReport {
    pub input_snippet: String,
    pub input_length: usize,
    pub tokens_found: usize,
    pub exact_matches: usize,
    pub substring_matches: usize,
    pub fuzzy_matches: usize,
    /// Only stored tokens that match in at least one tier
    pub potential_matches: Vec<CandidateReport>,
}

pub struct DebugTokenUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    clock: Arc<dyn Clock>,
}

impl<R> DebugTokenUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, clock: Arc<dyn Clock>) -> Self {
        Self { repo, clock }
    }

    pub async fn execute(&self, raw_token: &str) -> AuthResult<DebugTokenReport> {
        let input = raw_token.trim();
        if input.is_empty() {
            return Err(AuthError::Validation("Token is required".to_string()));
        }

        let now = self.clock.now();
        let pattern = FuzzyPattern::compile(input);
        let accounts = self.repo.find_pending_verifications().await?;

        let mut report = DebugTokenReport {
            input_snippet: snippet(input),
            input_length: input.len(),
            tokens_found: 0,
            exact_matches: 0,
            substring_matches: 0,
            fuzzy_matches: 0,
            potential_matches: Vec::new(),
        };

        for account in &accounts {
            let Some(issued) = account.pending_token() else {
                continue;
            };
            report.tokens_found += 1;

            let stored = issued.token.as_str();
            let candidate = CandidateReport {
                account_id: account.account_id,
                masked_email: account.email.masked(),
                token_length: issued.token.len(),
                token_snippet: issued.token.snippet(),
                is_exact_match: is_exact(input, stored),
                is_substring_match: is_contained(input, stored),
                is_fuzzy_match: pattern.is_found_in(stored),
                is_verified: account.is_verified(),
                has_expires: true,
                is_expired: issued.is_expired_at(now),
            };

            report.exact_matches += usize::from(candidate.is_exact_match);
            report.substring_matches += usize::from(candidate.is_substring_match);
            report.fuzzy_matches += usize::from(candidate.is_fuzzy_match);
            if candidate.is_exact_match || candidate.is_substring_match || candidate.is_fuzzy_match
            {
                report.potential_matches.push(candidate);
            }
        }

        tracing::debug!(
            tokens_found = report.tokens_found,
            potential_matches = report.potential_matches.len(),
            "Token diagnostics computed"
        );
        Ok(report)
    }
}
