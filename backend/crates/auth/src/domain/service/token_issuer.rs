//! Token Issuer

use chrono::{DateTime, Utc};

use crate::domain::value_object::verification_token::{
    IssuedToken, VerificationToken, verification_token_ttl,
};

/// Issues verification tokens that expire 24 hours after `now`
#[derive(Debug, Clone, Copy)]
pub struct TokenIssuer {
    generate: fn() -> VerificationToken,
}

impl Default for TokenIssuer {
    fn default() -> Self {
        Self {
            generate: VerificationToken::generate,
        }
    }
}

impl TokenIssuer {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn issue(&self, now: DateTime<Utc>) -> IssuedToken {
        IssuedToken {
            token: (self.generate)(),
            expires_at: now + verification_token_ttl(),
        }
    }

    /// Issue a token that differs from the account's current one
    pub fn issue_replacing(
        &self,
        now: DateTime<Utc>,
        current: Option<&VerificationToken>,
    ) -> IssuedToken {
        loop {
            let issued = self.issue(now);
            if current != Some(&issued.token) {
                return issued;
            }
            tracing::warn!("Generated token collided with the active one, regenerating");
        }
    }
}
