//! Resend Verification Use Case
//!
//! The caller always gets the same answer; the outcome is for logs and tests.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::verification::{ReissueOutcome, VerificationUseCase};
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::email::Email;
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResendOutcome {
    Sent,
    DeliveryFailed,
    AlreadyVerified,
    UnknownAccount,
}

pub struct ResendVerificationUseCase<R, N>
where
    R: AccountRepository,
    N: VerificationNotifier,
{
    repo: Arc<R>,
    verification: VerificationUseCase<R, N>,
}

impl<R, N> ResendVerificationUseCase<R, N>
where
    R: AccountRepository,
    N: VerificationNotifier,
{
    pub fn new(
        repo: Arc<R>,
        notifier: Arc<N>,
        config: Arc<AuthConfig>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            verification: VerificationUseCase::new(repo.clone(), notifier, config, clock),
            repo,
        }
    }

    pub async fn execute(&self, email: String) -> AuthResult<ResendOutcome> {
        if email.trim().is_empty() {
            return Err(AuthError::Validation("Email is required".to_string()));
        }
        let email = Email::new(email)?;

        let Some(account) = self.repo.find_by_email(&email).await? else {
            tracing::debug!("Resend requested for unknown email");
            return Ok(ResendOutcome::UnknownAccount);
        };

        let outcome = match self.verification.reissue_for(&account).await? {
            ReissueOutcome::AlreadyVerified => ResendOutcome::AlreadyVerified,
            ReissueOutcome::Reissued { delivered: true } => ResendOutcome::Sent,
            ReissueOutcome::Reissued { delivered: false } => {
                tracing::warn!(
                    account_id = %account.account_id,
                    "Verification email could not be delivered"
                );
                ResendOutcome::DeliveryFailed
            }
        };
        Ok(outcome)
    }
}
