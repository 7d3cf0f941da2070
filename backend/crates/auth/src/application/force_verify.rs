//! Force Verify Use Case (development only)
//!
//! Marks an account verified without a token when the password matches.
//! The result is not reported to the caller, whose answer is uniform.

use std::sync::Arc;

use crate::application::config::AuthConfig;
use crate::domain::repository::{AccountRepository, VerificationFields};
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct ForceVerifyInput {
    pub email: String,
    pub password: String,
}

pub struct ForceVerifyUseCase<R>
where
    R: AccountRepository,
{
    repo: Arc<R>,
    config: Arc<AuthConfig>,
}

impl<R> ForceVerifyUseCase<R>
where
    R: AccountRepository,
{
    pub fn new(repo: Arc<R>, config: Arc<AuthConfig>) -> Self {
        Self { repo, config }
    }

    /// `Ok(true)` when this call changed the account
    pub async fn execute(&self, input: ForceVerifyInput) -> AuthResult<bool> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }
        let (Ok(email), Ok(password)) = (Email::new(input.email), RawPassword::new(input.password))
        else {
            return Ok(false);
        };

        let Some(account) = self.repo.find_by_email(&email).await? else {
            return Ok(false);
        };
        if account.is_verified() || !account.password_hash.verify(&password, self.config.pepper())
        {
            return Ok(false);
        }

        let fields = VerificationFields::Verified {
            expected_token: None,
            consumed_digest: None,
        };
        let changed = self
            .repo
            .set_verification_fields(&account.account_id, &fields)
            .await?;
        if changed {
            tracing::warn!(account_id = %account.account_id, "Account verified manually");
        }
        Ok(changed)
    }
}
