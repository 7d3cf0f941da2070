//! Sign In Use Case
//!
//! Authenticates an account by email and password. Only verified accounts
//! get through; see `VerificationUseCase::reconcile_on_login`.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::application::verification::VerificationUseCase;
use crate::domain::entity::account::Account;
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::AccountRepository;
use crate::domain::value_object::{email::Email, user_password::RawPassword};
use crate::error::{AuthError, AuthResult};

pub struct SignInInput {
    pub email: String,
    pub password: String,
}

pub struct SignInOutput {
    pub account: Account,
}

pub struct SignInUseCase<R, N>
where
    R: AccountRepository,
    N: VerificationNotifier,
{
    repo: Arc<R>,
    verification: VerificationUseCase<R, N>,
}

impl<R, N> SignInUseCase<R, N>
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

    pub async fn execute(&self, input: SignInInput) -> AuthResult<SignInOutput> {
        if input.email.trim().is_empty() || input.password.is_empty() {
            return Err(AuthError::Validation(
                "Email and password are required".to_string(),
            ));
        }

        // Malformed input can't match any account; answer like a wrong password
        let email = Email::new(input.email).map_err(|_| AuthError::InvalidCredentials)?;
        let password = RawPassword::new(input.password).map_err(|_| AuthError::InvalidCredentials)?;

        let account = self
            .repo
            .find_by_email(&email)
            .await?
            .ok_or(AuthError::InvalidCredentials)?;

        let account = self.verification.reconcile_on_login(account, &password).await?;

        tracing::info!(account_id = %account.account_id, role = %account.role, "Account signed in");

        Ok(SignInOutput { account })
    }
}
