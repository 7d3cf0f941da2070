//! Sign Up Use Case
//!
//! Registers an unverified account and sends its first verification email.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::AccountRepository;
use crate::domain::service::TokenIssuer;
use crate::domain::value_object::{
    account_role::AccountRole,
    display_name::DisplayName,
    email::Email,
    user_password::{RawPassword, UserPassword},
};
use crate::error::{AuthError, AuthResult};

pub struct SignUpInput {
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Option<String>,
}

pub struct SignUpOutput {
    pub account: Account,
    /// `false` when the email could not be handed to the mail relay; the
    /// account is kept and the user can ask for a resend
    pub verification_email_sent: bool,
}

pub struct SignUpUseCase<R, N>
where
    R: AccountRepository,
    N: VerificationNotifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
}

impl<R, N> SignUpUseCase<R, N>
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
            repo,
            notifier,
            config,
            clock,
        }
    }

    pub async fn execute(&self, input: SignUpInput) -> AuthResult<SignUpOutput> {
        if input.name.trim().is_empty() || input.email.trim().is_empty() || input.password.is_empty()
        {
            return Err(AuthError::Validation(
                "Name, email, and password are required".to_string(),
            ));
        }

        // All validation happens before the store is touched
        let display_name = DisplayName::new(input.name)?;
        let email = Email::new(input.email)?;
        let role = AccountRole::parse(input.role.as_deref())?;
        let raw_password = RawPassword::new(input.password)?;

        if self.repo.exists_by_email(&email).await? {
            return Err(AuthError::EmailTaken);
        }

        let password_hash = UserPassword::from_raw(&raw_password, self.config.pepper())?;

        let now = self.clock.now();
        let issued = TokenIssuer::new().issue(now);
        let account = Account::register(email, display_name, role, password_hash, issued, now);

        // A concurrent registration can still win the unique index
        self.repo.create(&account).await?;

        let verification_email_sent = match account.pending_token() {
            Some(issued) => {
                self.notifier
                    .send_verification(&account.email, &issued.token)
                    .await
            }
            None => false,
        };

        tracing::info!(
            account_id = %account.account_id,
            role = %account.role,
            verification_email_sent,
            "Account registered"
        );

        Ok(SignUpOutput {
            account,
            verification_email_sent,
        })
    }
}
