//! Verification State Machine
//!
//! Drives `Unverified -> Verified`. Every write goes through
//! `AccountRepository::set_verification_fields`; the final transition is a
//! conditional write so that of two concurrent requests exactly one wins.

use std::sync::Arc;

use platform::clock::Clock;

use crate::application::config::AuthConfig;
use crate::domain::entity::account::Account;
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::{AccountRepository, VerificationFields};
use crate::domain::service::{TokenCandidate, TokenIssuer, TokenMatch, match_token};
use crate::domain::value_object::{
    account_id::AccountId,
    user_password::RawPassword,
    verification_state::{VerificationState, VerificationStatus},
    verification_token::{TokenDigest, VerificationToken},
};
use crate::error::{AuthError, AuthResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerifyOutcome {
    /// This request performed the transition
    Verified(AccountId),
    /// The account was verified before (repeat click or lost race)
    AlreadyVerified(AccountId),
}

impl VerifyOutcome {
    pub fn account_id(&self) -> AccountId {
        match self {
            VerifyOutcome::Verified(id) | VerifyOutcome::AlreadyVerified(id) => *id,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReissueOutcome {
    Reissued { delivered: bool },
    AlreadyVerified,
}

/// Result of resolving an inbound token
#[derive(Debug)]
pub enum ResolvedToken {
    Pending(Account),
    /// Digest matched a token that already completed verification
    Consumed(AccountId),
}

pub struct VerificationUseCase<R, N>
where
    R: AccountRepository,
    N: VerificationNotifier,
{
    repo: Arc<R>,
    notifier: Arc<N>,
    config: Arc<AuthConfig>,
    clock: Arc<dyn Clock>,
    issuer: TokenIssuer,
}

impl<R, N> VerificationUseCase<R, N>
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
            issuer: TokenIssuer::new(),
        }
    }

    // ========================================================================
    // verify
    // ========================================================================

    pub async fn verify(&self, raw_token: &str) -> AuthResult<VerifyOutcome> {
        let account = match self.find_account_by_token(raw_token).await? {
            ResolvedToken::Consumed(account_id) => {
                tracing::info!(account_id = %account_id, "Verification link reused");
                return Ok(VerifyOutcome::AlreadyVerified(account_id));
            }
            ResolvedToken::Pending(account) => account,
        };

        let issued = match &account.verification {
            VerificationState::Verified { .. } => {
                return Ok(VerifyOutcome::AlreadyVerified(account.account_id));
            }
            VerificationState::Unverified { pending: None } => return Err(AuthError::InvalidToken),
            VerificationState::Unverified {
                pending: Some(issued),
            } => issued,
        };

        let now = self.clock.now();
        if issued.is_expired_at(now) {
            tracing::info!(
                account_id = %account.account_id,
                expired_at = %issued.expires_at,
                "Verification token expired"
            );
            return Err(AuthError::TokenExpired);
        }

        self.commit(&account.account_id, &issued.token).await
    }

    /// Locate the account a link token belongs to
    pub async fn find_account_by_token(&self, raw_token: &str) -> AuthResult<ResolvedToken> {
        let input = raw_token.trim();
        if input.is_empty() {
            return Err(AuthError::Validation(
                "Verification token is required".to_string(),
            ));
        }

        let mut pending = self.repo.find_pending_verifications().await?;
        let candidates: Vec<TokenCandidate<'_>> = pending
            .iter()
            .filter_map(|account| {
                account.pending_token().map(|issued| TokenCandidate {
                    account_id: account.account_id,
                    token: issued.token.as_str(),
                })
            })
            .collect();

        match match_token(input, &candidates) {
            TokenMatch::Unique { account_id, tier } => {
                tracing::info!(
                    account_id = %account_id,
                    tier = %tier,
                    token = %VerificationToken::from_db(input).snippet(),
                    "Verification token matched"
                );
                let index = pending
                    .iter()
                    .position(|a| a.account_id == account_id)
                    .ok_or(AuthError::InvalidToken)?;
                Ok(ResolvedToken::Pending(pending.swap_remove(index)))
            }
            TokenMatch::Ambiguous { tier, count } => {
                tracing::warn!(tier = %tier, count, "Verification token matched several accounts");
                Err(AuthError::AmbiguousToken)
            }
            TokenMatch::NotFound => {
                let digest = TokenDigest::of(input);
                match self.repo.find_by_consumed_digest(&digest).await? {
                    Some(account) => Ok(ResolvedToken::Consumed(account.account_id)),
                    None => Err(AuthError::InvalidToken),
                }
            }
        }
    }

    /// Conditional transition; the loser of a race re-reads the account
    async fn commit(
        &self,
        account_id: &AccountId,
        token: &VerificationToken,
    ) -> AuthResult<VerifyOutcome> {
        let fields = VerificationFields::Verified {
            expected_token: Some(token.clone()),
            consumed_digest: Some(token.digest()),
        };
        if self.repo.set_verification_fields(account_id, &fields).await? {
            tracing::info!(account_id = %account_id, "Email verified");
            return Ok(VerifyOutcome::Verified(*account_id));
        }

        match self.repo.find_by_id(account_id).await? {
            Some(account) if account.is_verified() => {
                Ok(VerifyOutcome::AlreadyVerified(*account_id))
            }
            // token was replaced by a reissue in the meantime
            _ => Err(AuthError::InvalidToken),
        }
    }

    // ========================================================================
    // reissue
    // ========================================================================

    pub async fn reissue_token(&self, account_id: &AccountId) -> AuthResult<ReissueOutcome> {
        let account = self
            .repo
            .find_by_id(account_id)
            .await?
            .ok_or(AuthError::AccountNotFound)?;
        self.reissue_for(&account).await
    }

    /// Issue, persist, then notify. Delivery failure leaves the new token in place.
    pub(crate) async fn reissue_for(&self, account: &Account) -> AuthResult<ReissueOutcome> {
        if account.is_verified() {
            return Ok(ReissueOutcome::AlreadyVerified);
        }

        let current = account.pending_token().map(|issued| &issued.token);
        let issued = self.issuer.issue_replacing(self.clock.now(), current);
        let stored = self
            .repo
            .set_verification_fields(
                &account.account_id,
                &VerificationFields::Pending(issued.clone()),
            )
            .await?;

        if !stored {
            return match self.repo.find_by_id(&account.account_id).await? {
                Some(latest) if latest.is_verified() => Ok(ReissueOutcome::AlreadyVerified),
                Some(_) => Err(AuthError::Internal(
                    "verification token was not stored".to_string(),
                )),
                None => Err(AuthError::AccountNotFound),
            };
        }

        let delivered = self
            .notifier
            .send_verification(&account.email, &issued.token)
            .await;
        tracing::info!(
            account_id = %account.account_id,
            delivered,
            "Verification token reissued"
        );
        Ok(ReissueOutcome::Reissued { delivered })
    }

    // ========================================================================
    // login reconciliation
    // ========================================================================

    /// Gate a login on verification. Returns the (possibly refreshed) account
    /// when it may log in.
    ///
    /// An unverified account whose token is expired or missing gets a fresh
    /// token and email before the rejection; one with a live token is just
    /// rejected.
    pub async fn reconcile_on_login(
        &self,
        account: Account,
        password: &RawPassword,
    ) -> AuthResult<Account> {
        if !account.password_hash.verify(password, self.config.pepper()) {
            return Err(AuthError::InvalidCredentials);
        }

        match account.verification_status(self.clock.now()) {
            VerificationStatus::Verified => Ok(account),
            VerificationStatus::Pending => Err(AuthError::NeedsVerification),
            VerificationStatus::Expired | VerificationStatus::Missing => {
                match self.reissue_for(&account).await? {
                    ReissueOutcome::Reissued { .. } => Err(AuthError::NeedsVerification),
                    ReissueOutcome::AlreadyVerified => self
                        .repo
                        .find_by_id(&account.account_id)
                        .await?
                        .ok_or(AuthError::InvalidCredentials),
                }
            }
        }
    }
}
