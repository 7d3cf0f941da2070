//! Repository Traits
//!
//! Interfaces for account persistence. Implementations live in `infra/`.

use crate::domain::entity::account::Account;
use crate::domain::value_object::{
    account_id::AccountId,
    email::Email,
    verification_token::{IssuedToken, TokenDigest, VerificationToken},
};
use crate::error::AuthResult;

/// The only write to an account's verification columns
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationFields {
    /// Store a new active token; applies only while the account is unverified
    Pending(IssuedToken),
    /// Mark verified and clear token and expiry in the same write.
    /// With `expected_token` the write applies only if that token is still
    /// the active one.
    Verified {
        expected_token: Option<VerificationToken>,
        consumed_digest: Option<TokenDigest>,
    },
}

#[trait_variant::make(AccountRepository: Send)]
pub trait LocalAccountRepository {
    /// Insert a new account; `AuthError::EmailTaken` on a duplicate email
    async fn create(&self, account: &Account) -> AuthResult<()>;

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>>;

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>>;

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool>;

    /// Unverified accounts that hold a token
    async fn find_pending_verifications(&self) -> AuthResult<Vec<Account>>;

    /// Verified account whose consumed token has this digest
    async fn find_by_consumed_digest(&self, digest: &TokenDigest) -> AuthResult<Option<Account>>;

    /// Apply `fields` as one conditional write.
    ///
    /// `Ok(true)` when the account changed, `Ok(false)` when the precondition
    /// did not hold (already verified, token replaced, unknown id).
    async fn set_verification_fields(
        &self,
        account_id: &AccountId,
        fields: &VerificationFields,
    ) -> AuthResult<bool>;
}
