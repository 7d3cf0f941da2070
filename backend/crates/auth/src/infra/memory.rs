//! In-Memory Implementations
//!
//! Process-local account store and a notifier that records what it would
//! have sent. Compiled for tests only.
//! The conditional writes mirror the PostgreSQL `WHERE` clauses.

use std::collections::HashMap;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex, RwLock};

use chrono::Utc;

use crate::domain::entity::account::Account;
use crate::domain::notifier::VerificationNotifier;
use crate::domain::repository::{AccountRepository, VerificationFields};
use crate::domain::value_object::{
    account_id::AccountId,
    email::Email,
    verification_state::VerificationState,
    verification_token::{TokenDigest, VerificationToken},
};
use crate::error::{AuthError, AuthResult};

// ============================================================================
// Account store
// ============================================================================

#[derive(Clone, Default)]
pub struct InMemoryAccountRepository {
    accounts: Arc<RwLock<HashMap<AccountId, Account>>>,
}

impl InMemoryAccountRepository {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.read().map(|accounts| accounts.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    fn read(
        &self,
    ) -> AuthResult<std::sync::RwLockReadGuard<'_, HashMap<AccountId, Account>>> {
        self.accounts
            .read()
            .map_err(|_| AuthError::Internal("account store lock poisoned".to_string()))
    }

    fn write(
        &self,
    ) -> AuthResult<std::sync::RwLockWriteGuard<'_, HashMap<AccountId, Account>>> {
        self.accounts
            .write()
            .map_err(|_| AuthError::Internal("account store lock poisoned".to_string()))
    }
}

impl AccountRepository for InMemoryAccountRepository {
    async fn create(&self, account: &Account) -> AuthResult<()> {
        let mut accounts = self.write()?;
        if accounts.values().any(|a| a.email == account.email) {
            return Err(AuthError::EmailTaken);
        }
        accounts.insert(account.account_id, account.clone());
        Ok(())
    }

    async fn find_by_id(&self, account_id: &AccountId) -> AuthResult<Option<Account>> {
        Ok(self.read()?.get(account_id).cloned())
    }

    async fn find_by_email(&self, email: &Email) -> AuthResult<Option<Account>> {
        Ok(self.read()?.values().find(|a| &a.email == email).cloned())
    }

    async fn exists_by_email(&self, email: &Email) -> AuthResult<bool> {
        Ok(self.read()?.values().any(|a| &a.email == email))
    }

    async fn find_pending_verifications(&self) -> AuthResult<Vec<Account>> {
        Ok(self
            .read()?
            .values()
            .filter(|a| a.pending_token().is_some())
            .cloned()
            .collect())
    }

    async fn find_by_consumed_digest(&self, digest: &TokenDigest) -> AuthResult<Option<Account>> {
        Ok(self
            .read()?
            .values()
            .find(|a| {
                a.verification
                    .consumed_digest()
                    .is_some_and(|stored| stored.matches(digest))
            })
            .cloned())
    }

    async fn set_verification_fields(
        &self,
        account_id: &AccountId,
        fields: &VerificationFields,
    ) -> AuthResult<bool> {
        let mut accounts = self.write()?;
        let Some(account) = accounts.get_mut(account_id) else {
            return Ok(false);
        };
        if account.is_verified() {
            return Ok(false);
        }

        match fields {
            VerificationFields::Pending(issued) => {
                account.verification = VerificationState::pending(issued.clone());
            }
            VerificationFields::Verified {
                expected_token,
                consumed_digest,
            } => {
                if let Some(expected) = expected_token {
                    let current = account.pending_token().map(|issued| &issued.token);
                    if current != Some(expected) {
                        return Ok(false);
                    }
                }
                account.verification = VerificationState::Verified {
                    consumed_digest: *consumed_digest,
                };
            }
        }
        account.updated_at = Utc::now();
        Ok(true)
    }
}

// ============================================================================
// Notifier
// ============================================================================

/// Records every verification email instead of sending it
#[derive(Clone, Default)]
pub struct RecordingNotifier {
    sent: Arc<Mutex<Vec<(Email, VerificationToken)>>>,
    failing: Arc<AtomicBool>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    /// When set, sends are reported as failed and nothing is recorded
    pub fn set_failing(&self, failing: bool) {
        self.failing.store(failing, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<(Email, VerificationToken)> {
        self.sent.lock().map(|sent| sent.clone()).unwrap_or_default()
    }

    pub fn last_token_for(&self, email: &str) -> Option<VerificationToken> {
        self.sent()
            .into_iter()
            .rev()
            .find(|(to, _)| to.as_str() == email)
            .map(|(_, token)| token)
    }
}

impl VerificationNotifier for RecordingNotifier {
    async fn send_verification(&self, email: &Email, token: &VerificationToken) -> bool {
        if self.failing.load(Ordering::SeqCst) {
            return false;
        }
        match self.sent.lock() {
            Ok(mut sent) => {
                sent.push((email.clone(), token.clone()));
                true
            }
            Err(_) => false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::value_object::verification_token::{IssuedToken, verification_token_ttl};
    use crate::tests::fixtures::{register_account, test_clock};
    use platform::clock::Clock;

    #[tokio::test]
    async fn test_duplicate_email_rejected() {
        let repo = InMemoryAccountRepository::new();
        let clock = test_clock();
        let account = register_account(&repo, "dup@example.com", clock.now()).await;

        let mut twin = account.clone();
        twin.account_id = AccountId::new();
        let result = repo.create(&twin).await;
        assert!(matches!(result, Err(AuthError::EmailTaken)));
        assert_eq!(repo.len(), 1);
    }

    #[tokio::test]
    async fn test_verified_account_rejects_further_writes() {
        let repo = InMemoryAccountRepository::new();
        let clock = test_clock();
        let account = register_account(&repo, "done@example.com", clock.now()).await;

        let verified = VerificationFields::Verified {
            expected_token: None,
            consumed_digest: None,
        };
        assert!(
            repo.set_verification_fields(&account.account_id, &verified)
                .await
                .unwrap()
        );

        let reissue = VerificationFields::Pending(IssuedToken {
            token: VerificationToken::generate(),
            expires_at: clock.now() + verification_token_ttl(),
        });
        assert!(
            !repo
                .set_verification_fields(&account.account_id, &reissue)
                .await
                .unwrap()
        );
        let stored = repo.find_by_id(&account.account_id).await.unwrap().unwrap();
        assert!(stored.is_verified());
        assert!(stored.pending_token().is_none());
    }

    #[tokio::test]
    async fn test_expected_token_mismatch_is_not_applied() {
        let repo = InMemoryAccountRepository::new();
        let clock = test_clock();
        let account = register_account(&repo, "race@example.com", clock.now()).await;

        let wrong = VerificationFields::Verified {
            expected_token: Some(VerificationToken::generate()),
            consumed_digest: None,
        };
        assert!(
            !repo
                .set_verification_fields(&account.account_id, &wrong)
                .await
                .unwrap()
        );
        assert!(!repo.find_by_id(&account.account_id).await.unwrap().unwrap().is_verified());
    }

    #[tokio::test]
    async fn test_failing_notifier_records_nothing() {
        let notifier = RecordingNotifier::new();
        notifier.set_failing(true);
        let email = Email::new("x@example.com").unwrap();
        assert!(
            !notifier
                .send_verification(&email, &VerificationToken::generate())
                .await
        );
        assert!(notifier.sent().is_empty());
    }
}
