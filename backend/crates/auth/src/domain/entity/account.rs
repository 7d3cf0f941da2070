//! Account Entity
//!
//! A registered student or teacher. Accounts are never hard-deleted here.

use chrono::{DateTime, Utc};

use crate::domain::value_object::{
    account_id::AccountId,
    account_role::AccountRole,
    display_name::DisplayName,
    email::Email,
    user_password::UserPassword,
    verification_state::{VerificationState, VerificationStatus},
    verification_token::IssuedToken,
};

#[derive(Debug, Clone)]
pub struct Account {
    pub account_id: AccountId,
    /// Unique, lower-cased
    pub email: Email,
    pub display_name: DisplayName,
    pub role: AccountRole,
    pub password_hash: UserPassword,
    pub verification: VerificationState,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Account {
    /// New unverified account holding its first token
    pub fn register(
        email: Email,
        display_name: DisplayName,
        role: AccountRole,
        password_hash: UserPassword,
        issued: IssuedToken,
        now: DateTime<Utc>,
    ) -> Self {
        Self {
            account_id: AccountId::new(),
            email,
            display_name,
            role,
            password_hash,
            verification: VerificationState::pending(issued),
            created_at: now,
            updated_at: now,
        }
    }

    pub fn is_verified(&self) -> bool {
        self.verification.is_verified()
    }

    /// Only verified accounts may log in
    pub fn can_login(&self) -> bool {
        self.is_verified()
    }

    pub fn pending_token(&self) -> Option<&IssuedToken> {
        self.verification.pending_token()
    }

    pub fn verification_status(&self, now: DateTime<Utc>) -> VerificationStatus {
        self.verification.status_at(now)
    }
}
