//! Verification State
//!
//! `Unverified -> Verified` is the only transition and it is terminal.
//! A verified account carries no token, which the enum makes unrepresentable.

use chrono::{DateTime, Utc};

use super::verification_token::{IssuedToken, TokenDigest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VerificationState {
    Unverified {
        pending: Option<IssuedToken>,
    },
    Verified {
        /// Digest of the token that completed verification (absent when
        /// verified manually)
        consumed_digest: Option<TokenDigest>,
    },
}

/// Where an account stands at a given instant
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum VerificationStatus {
    Verified,
    /// Unverified with a live token
    Pending,
    /// Unverified, token past its expiry
    Expired,
    /// Unverified without any token
    Missing,
}

impl VerificationState {
    pub fn pending(issued: IssuedToken) -> Self {
        Self::Unverified {
            pending: Some(issued),
        }
    }

    pub fn is_verified(&self) -> bool {
        matches!(self, Self::Verified { .. })
    }

    pub fn pending_token(&self) -> Option<&IssuedToken> {
        match self {
            Self::Unverified { pending } => pending.as_ref(),
            Self::Verified { .. } => None,
        }
    }

    pub fn consumed_digest(&self) -> Option<&TokenDigest> {
        match self {
            Self::Verified { consumed_digest } => consumed_digest.as_ref(),
            Self::Unverified { .. } => None,
        }
    }

    pub fn status_at(&self, now: DateTime<Utc>) -> VerificationStatus {
        match self {
            Self::Verified { .. } => VerificationStatus::Verified,
            Self::Unverified { pending: None } => VerificationStatus::Missing,
            Self::Unverified {
                pending: Some(issued),
            } if issued.is_expired_at(now) => VerificationStatus::Expired,
            Self::Unverified { .. } => VerificationStatus::Pending,
        }
    }
}
