//! Verification Token Value Objects
//!
//! A token is 32 bytes from the OS CSPRNG, hex encoded. It is single use and
//! expires 24 hours after issue.

use std::fmt;

use chrono::{DateTime, Duration, Utc};
use platform::crypto::{constant_time_eq, random_hex, sha256, to_hex};

/// Random bytes per token (64 hex characters)
pub const VERIFICATION_TOKEN_BYTES: usize = 32;

pub const VERIFICATION_TOKEN_TTL_HOURS: i64 = 24;

/// Lifetime of a freshly issued token
pub fn verification_token_ttl() -> Duration {
    Duration::hours(VERIFICATION_TOKEN_TTL_HOURS)
}

// ============================================================================
// Token
// ============================================================================

/// Opaque single-use credential proving ownership of an email address
#[derive(Clone, PartialEq, Eq)]
pub struct VerificationToken(String);

impl VerificationToken {
    pub fn generate() -> Self {
        Self(random_hex(VERIFICATION_TOKEN_BYTES))
    }

    pub fn from_db(token: impl Into<String>) -> Self {
        Self(token.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn digest(&self) -> TokenDigest {
        TokenDigest::of(&self.0)
    }

    /// `abcde...vwxyz`; safe to log
    pub fn snippet(&self) -> String {
        snippet(&self.0)
    }
}

impl fmt::Debug for VerificationToken {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_tuple("VerificationToken")
            .field(&self.snippet())
            .finish()
    }
}

/// First five and last five characters of `raw`; short input is fully masked
pub fn snippet(raw: &str) -> String {
    let chars: Vec<char> = raw.chars().collect();
    if chars.len() <= 10 {
        return "*".repeat(chars.len());
    }
    let head: String = chars[..5].iter().collect();
    let tail: String = chars[chars.len() - 5..].iter().collect();
    format!("{}...{}", head, tail)
}

// ============================================================================
// Digest of a consumed token
// ============================================================================

/// SHA-256 of a token, kept after verification so a repeated click on the
/// same link is recognized without storing the token itself
#[derive(Clone, Copy, PartialEq, Eq)]
pub struct TokenDigest([u8; 32]);

impl TokenDigest {
    pub fn of(raw: &str) -> Self {
        Self(sha256(raw.as_bytes()))
    }

    /// `None` unless exactly 32 bytes
    pub fn from_slice(bytes: &[u8]) -> Option<Self> {
        <[u8; 32]>::try_from(bytes).ok().map(Self)
    }

    pub fn as_bytes(&self) -> &[u8; 32] {
        &self.0
    }

    pub fn matches(&self, other: &TokenDigest) -> bool {
        constant_time_eq(&self.0, &other.0)
    }
}

impl fmt::Debug for TokenDigest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "TokenDigest({})", &to_hex(&self.0)[..12])
    }
}

// ============================================================================
// Issued token
// ============================================================================

/// The one active token of an unverified account
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IssuedToken {
    pub token: VerificationToken,
    pub expires_at: DateTime<Utc>,
}

impl IssuedToken {
    /// Expired strictly after `expires_at`; the boundary instant is still valid
    pub fn is_expired_at(&self, now: DateTime<Utc>) -> bool {
        now > self.expires_at
    }
}
