//! Domain Services
//!
//! Pure logic with no I/O.

pub mod token_issuer;
pub mod token_matcher;

pub use token_issuer::TokenIssuer;
pub use token_matcher::{FuzzyPattern, MatchTier, TokenCandidate, TokenMatch, match_token};
