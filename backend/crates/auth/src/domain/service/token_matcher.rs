//! Token Matcher
//!
//! Resolves the token from a verification link against the stored tokens.
//! Mail clients and URL decoders rewrite `+`, `/`, `=` and `%`, so an exact
//! miss falls back to looser tiers:
//!
//! 1. `Exact` - byte-for-byte equal
//! 2. `Containment` - one string contains the other
//! 3. `Fuzzy` - [`FuzzyPattern`] found inside the stored token
//!
//! The first tier with any hit decides. Several accounts hitting that tier
//! is reported as [`TokenMatch::Ambiguous`], never resolved by picking one.
//!
//! The loose tiers only count a hit when the shorter side carries at least
//! half of the longer side's characters, so a fragment like `a` never
//! stands in for a 64-character token.

use std::collections::HashSet;
use std::fmt;

use crate::domain::value_object::account_id::AccountId;

/// Characters that transports drop or rewrite; optional in a fuzzy pattern
/// and standing for any one of themselves in the stored token
const TRANSPORT_SENSITIVE: [char; 5] = ['+', '/', '%', '=', ' '];

/// Percent escapes of the transport-sensitive characters
const PERCENT_ESCAPES: [(&str, char); 5] = [
    ("2B", '+'),
    ("2F", '/'),
    ("3D", '='),
    ("25", '%'),
    ("20", ' '),
];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MatchTier {
    Exact,
    Containment,
    Fuzzy,
}

impl MatchTier {
    pub const ALL: [MatchTier; 3] = [MatchTier::Exact, MatchTier::Containment, MatchTier::Fuzzy];

    pub const fn as_str(&self) -> &'static str {
        match self {
            MatchTier::Exact => "exact",
            MatchTier::Containment => "containment",
            MatchTier::Fuzzy => "fuzzy",
        }
    }
}

impl fmt::Display for MatchTier {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored token and its owner
#[derive(Debug, Clone, Copy)]
pub struct TokenCandidate<'a> {
    pub account_id: AccountId,
    pub token: &'a str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenMatch {
    Unique {
        account_id: AccountId,
        tier: MatchTier,
    },
    Ambiguous {
        tier: MatchTier,
        count: usize,
    },
    NotFound,
}

pub fn match_token(input: &str, candidates: &[TokenCandidate<'_>]) -> TokenMatch {
    if input.is_empty() {
        return TokenMatch::NotFound;
    }
    let pattern = FuzzyPattern::compile(input);

    for tier in MatchTier::ALL {
        let hits: HashSet<AccountId> = candidates
            .iter()
            .filter(|c| !c.token.is_empty())
            .filter(|c| match tier {
                MatchTier::Exact => is_exact(input, c.token),
                MatchTier::Containment => is_contained(input, c.token),
                MatchTier::Fuzzy => pattern.is_found_in(c.token),
            })
            .map(|c| c.account_id)
            .collect();

        match hits.len() {
            0 => continue,
            1 => {
                let account_id = hits.into_iter().next().unwrap_or_default();
                return TokenMatch::Unique { account_id, tier };
            }
            count => return TokenMatch::Ambiguous { tier, count },
        }
    }

    TokenMatch::NotFound
}

pub fn is_exact(input: &str, stored: &str) -> bool {
    input == stored
}

pub fn is_contained(input: &str, stored: &str) -> bool {
    if input.is_empty() || stored.is_empty() {
        return false;
    }
    let (input_len, stored_len) = (input.chars().count(), stored.chars().count());
    if input_len <= stored_len {
        covers(input_len, stored_len) && stored.contains(input)
    } else {
        covers(stored_len, input_len) && input.contains(stored)
    }
}

/// `part` is a large enough share of `whole` to identify it
fn covers(part: usize, whole: usize) -> bool {
    part * 2 >= whole
}

// ============================================================================
// Fuzzy pattern
// ============================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Element {
    /// Must match this character (ASCII case-insensitive)
    Literal(char),
    /// Zero characters, or one transport-sensitive character
    Flexible,
}

impl Element {
    fn accepts(&self, c: char) -> bool {
        match self {
            Element::Literal(l) => l.eq_ignore_ascii_case(&c),
            Element::Flexible => TRANSPORT_SENSITIVE.contains(&c),
        }
    }
}

/// Compiled from user input through a fixed substitution table; no user
/// text ever reaches a regex engine. Matching simulates the pattern's NFA,
/// so it runs in `O(pattern * stored)` with no backtracking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FuzzyPattern {
    elements: Vec<Element>,
    literals: usize,
}

impl FuzzyPattern {
    pub fn compile(input: &str) -> Self {
        let elements: Vec<Element> = decode_escapes(input)
            .chars()
            .map(|c| {
                if TRANSPORT_SENSITIVE.contains(&c) {
                    Element::Flexible
                } else {
                    Element::Literal(c)
                }
            })
            .collect();
        let literals = elements
            .iter()
            .filter(|e| matches!(e, Element::Literal(_)))
            .count();
        Self { elements, literals }
    }

    /// Whether the pattern occurs anywhere in `stored`.
    /// A pattern without literal characters, or with fewer than half as many
    /// literals as `stored` has characters, matches nothing.
    pub fn is_found_in(&self, stored: &str) -> bool {
        if self.literals == 0 || !covers(self.literals, stored.chars().count()) {
            return false;
        }
        let end = self.elements.len();
        let mut active = vec![false; end + 1];
        active[0] = true;
        self.close(&mut active);

        for c in stored.chars() {
            let mut next = vec![false; end + 1];
            // unanchored: a match may start at every position
            next[0] = true;
            for (i, element) in self.elements.iter().enumerate() {
                if active[i] && element.accepts(c) {
                    next[i + 1] = true;
                }
            }
            self.close(&mut next);
            if next[end] {
                return true;
            }
            active = next;
        }
        false
    }

    /// Follow the empty transitions of optional elements
    fn close(&self, states: &mut [bool]) {
        for (i, element) in self.elements.iter().enumerate() {
            if states[i] && *element == Element::Flexible {
                states[i + 1] = true;
            }
        }
    }
}

fn decode_escapes(input: &str) -> String {
    let mut decoded = String::with_capacity(input.len());
    let mut rest = input;
    while let Some(pos) = rest.find('%') {
        decoded.push_str(&rest[..pos]);
        let after = &rest[pos + 1..];
        let escape = after.get(..2).and_then(|hex| {
            PERCENT_ESCAPES
                .iter()
                .find(|(code, _)| code.eq_ignore_ascii_case(hex))
                .map(|(_, c)| *c)
        });
        match escape {
            Some(c) => {
                decoded.push(c);
                rest = &after[2..];
            }
            None => {
                decoded.push('%');
                rest = after;
            }
        }
    }
    decoded.push_str(rest);
    decoded
}
