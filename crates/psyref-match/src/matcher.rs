//! Keyword-overlap matcher.
//!
//! `KeywordMatcher` implements the `Ranker` trait from psyref-core.
//!
//! Scoring algorithm:
//!
//! 1. Lower-case the query and the card's search blob.
//! 2. Split the query on whitespace into tokens.
//! 3. Count the tokens that occur anywhere in the blob as a substring.
//!    Duplicate tokens count once per occurrence in the query.
//! 4. Add [`NAME_BONUS`] if any token occurs in the lower-cased card name.
//!
//! Containment is plain substring search, so `dep` hits `depression` and a
//! two-letter token can hit almost every card. That is the expected ranking
//! behavior and must not be tightened to word boundaries.

use tracing::debug;

use psyref_contracts::card::Card;
use psyref_core::traits::Ranker;

use crate::blob::search_blob;

/// Points added when a query token occurs in the card name.
pub const NAME_BONUS: u32 = 2;

/// How a single card's score was reached.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MatchBreakdown {
    /// Lower-cased query tokens that occur in the blob, in query order.
    pub hit_tokens: Vec<String>,
    /// Whether any token occurs in the card name.
    pub name_bonus: bool,
}

impl MatchBreakdown {
    /// Number of blob hits.
    pub fn hits(&self) -> u32 {
        self.hit_tokens.len() as u32
    }

    /// Final score: blob hits plus the name bonus.
    pub fn total(&self) -> u32 {
        if self.name_bonus {
            self.hits() + NAME_BONUS
        } else {
            self.hits()
        }
    }
}

/// The bag-of-words matcher used by psyref hosts.
#[derive(Debug, Clone, Copy, Default)]
pub struct KeywordMatcher;

impl KeywordMatcher {
    pub fn new() -> Self {
        Self
    }

    /// Score `card` against `query` and report which tokens contributed.
    pub fn breakdown(&self, card: &Card, query: &str) -> MatchBreakdown {
        let query = query.to_lowercase();
        let blob = search_blob(card).to_lowercase();
        let name = card.name().to_lowercase();

        let hit_tokens: Vec<String> = query
            .split_whitespace()
            .filter(|token| blob.contains(*token))
            .map(str::to_string)
            .collect();

        let name_bonus = query.split_whitespace().any(|token| name.contains(token));

        MatchBreakdown {
            hit_tokens,
            name_bonus,
        }
    }
}

impl Ranker for KeywordMatcher {
    fn score(&self, card: &Card, query: &str) -> u32 {
        let breakdown = self.breakdown(card, query);
        let score = breakdown.total();
        debug!(
            name = %card.name(),
            hits = breakdown.hits(),
            name_bonus = breakdown.name_bonus,
            score,
            "scored card"
        );
        score
    }
}
