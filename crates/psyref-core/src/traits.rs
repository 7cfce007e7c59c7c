//! Trait definitions for the two lookup seams.
//!
//! - `CardLookup` — the read-only card collection
//! - `Ranker`     — free-text scoring over that collection
//!
//! The resolver only talks to these traits, so hosts and tests can swap the
//! JSON-backed store or the keyword matcher for anything else.

use psyref_contracts::{card::Card, resolution::ScoredCard};

/// A read-only, ordered collection of cards.
///
/// Implementations are loaded once and never mutated, so shared references
/// may be handed to any number of readers.
pub trait CardLookup: Send + Sync {
    /// Exact, case-sensitive lookup by card name.
    fn find_by_name(&self, name: &str) -> Option<&Card>;

    /// All cards in their original order.
    fn all(&self) -> &[Card];
}

/// Scores cards against a free-text query.
///
/// Implementations must be pure: the same card and query always produce the
/// same score.
pub trait Ranker: Send + Sync {
    /// Score one card against `query`. Higher is better.
    fn score(&self, card: &Card, query: &str) -> u32;

    /// Score every card and order them by descending score.
    ///
    /// The sort is stable, so cards with equal scores keep their original
    /// order. A query without any whitespace-separated token has no ranking
    /// and yields an empty `Vec`.
    fn rank<'a>(&self, cards: &'a [Card], query: &str) -> Vec<ScoredCard<'a>> {
        // A blank query ("   ") has no tokens and is treated as no query at
        // all, rather than as a submitted query that scores every card 0.
        if query.split_whitespace().next().is_none() {
            return Vec::new();
        }

        let mut ranked: Vec<ScoredCard<'a>> = cards
            .iter()
            .enumerate()
            .map(|(position, card)| ScoredCard {
                position,
                score: self.score(card, query),
                card,
            })
            .collect();

        ranked.sort_by(|a, b| b.score.cmp(&a.score));
        ranked
    }

    /// The top-ranked card, or `None` when there is no ranking.
    fn best_match<'a>(&self, cards: &'a [Card], query: &str) -> Option<ScoredCard<'a>> {
        self.rank(cards, query).into_iter().next()
    }
}
