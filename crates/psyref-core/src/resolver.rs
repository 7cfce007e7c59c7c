//! The resolver: turns one request into a `Resolution`.
//!
//! A request carries an optional selected name and an optional free-text
//! query. Resolution order:
//!
//!   Selection → exact lookup   (found → Selected, absent → NotFound)
//!   Query     → ranker         (top card → Matched, no ranking → NoResult)
//!   Neither   → NoResult
//!
//! A selection always wins over a query, even when the selected name does
//! not exist.

use tracing::{debug, info, warn};

use psyref_contracts::resolution::{Resolution, NO_SELECTION};

use crate::traits::{CardLookup, Ranker};

/// Resolves selections and queries against one card collection.
///
/// The collection is borrowed: it is built once at startup and outlives every
/// resolver that reads from it.
pub struct Resolver<'s> {
    cards: &'s dyn CardLookup,
    ranker: Box<dyn Ranker>,
}

impl<'s> Resolver<'s> {
    /// Create a resolver over `cards` that ranks queries with `ranker`.
    pub fn new(cards: &'s dyn CardLookup, ranker: Box<dyn Ranker>) -> Self {
        Self { cards, ranker }
    }

    /// The options a selection list should show: the "nothing selected"
    /// label, then every card name in collection order.
    pub fn selection_options(&self) -> Vec<&'s str> {
        let cards: &'s dyn CardLookup = self.cards;
        std::iter::once(NO_SELECTION)
            .chain(cards.all().iter().map(|card| card.name()))
            .collect()
    }

    /// Resolve one request.
    ///
    /// `selection` equal to [`NO_SELECTION`] (or empty) counts as no
    /// selection.
    pub fn resolve(&self, selection: Option<&str>, query: Option<&str>) -> Resolution<'s> {
        let cards: &'s dyn CardLookup = self.cards;
        let selection = selection.filter(|name| !name.is_empty() && *name != NO_SELECTION);

        if let Some(name) = selection {
            return match cards.find_by_name(name) {
                Some(card) => {
                    debug!(name = %name, "selection resolved");
                    Resolution::Selected(card)
                }
                None => {
                    warn!(name = %name, "selected card does not exist");
                    Resolution::NotFound {
                        name: name.to_string(),
                    }
                }
            };
        }

        let Some(query) = query else {
            debug!("no selection and no query");
            return Resolution::NoResult;
        };

        match self.ranker.best_match(cards.all(), query) {
            Some(top) => {
                info!(
                    query = %query,
                    name = %top.card.name(),
                    score = top.score,
                    "query matched"
                );
                Resolution::Matched {
                    card: top.card,
                    score: top.score,
                }
            }
            None => {
                debug!(query = %query, "query produced no ranking");
                Resolution::NoResult
            }
        }
    }
}

// ── Tests ────────────────────────────────────────────────────────────────────
