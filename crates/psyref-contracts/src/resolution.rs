//! Result types for a single lookup request.
//!
//! A request either names a card (a selection) or carries free text (a
//! query). Every outcome, including "nothing to show", is a `Resolution`
//! variant so hosts handle them on the normal rendering path.

use serde::Serialize;

use crate::card::Card;

/// The label a selection list shows for "nothing selected".
pub const NO_SELECTION: &str = "—";

/// A card together with its query score.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ScoredCard<'a> {
    /// Position of the card in the collection's original order.
    pub position: usize,
    pub score: u32,
    pub card: &'a Card,
}

/// The outcome of resolving one request against the collection.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution<'a> {
    /// The selected name was found.
    Selected(&'a Card),

    /// The query ranked this card highest.
    Matched { card: &'a Card, score: u32 },

    /// The selected name does not exist in the collection.
    NotFound { name: String },

    /// Neither a selection nor a usable query was supplied, or the
    /// collection is empty.
    NoResult,
}

impl<'a> Resolution<'a> {
    /// The resolved card, if there is one.
    pub fn card(&self) -> Option<&'a Card> {
        match *self {
            Resolution::Selected(card) => Some(card),
            Resolution::Matched { card, .. } => Some(card),
            Resolution::NotFound { .. } | Resolution::NoResult => None,
        }
    }
}
