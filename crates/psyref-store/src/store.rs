//! In-memory card store.
//!
//! `CardStore` loads the card collection from a JSON document once and
//! implements the `CardLookup` trait from psyref-core.
//!
//! Load pipeline:
//!
//! 1. Read the raw bytes and record their SHA-256 digest.
//! 2. Parse the bytes as JSON.
//! 3. Validate the document against the embedded card schema.
//! 4. Decode the cards.
//! 5. Reject empty names and duplicate names.
//!
//! Any failure aborts the load. There is no partial collection.

use std::collections::HashMap;
use std::io::ErrorKind;
use std::path::Path;

use serde_json::Value;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

use psyref_contracts::{card::Card, error::DataLoadError};
use psyref_core::traits::CardLookup;

use crate::schema::validate_document;

/// The immutable, ordered card collection.
///
/// ```rust,ignore
/// use psyref_store::CardStore;
///
/// let store = CardStore::from_file(Path::new("data/diagnoses.json"))?;
/// let ocd = store.find_by_name("Obsessive-Compulsive Disorder");
/// ```
#[derive(Debug)]
pub struct CardStore {
    /// Cards in source order.
    cards: Vec<Card>,
    /// Card name -> position in `cards`.
    by_name: HashMap<String, usize>,
    /// Lowercase hex SHA-256 of the raw source bytes.
    source_digest: String,
}

impl CardStore {
    /// Read the file at `path` and load it as a card collection.
    pub fn from_file(path: &Path) -> Result<Self, DataLoadError> {
        let bytes = std::fs::read(path).map_err(|e| match e.kind() {
            ErrorKind::NotFound => DataLoadError::SourceMissing {
                path: path.display().to_string(),
            },
            _ => DataLoadError::SourceUnreadable {
                path: path.display().to_string(),
                reason: e.to_string(),
            },
        })?;

        debug!(path = %path.display(), bytes = bytes.len(), "read card source");
        Self::from_slice(&bytes)
    }

    /// Load a card collection from an in-memory JSON string.
    pub fn from_json_str(s: &str) -> Result<Self, DataLoadError> {
        Self::from_slice(s.as_bytes())
    }

    /// Load a card collection from raw JSON bytes.
    pub fn from_slice(bytes: &[u8]) -> Result<Self, DataLoadError> {
        let source_digest = hex::encode(Sha256::digest(bytes));

        let document: Value =
            serde_json::from_slice(bytes).map_err(|e| DataLoadError::Malformed {
                reason: format!("invalid JSON: {e}"),
            })?;

        let violations = validate_document(&document);
        if !violations.is_empty() {
            return Err(DataLoadError::SchemaViolation { violations });
        }

        let cards: Vec<Card> =
            serde_json::from_value(document).map_err(|e| DataLoadError::Malformed {
                reason: format!("failed to decode cards: {e}"),
            })?;

        let by_name = index_names(&cards)?;

        info!(
            cards = cards.len(),
            digest = %source_digest,
            "card collection loaded"
        );

        Ok(Self {
            cards,
            by_name,
            source_digest,
        })
    }

    /// Exact, case-sensitive lookup by card name.
    pub fn find_by_name(&self, name: &str) -> Option<&Card> {
        self.by_name.get(name).map(|&position| &self.cards[position])
    }

    /// All cards in source order.
    pub fn all(&self) -> &[Card] {
        &self.cards
    }

    /// Card names in source order.
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.cards.iter().map(|card| card.name())
    }

    pub fn len(&self) -> usize {
        self.cards.len()
    }

    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Lowercase hex SHA-256 of the bytes the collection was loaded from.
    pub fn source_digest(&self) -> &str {
        &self.source_digest
    }
}

impl CardLookup for CardStore {
    fn find_by_name(&self, name: &str) -> Option<&Card> {
        CardStore::find_by_name(self, name)
    }

    fn all(&self) -> &[Card] {
        CardStore::all(self)
    }
}

/// Build the name index, rejecting empty and duplicate names.
fn index_names(cards: &[Card]) -> Result<HashMap<String, usize>, DataLoadError> {
    let mut by_name = HashMap::with_capacity(cards.len());

    for (position, card) in cards.iter().enumerate() {
        let name = card.name();
        if name.trim().is_empty() {
            return Err(DataLoadError::EmptyName { position });
        }

        if let Some(&first) = by_name.get(name) {
            return Err(DataLoadError::DuplicateName {
                name: name.to_string(),
                first,
                second: position,
            });
        }

        by_name.insert(name.to_string(), position);
    }

    Ok(by_name)
}
