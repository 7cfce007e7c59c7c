//! Structural validation of the card source.
//!
//! The raw JSON document is checked against the embedded card schema before
//! any card is decoded. Every violation is collected so operators see the
//! full failure set in one pass instead of fixing the data file one error at
//! a time.

use serde_json::Value;
use tracing::warn;

/// The embedded JSON Schema for a card collection.
pub const CARD_SCHEMA: &str = include_str!("../schema/cards.schema.json");

/// Validate `document` against [`CARD_SCHEMA`].
///
/// Returns every violation as a human-readable message, located by JSON
/// pointer (e.g. `/2/diagnosis: "name" is a required property`). An empty
/// `Vec` means the document is structurally valid.
pub fn validate_document(document: &Value) -> Vec<String> {
    let schema: Value = match serde_json::from_str(CARD_SCHEMA) {
        Ok(schema) => schema,
        Err(e) => return vec![format!("embedded card schema is not valid JSON: {e}")],
    };

    let validator = match jsonschema::validator_for(&schema) {
        Ok(validator) => validator,
        Err(e) => return vec![format!("embedded card schema failed to compile: {e}")],
    };

    validator
        .iter_errors(document)
        .map(|error| {
            let pointer = error.instance_path.to_string();
            let message = format!("{}: {}", location(&pointer), error);
            warn!(%message, "card source schema violation");
            message
        })
        .collect()
}

/// Render an empty JSON pointer as the document root.
fn location(pointer: &str) -> &str {
    if pointer.is_empty() {
        "(root)"
    } else {
        pointer
    }
}
