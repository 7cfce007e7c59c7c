//! # psyref-store
//!
//! The read-only card collection for psyref hosts.
//!
//! ## Overview
//!
//! This crate provides [`CardStore`], which implements the
//! [`CardLookup`](psyref_core::traits::CardLookup) trait. The collection is
//! loaded once from a JSON document, validated against an embedded JSON
//! Schema, checked for empty and duplicate names, and never mutated again.
//!
//! ## Quick start
//!
//! ```rust,ignore
//! use std::path::Path;
//! use psyref_store::CardStore;
//!
//! let store = CardStore::from_file(Path::new("data/diagnoses.json"))?;
//! println!("{} cards, digest {}", store.len(), store.source_digest());
//! ```

pub mod schema;
pub mod store;

pub use store::CardStore;

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use std::path::Path;

    use serde_json::json;

    use psyref_contracts::error::DataLoadError;
    use psyref_core::traits::CardLookup;

    use crate::CardStore;

    const SHIPPED_DATA: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/../../data/diagnoses.json");

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn card(name: &str, summary: &str) -> serde_json::Value {
        json!({ "diagnosis": { "name": name, "core_criteria_summary": summary } })
    }

    fn load(cards: serde_json::Value) -> Result<CardStore, DataLoadError> {
        CardStore::from_json_str(&cards.to_string())
    }

    // ── 1. shipped data ───────────────────────────────────────────────────────

    #[test]
    fn test_shipped_data_loads() {
        let store = CardStore::from_file(Path::new(SHIPPED_DATA)).unwrap();
        assert!(!store.is_empty());
        assert!(store.find_by_name("Obsessive-Compulsive Disorder").is_some());
    }

    /// Every loaded card can be found again by its own name, unchanged.
    #[test]
    fn test_round_trip_lookup() {
        let store = CardStore::from_file(Path::new(SHIPPED_DATA)).unwrap();
        for card in store.all() {
            assert_eq!(store.find_by_name(card.name()), Some(card));
        }
    }

    // ── 2. ordering and lookup ────────────────────────────────────────────────

    #[test]
    fn test_names_preserve_source_order() {
        let store = load(json!([card("OCD", "a"), card("GAD", "b"), card("MDD", "c")])).unwrap();
        let names: Vec<&str> = store.names().collect();
        assert_eq!(names, vec!["OCD", "GAD", "MDD"]);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn test_lookup_is_exact_and_case_sensitive() {
        let store = load(json!([card("OCD", "a")])).unwrap();
        assert!(store.find_by_name("OCD").is_some());
        assert!(store.find_by_name("ocd").is_none());
        assert!(store.find_by_name("OCD ").is_none());
    }

    #[test]
    fn test_trait_lookup_matches_inherent_lookup() {
        let store = load(json!([card("OCD", "a"), card("GAD", "b")])).unwrap();
        let lookup: &dyn CardLookup = &store;
        assert_eq!(lookup.all().len(), 2);
        assert_eq!(lookup.find_by_name("GAD"), store.find_by_name("GAD"));
    }

    #[test]
    fn test_empty_collection_is_valid() {
        let store = load(json!([])).unwrap();
        assert!(store.is_empty());
        assert!(store.find_by_name("OCD").is_none());
    }

    // ── 3. load failures ──────────────────────────────────────────────────────

    #[test]
    fn test_duplicate_names_rejected() {
        let result = load(json!([card("OCD", "a"), card("GAD", "b"), card("OCD", "c")]));

        match result {
            Err(DataLoadError::DuplicateName { name, first, second }) => {
                assert_eq!(name, "OCD");
                assert_eq!(first, 0);
                assert_eq!(second, 2);
            }
            other => panic!("expected DuplicateName, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_name_rejected() {
        let result = load(json!([card("OCD", "a"), card("  ", "b")]));
        assert!(matches!(result, Err(DataLoadError::EmptyName { position: 1 })));
    }

    #[test]
    fn test_missing_core_criteria_rejected() {
        let result = load(json!([{ "diagnosis": { "name": "OCD" } }]));

        match result {
            Err(DataLoadError::SchemaViolation { violations }) => {
                assert!(
                    violations.iter().any(|v| v.contains("core_criteria_summary")),
                    "violations should name the missing field: {violations:?}"
                );
            }
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_name_rejected() {
        let result = load(json!([{ "diagnosis": { "core_criteria_summary": "a" } }]));
        assert!(matches!(result, Err(DataLoadError::SchemaViolation { .. })));
    }

    #[test]
    fn test_all_schema_violations_reported() {
        let result = load(json!([
            { "diagnosis": { "name": "OCD" } },
            { "diagnosis": { "core_criteria_summary": "b" } }
        ]));

        match result {
            Err(DataLoadError::SchemaViolation { violations }) => assert_eq!(violations.len(), 2),
            other => panic!("expected SchemaViolation, got {:?}", other),
        }
    }

    #[test]
    fn test_wrongly_typed_list_rejected() {
        let result = load(json!([{
            "diagnosis": { "name": "OCD", "core_criteria_summary": "a" },
            "psychotherapies": "ERP"
        }]));
        assert!(matches!(result, Err(DataLoadError::SchemaViolation { .. })));
    }

    #[test]
    fn test_top_level_object_rejected() {
        let result = load(card("OCD", "a"));
        assert!(matches!(result, Err(DataLoadError::SchemaViolation { .. })));
    }

    #[test]
    fn test_invalid_json_rejected() {
        let result = CardStore::from_json_str("[ { \"diagnosis\": ");
        match result {
            Err(DataLoadError::Malformed { reason }) => assert!(reason.contains("invalid JSON")),
            other => panic!("expected Malformed, got {:?}", other),
        }
    }

    #[test]
    fn test_missing_file_rejected() {
        let result = CardStore::from_file(Path::new("/nonexistent/psyref/diagnoses.json"));
        assert!(matches!(result, Err(DataLoadError::SourceMissing { .. })));
    }

    // ── 4. source digest ──────────────────────────────────────────────────────

    /// A path whose parent is a regular file cannot be stat'ed; that is an
    /// unreadable source, not a missing one.
    #[test]
    fn test_unreadable_path_is_not_reported_missing() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/Cargo.toml/diagnoses.json");
        let result = CardStore::from_file(Path::new(path));
        assert!(
            matches!(result, Err(DataLoadError::SourceUnreadable { .. })),
            "got: {result:?}"
        );
    }

    #[test]
    fn test_directory_source_is_unreadable() {
        let result = CardStore::from_file(Path::new(env!("CARGO_MANIFEST_DIR")));
        assert!(matches!(result, Err(DataLoadError::SourceUnreadable { .. })));
    }

    #[test]
    fn test_source_digest_tracks_content() {
        let a = load(json!([card("OCD", "a")])).unwrap();
        let a_again = load(json!([card("OCD", "a")])).unwrap();
        let b = load(json!([card("OCD", "b")])).unwrap();

        assert_eq!(a.source_digest().len(), 64);
        assert_eq!(a.source_digest(), a_again.source_digest());
        assert_ne!(a.source_digest(), b.source_digest());
    }

    #[test]
    fn test_source_digest_of_empty_array() {
        let store = CardStore::from_json_str("[]").unwrap();
        assert_eq!(
            store.source_digest(),
            "4f53cda18c2baa0c0354bb5f9a3ecbe5ed12ab4d8e11ba873c2f11161202b945"
        );
    }
}
