//! # psyref-match
//!
//! Free-text matching for psyref hosts.
//!
//! This crate provides [`KeywordMatcher`], which implements the
//! [`Ranker`](psyref_core::traits::Ranker) trait with a bag-of-words
//! token-overlap score plus a name bonus, and the [`search_blob`] builder the
//! score is computed over.
//!
//! There is no index. Every query rescans the whole collection, which keeps
//! ranking exactly reproducible for a collection of a few dozen cards.

pub mod blob;
pub mod matcher;

pub use blob::{medication_blob, search_blob};
pub use matcher::{KeywordMatcher, MatchBreakdown, NAME_BONUS};

// ── Tests ─────────────────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
    use serde_json::json;

    use psyref_contracts::card::Card;
    use psyref_core::traits::Ranker;

    use super::{medication_blob, search_blob, KeywordMatcher};

    // ── Helpers ───────────────────────────────────────────────────────────────

    fn card(value: serde_json::Value) -> Card {
        serde_json::from_value(value).unwrap()
    }

    fn simple(name: &str, summary: &str) -> Card {
        card(json!({ "diagnosis": { "name": name, "core_criteria_summary": summary } }))
    }

    /// The two-card collection from the reference walkthrough.
    fn ocd_and_gad() -> Vec<Card> {
        vec![
            card(json!({
                "diagnosis": { "name": "OCD", "core_criteria_summary": "obsessions and compulsions" },
                "medications": {
                    "first_line": [
                        { "class": "SSRI", "agents": [ { "name": "Fluoxetine", "adult_dose_range": "20-80mg" } ] }
                    ]
                }
            })),
            card(json!({
                "diagnosis": { "name": "GAD", "core_criteria_summary": "excessive worry" },
                "medications": {}
            })),
        ]
    }

    // ── Blob layout ───────────────────────────────────────────────────────────

    #[test]
    fn test_search_blob_field_order() {
        let c = card(json!({
            "diagnosis": {
                "name": "N",
                "codes": "CODE",
                "core_criteria_summary": "C",
                "differential": ["d1", "d2"],
                "screeners": [ { "name": "S", "use": "USE", "cutoffs": "CUT" } ],
                "workup_considerations": ["WORKUP"]
            },
            "medications": {
                "second_line": [ { "class": "K2", "agents": [ { "name": "B" } ] } ],
                "first_line": [ { "class": "K1", "agents": [ { "name": "A", "adult_dose_range": "1mg" } ] } ]
            },
            "psychotherapies": ["P"],
            "special_populations": ["SP"],
            "references": ["R"],
            "disclaimer": "DISCLAIMER"
        }));

        assert_eq!(search_blob(&c), "N C d1 d2 S P SP R K1 A 1mg K2 B ");
    }

    #[test]
    fn test_medication_blob_skips_missing_values() {
        let c = card(json!({
            "diagnosis": { "name": "N", "core_criteria_summary": "C" },
            "medications": {
                "first_line": [ { "class": "SSRI", "agents": [ {}, { "name": "Fluoxetine" } ] } ]
            }
        }));

        assert_eq!(medication_blob(&c), "SSRI   Fluoxetine ");
    }

    #[test]
    fn test_medication_blob_empty_without_tiers() {
        assert_eq!(medication_blob(&simple("N", "C")), "");
    }

    // ── Scoring ───────────────────────────────────────────────────────────────

    /// `dep` must hit `depression`: containment, not whole words.
    #[test]
    fn test_substring_semantics() {
        let c = simple("MDD", "persistent depression");
        assert_eq!(KeywordMatcher.score(&c, "dep"), 1);
    }

    #[test]
    fn test_scoring_is_case_insensitive() {
        let cards = ocd_and_gad();
        assert_eq!(KeywordMatcher.score(&cards[0], "FLUOXETINE"), 1);
    }

    #[test]
    fn test_duplicate_tokens_count_per_occurrence() {
        let cards = ocd_and_gad();
        // Two blob hits plus the name bonus.
        assert_eq!(KeywordMatcher.score(&cards[0], "ocd ocd"), 4);
    }

    #[test]
    fn test_unsearched_fields_do_not_score() {
        let c = card(json!({
            "diagnosis": {
                "name": "N",
                "codes": "F42",
                "core_criteria_summary": "C",
                "workup_considerations": ["thyroid"]
            },
            "disclaimer": "educational"
        }));

        assert_eq!(KeywordMatcher.score(&c, "f42 thyroid educational"), 0);
    }

    #[test]
    fn test_breakdown_reports_hit_tokens() {
        let cards = ocd_and_gad();
        let breakdown = KeywordMatcher.breakdown(&cards[0], "OCD worry Fluoxetine");

        assert_eq!(breakdown.hit_tokens, vec!["ocd".to_string(), "fluoxetine".to_string()]);
        assert!(breakdown.name_bonus);
        assert_eq!(breakdown.hits(), 2);
        assert_eq!(breakdown.total(), 4);
    }

    /// The name bonus separates two cards whose blobs otherwise tie.
    #[test]
    fn test_name_bonus_breaks_even_blobs() {
        let cards = vec![simple("Alpha", "shared text"), simple("Beta", "shared text")];

        assert_eq!(KeywordMatcher.score(&cards[0], "shared bet"), 1);
        assert_eq!(KeywordMatcher.score(&cards[1], "shared bet"), 4);

        let best = KeywordMatcher.best_match(&cards, "shared bet").unwrap();
        assert_eq!(best.card.name(), "Beta");
        assert_eq!(best.position, 1);
    }

    // ── Ranking ───────────────────────────────────────────────────────────────

    #[test]
    fn test_ties_keep_collection_order() {
        let cards = vec![
            simple("First", "shared text"),
            simple("Second", "shared text"),
            simple("Third", "other"),
        ];

        let ranked = KeywordMatcher.rank(&cards, "shared");
        let names: Vec<&str> = ranked.iter().map(|s| s.card.name()).collect();
        assert_eq!(names, vec!["First", "Second", "Third"]);
        assert_eq!(ranked[0].score, 1);
        assert_eq!(ranked[2].score, 0);
    }

    #[test]
    fn test_rank_orders_by_descending_score() {
        let cards = vec![
            simple("Low", "anxiety"),
            simple("High", "anxiety worry sleep"),
            simple("Mid", "anxiety worry"),
        ];

        let ranked = KeywordMatcher.rank(&cards, "anxiety worry sleep");
        let names: Vec<&str> = ranked.iter().map(|s| s.card.name()).collect();
        assert_eq!(names, vec!["High", "Mid", "Low"]);
    }

    #[test]
    fn test_zero_scores_return_first_card() {
        let cards = ocd_and_gad();
        let best = KeywordMatcher.best_match(&cards, "schizophrenia").unwrap();
        assert_eq!(best.card.name(), "OCD");
        assert_eq!(best.score, 0);
    }

    #[test]
    fn test_empty_query_has_no_result() {
        let cards = ocd_and_gad();
        assert!(KeywordMatcher.best_match(&cards, "").is_none());
        assert!(KeywordMatcher.best_match(&cards, " \t\n").is_none());
        assert!(KeywordMatcher.rank(&cards, "").is_empty());
    }

    #[test]
    fn test_empty_collection_has_no_result() {
        assert!(KeywordMatcher.best_match(&[], "ocd").is_none());
    }

    #[test]
    fn test_matching_is_deterministic() {
        let cards = ocd_and_gad();
        let first = KeywordMatcher.rank(&cards, "worry ssri");
        for _ in 0..10 {
            assert_eq!(KeywordMatcher.rank(&cards, "worry ssri"), first);
        }
    }

    // ── End-to-end ────────────────────────────────────────────────────────────

    #[test]
    fn test_ocd_fluoxetine_walkthrough() {
        let cards = ocd_and_gad();

        assert_eq!(KeywordMatcher.score(&cards[0], "ocd fluoxetine"), 4);
        assert_eq!(KeywordMatcher.score(&cards[1], "ocd fluoxetine"), 0);

        let best = KeywordMatcher.best_match(&cards, "ocd fluoxetine").unwrap();
        assert_eq!(best.card.name(), "OCD");
    }
}
