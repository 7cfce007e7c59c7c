//! Search blob construction.
//!
//! The blob is the single text a card is scored against. Field order and
//! the space separators are fixed; the `workup_considerations`, `codes` and
//! `disclaimer` fields are deliberately left out.

use psyref_contracts::card::Card;

/// Build the searchable text for `card`, in its original letter case.
///
/// Layout (space separated):
///   name, core criteria, differential, screener names, psychotherapies,
///   special populations, references, then the medication blob.
pub fn search_blob(card: &Card) -> String {
    let diagnosis = &card.diagnosis;
    let screener_names: Vec<&str> = diagnosis
        .screeners
        .iter()
        .map(|screener| screener.name.as_str())
        .collect();

    let mut blob = [
        diagnosis.name.as_str(),
        diagnosis.core_criteria_summary.as_str(),
        diagnosis.differential.join(" ").as_str(),
        screener_names.join(" ").as_str(),
        card.psychotherapies.join(" ").as_str(),
        card.special_populations.join(" ").as_str(),
        card.references.join(" ").as_str(),
    ]
    .join(" ");

    blob.push(' ');
    blob.push_str(&medication_blob(card));
    blob
}

/// Build the medication part of the blob.
///
/// Tiers in order first-line then second-line; for each class its name,
/// then each agent's name and adult dose range. Absent values contribute an
/// empty string.
pub fn medication_blob(card: &Card) -> String {
    let mut parts: Vec<&str> = Vec::new();

    for (_, classes) in card.medications.tiers() {
        for class in classes {
            parts.push(&class.class_name);
            for agent in &class.agents {
                parts.push(agent.name.as_deref().unwrap_or(""));
                parts.push(agent.adult_dose_range.as_deref().unwrap_or(""));
            }
        }
    }

    parts.join(" ")
}
