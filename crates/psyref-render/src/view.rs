//! Plain-text card view.
//!
//! Renders every section of a card for terminal display. Empty optional
//! sections of the diagnosis block are omitted; the therapy, population and
//! reference sections always appear and fall back to [`EMPTY_SECTION`].

use psyref_contracts::card::{Card, MedicationAgent, Screener};

/// Placeholder for a section with no entries.
pub const EMPTY_SECTION: &str = "—";

/// Render the full card.
pub fn render_card(card: &Card) -> String {
    let mut output = format!("## {}\n\n", card.name());

    output.push_str(&render_diagnosis(card));
    output.push('\n');
    output.push_str(&render_medications(card));
    output.push('\n');

    output.push_str("### Psychotherapies\n");
    output.push_str(&or_placeholder(card.psychotherapies.join(", ")));
    output.push_str("\n\n### Special Populations\n");
    output.push_str(&or_placeholder(card.special_populations.join(", ")));
    output.push_str("\n\n### References\n");
    output.push_str(&or_placeholder(card.references.join("; ")));
    output.push('\n');

    if !card.disclaimer.is_empty() {
        output.push('\n');
        output.push_str(&card.disclaimer);
        output.push('\n');
    }

    output
}

fn render_diagnosis(card: &Card) -> String {
    let diagnosis = &card.diagnosis;

    let mut output = String::from("### Diagnosis\n");
    output.push_str(&format!("Codes: {}\n", diagnosis.codes));
    output.push_str(&format!("Core criteria: {}\n", diagnosis.core_criteria_summary));

    if !diagnosis.differential.is_empty() {
        output.push_str(&format!("Differential: {}\n", diagnosis.differential.join(", ")));
    }

    if !diagnosis.screeners.is_empty() {
        let screeners: Vec<String> = diagnosis.screeners.iter().map(screener_line).collect();
        output.push_str(&format!("Screeners: {}\n", screeners.join("; ")));
    }

    if !diagnosis.workup_considerations.is_empty() {
        output.push_str(&format!(
            "Work-up considerations: {}\n",
            diagnosis.workup_considerations.join("; ")
        ));
    }

    output
}

fn screener_line(screener: &Screener) -> String {
    format!(
        "{} – {} ({})",
        screener.name,
        screener.use_case.as_deref().unwrap_or(""),
        screener.cutoffs.as_deref().unwrap_or("")
    )
}

fn render_medications(card: &Card) -> String {
    let mut output = String::from("### Medications\n");

    for (tier, classes) in card.medications.tiers() {
        output.push_str(&format!("{}:\n", tier.title()));
        for class in classes {
            output.push_str(&format!("- {}\n", class.class_name));
            for agent in &class.agents {
                output.push_str(&agent_line(agent));
                output.push('\n');
            }
        }
    }

    output
}

/// One agent bullet, with an indented detail line when any detail is set.
fn agent_line(agent: &MedicationAgent) -> String {
    let mut line = format!("  - {}", agent.name.as_deref().unwrap_or(""));

    if let Some(dose) = agent.adult_dose_range.as_deref().filter(|d| !d.is_empty()) {
        line.push_str(&format!(" — Dose: {dose}"));
    }

    let mut details: Vec<String> = Vec::new();
    if let Some(titration) = non_empty(&agent.titration) {
        details.push(format!("Titration: {titration}"));
    }
    if !agent.key_contras.is_empty() {
        details.push(format!("Contra: {}", agent.key_contras.join(", ")));
    }
    if !agent.monitoring.is_empty() {
        details.push(format!("Monitoring: {}", agent.monitoring.join(", ")));
    }
    if let Some(black_box) = non_empty(&agent.black_box) {
        details.push(format!("Black box: {black_box}"));
    }
    if !agent.interactions.is_empty() {
        details.push(format!("Interactions: {}", agent.interactions.join(", ")));
    }
    if let Some(notes) = non_empty(&agent.notes) {
        details.push(format!("Notes: {notes}"));
    }

    if !details.is_empty() {
        line.push_str("\n     ");
        line.push_str(&details.join(" | "));
    }

    line
}

fn non_empty(value: &Option<String>) -> Option<&str> {
    value.as_deref().filter(|v| !v.is_empty())
}

fn or_placeholder(text: String) -> String {
    if text.is_empty() {
        EMPTY_SECTION.to_string()
    } else {
        text
    }
}
