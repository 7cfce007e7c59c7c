//! Patient handout generation.
//!
//! A handout is a short plain-text summary of one card written for patients.
//! Generation is a pure function of the card; writing it to disk is a
//! separate step.
//!
//! Layout:
//!
//! ```text
//! {name} — Patient Handout (Draft)
//! What it is: {core criteria summary}
//! Common treatments:
//! - Therapy: {psychotherapies, or "varies by person"}
//! - Medicines: {sorted unique agent names, or a fallback sentence}
//! Notes: {fixed safety notice}
//! ```

use std::collections::BTreeSet;
use std::path::{Component, Path, PathBuf};

use tracing::info;

use psyref_contracts::{
    card::Card,
    error::{PsyrefError, PsyrefResult},
};

/// Shown in the therapy line when a card lists no psychotherapies.
pub const NO_THERAPY_LISTED: &str = "varies by person";

/// Shown in the medicines line when a card lists no named agents.
pub const NO_MEDICINES_LISTED: &str = "Discuss options with your clinician.";

/// The fixed safety notice closing every handout.
pub const SAFETY_NOTICE: &str = "Notes: Medicine choices depend on your health history and other medicines. Never change a dose without your prescriber.";

/// All named agents on the card across both tiers, sorted and de-duplicated.
///
/// Agents without a name are skipped.
pub fn medicine_names(card: &Card) -> Vec<&str> {
    card.agents()
        .filter_map(|agent| agent.name.as_deref())
        .collect::<BTreeSet<&str>>()
        .into_iter()
        .collect()
}

/// Generate the handout text for `card`.
pub fn handout(card: &Card) -> String {
    let therapy = card.psychotherapies.join(", ");
    let therapy = if therapy.is_empty() {
        NO_THERAPY_LISTED.to_string()
    } else {
        therapy
    };

    let medicines = medicine_names(card);
    let medicines = if medicines.is_empty() {
        NO_MEDICINES_LISTED.to_string()
    } else {
        medicines.join(", ")
    };

    let mut output = format!("{} — Patient Handout (Draft)\n", card.name());
    output.push_str(&format!("What it is: {}\n", card.core_criteria_summary()));
    output.push_str("Common treatments:\n");
    output.push_str(&format!("- Therapy: {therapy}\n"));
    output.push_str(&format!("- Medicines: {medicines}\n"));
    output.push_str(SAFETY_NOTICE);
    output
}

/// The file name a handout for `card` is saved under.
///
/// Spaces and path separators in the card name become `_`, so the result is
/// always a single file name.
pub fn handout_file_name(card: &Card) -> String {
    let stem: String = card
        .name()
        .chars()
        .map(|c| match c {
            ' ' | '/' | '\\' => '_',
            other => other,
        })
        .collect();
    format!("{stem}_handout.txt")
}

/// Write the handout for `card` into `dir` and return the file path.
///
/// Returns `PsyrefError::HandoutWrite` if the file cannot be written.
pub fn write_handout(card: &Card, dir: &Path) -> PsyrefResult<PathBuf> {
    let file_name = handout_file_name(card);
    let mut components = Path::new(&file_name).components();
    if !matches!(
        (components.next(), components.next()),
        (Some(Component::Normal(_)), None)
    ) {
        return Err(PsyrefError::HandoutWrite {
            path: dir.join(&file_name).display().to_string(),
            reason: format!("'{file_name}' is not a plain file name"),
        });
    }

    let path = dir.join(&file_name);

    std::fs::write(&path, handout(card)).map_err(|e| PsyrefError::HandoutWrite {
        path: path.display().to_string(),
        reason: e.to_string(),
    })?;

    info!(name = %card.name(), path = %path.display(), "handout written");
    Ok(path)
}
