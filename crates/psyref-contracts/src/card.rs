//! The card data model.
//!
//! A `Card` is one diagnosis's full reference entry. Cards are decoded once
//! from the data file and never mutated afterwards.
//!
//! The on-disk layout nests the diagnosis-specific fields under a
//! `diagnosis` object, while medications, therapies and references live at
//! the top level of the card:
//!
//! ```json
//! {
//!   "diagnosis": { "name": "OCD", "core_criteria_summary": "..." },
//!   "medications": { "first_line": [ { "class": "SSRI", "agents": [] } ] },
//!   "psychotherapies": ["ERP"]
//! }
//! ```
//!
//! Every field other than `diagnosis.name` and
//! `diagnosis.core_criteria_summary` is optional and defaults to empty.

use serde::{Deserialize, Deserializer, Serialize};

/// Decode a field that may be JSON `null` as its default value.
///
/// Paired with `#[serde(default)]`, which covers the field being absent.
fn nullable<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Deserialize<'de> + Default,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// One diagnosis card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Card {
    pub diagnosis: Diagnosis,

    #[serde(default, deserialize_with = "nullable")]
    pub medications: Medications,

    #[serde(default, deserialize_with = "nullable")]
    pub psychotherapies: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub special_populations: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub references: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub disclaimer: String,
}

impl Card {
    /// The card's unique name, used as the lookup key.
    pub fn name(&self) -> &str {
        &self.diagnosis.name
    }

    /// The short summary of the diagnostic criteria.
    pub fn core_criteria_summary(&self) -> &str {
        &self.diagnosis.core_criteria_summary
    }

    /// Every agent on the card, first-line tier before second-line.
    pub fn agents(&self) -> impl Iterator<Item = &MedicationAgent> {
        self.medications
            .tiers()
            .flat_map(|(_, classes)| classes.iter())
            .flat_map(|class| class.agents.iter())
    }
}

/// The diagnosis-specific half of a card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Diagnosis {
    pub name: String,

    /// Free-form diagnostic code text (e.g. "F42.2 (ICD-10)").
    #[serde(default, deserialize_with = "nullable")]
    pub codes: String,

    pub core_criteria_summary: String,

    #[serde(default, deserialize_with = "nullable")]
    pub differential: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub screeners: Vec<Screener>,

    #[serde(default, deserialize_with = "nullable")]
    pub workup_considerations: Vec<String>,
}

/// A screening instrument listed on a card.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Screener {
    #[serde(default, deserialize_with = "nullable")]
    pub name: String,

    /// What the screener is used for.
    #[serde(rename = "use", default)]
    pub use_case: Option<String>,

    #[serde(default)]
    pub cutoffs: Option<String>,
}

/// A medication priority grouping.
///
/// Tiers are always processed in declaration order: first-line, then
/// second-line.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Tier {
    FirstLine,
    SecondLine,
}

impl Tier {
    /// All tiers in processing order.
    pub const ALL: [Tier; 2] = [Tier::FirstLine, Tier::SecondLine];

    /// The key used for this tier in the data file.
    pub fn key(self) -> &'static str {
        match self {
            Tier::FirstLine => "first_line",
            Tier::SecondLine => "second_line",
        }
    }

    /// The heading shown for this tier in the card view.
    pub fn title(self) -> &'static str {
        match self {
            Tier::FirstLine => "First Line",
            Tier::SecondLine => "Second Line",
        }
    }
}

/// The medication tiers of a card.
///
/// A tier that is absent from the data file is `None` and is skipped
/// everywhere; a tier that is present but empty is `Some(vec![])` and still
/// gets a heading in the card view.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Medications {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub first_line: Option<Vec<MedicationClass>>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub second_line: Option<Vec<MedicationClass>>,
}

impl Medications {
    /// The classes of one tier, if the tier is present.
    pub fn tier(&self, tier: Tier) -> Option<&[MedicationClass]> {
        match tier {
            Tier::FirstLine => self.first_line.as_deref(),
            Tier::SecondLine => self.second_line.as_deref(),
        }
    }

    /// Present tiers in processing order.
    pub fn tiers(&self) -> impl Iterator<Item = (Tier, &[MedicationClass])> {
        Tier::ALL
            .into_iter()
            .filter_map(move |tier| self.tier(tier).map(|classes| (tier, classes)))
    }
}

/// A drug class within a tier, e.g. "SSRI".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationClass {
    #[serde(rename = "class", default, deserialize_with = "nullable")]
    pub class_name: String,

    #[serde(default, deserialize_with = "nullable")]
    pub agents: Vec<MedicationAgent>,
}

/// A single drug within a class. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MedicationAgent {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub adult_dose_range: Option<String>,

    #[serde(default)]
    pub titration: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub key_contras: Vec<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub monitoring: Vec<String>,

    #[serde(default)]
    pub black_box: Option<String>,

    #[serde(default, deserialize_with = "nullable")]
    pub interactions: Vec<String>,

    #[serde(default)]
    pub notes: Option<String>,
}
