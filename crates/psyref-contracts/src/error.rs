//! Error types for the psyref workspace.
//!
//! Loading the card collection is the only step that can fail in a way the
//! host cannot recover from; those failures are `DataLoadError`. Everything
//! else a host can do wrong (bad configuration, an unwritable handout
//! directory) is a `PsyrefError`.
//!
//! An unknown name or an empty query are NOT errors. They are ordinary
//! `Resolution` variants handled on the normal rendering path.

use thiserror::Error;

/// Why the card collection could not be loaded.
///
/// Any of these is fatal at startup: the host must not serve a partial
/// collection.
#[derive(Debug, Error)]
pub enum DataLoadError {
    /// The data file does not exist.
    #[error("card source not found: {path}")]
    SourceMissing { path: String },

    /// The data file exists but could not be read.
    #[error("card source '{path}' could not be read: {reason}")]
    SourceUnreadable { path: String, reason: String },

    /// The source is not valid JSON, or a card could not be decoded.
    #[error("card source is malformed: {reason}")]
    Malformed { reason: String },

    /// The source is valid JSON but does not match the card schema.
    #[error("card source failed schema validation: {}", violations.join("; "))]
    SchemaViolation { violations: Vec<String> },

    /// A card's name is empty or only whitespace.
    #[error("card at position {position} has an empty name")]
    EmptyName { position: usize },

    /// Two cards share the same name, so lookup by name would be ambiguous.
    #[error("duplicate card name '{name}' at positions {first} and {second}")]
    DuplicateName {
        name: String,
        first: usize,
        second: usize,
    },
}

/// The unified error type for psyref hosts.
#[derive(Debug, Error)]
pub enum PsyrefError {
    /// The card collection could not be loaded.
    #[error("data load error: {0}")]
    DataLoad(#[from] DataLoadError),

    /// A configuration value is missing or invalid.
    #[error("configuration error: {reason}")]
    ConfigError { reason: String },

    /// A card could not be serialized for output.
    #[error("serialization error: {reason}")]
    Serialization { reason: String },

    /// A handout file could not be written.
    #[error("failed to write handout '{path}': {reason}")]
    HandoutWrite { path: String, reason: String },
}

/// Convenience alias used throughout the psyref crates.
pub type PsyrefResult<T> = Result<T, PsyrefError>;
