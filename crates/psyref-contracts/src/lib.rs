//! # psyref-contracts
//!
//! Shared types, error types, and result types for the psyref workspace.
//!
//! All crates in the workspace import from here. No business logic lives in
//! this crate — only data definitions and error types.

pub mod card;
pub mod error;
pub mod resolution;
