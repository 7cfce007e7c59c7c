//! # psyref-core
//!
//! The request-level control flow for psyref hosts.
//!
//! This crate provides:
//! - The two seam traits (`CardLookup`, `Ranker`)
//! - The `Resolver` that turns a selection or a query into a `Resolution`
//!
//! ## Usage
//!
//! ```rust,ignore
//! use psyref_core::{Resolver, traits::{CardLookup, Ranker}};
//!
//! let resolver = Resolver::new(&store, Box::new(KeywordMatcher));
//! let resolution = resolver.resolve(None, Some("ocd first-line meds"));
//! ```

pub mod resolver;
pub mod traits;

pub use resolver::Resolver;
