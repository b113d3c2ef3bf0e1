//! # Paper Fetcher
//!
//! Finds PubMed articles with at least one author affiliated with a
//! pharmaceutical or biotech company.
//!
//! ## Architecture
//!
//! The library is organized into several modules:
//!
//! - [`models`]: Raw article records and report rows
//! - [`sources`]: The [`Source`] trait, the PubMed E-utilities client and a mock
//! - [`classify`]: The affiliation heuristic and the record classifier
//! - [`pipeline`]: Search followed by classification
//! - [`report`]: CSV, table and JSON output
//! - [`utils`]: HTTP client
//! - [`config`]: Configuration management

pub mod classify;
pub mod config;
pub mod models;
pub mod pipeline;
pub mod report;
pub mod sources;
pub mod utils;

// Re-export commonly used types
pub use classify::{classify_record, AffiliationHeuristic, RecordClassifier};
pub use models::OutputRow;
pub use pipeline::PaperFetcher;
pub use sources::{PubMedSource, Source, SourceError};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
