//! Literature sources behind a trait seam.
//!
//! The [`Source`] trait covers the two network calls the pipeline needs: an
//! identifier search and a batched record fetch. [`PubMedSource`] talks to
//! NCBI E-utilities; [`MockSource`] serves canned data for tests.

mod parser;
mod pubmed;

pub mod mock;

pub use mock::MockSource;
pub use parser::parse_efetch_xml;
pub use pubmed::PubMedSource;

use async_trait::async_trait;

use crate::models::RawArticleRecord;

/// Interface of a literature database the classifier can draw records from.
#[async_trait]
pub trait Source: Send + Sync + std::fmt::Debug {
    /// Human-readable name of this source
    fn name(&self) -> &str;

    /// Search for record identifiers matching `query`, at most `limit` of them.
    ///
    /// No matches is `Ok(vec![])`, not an error.
    async fn search_ids(&self, query: &str, limit: usize) -> Result<Vec<String>, SourceError>;

    /// Fetch the raw records for `ids` in a single request.
    ///
    /// Records are parsed leniently: missing fields are `None`, never errors.
    async fn fetch_records(&self, ids: &[String]) -> Result<Vec<RawArticleRecord>, SourceError>;
}

/// Errors that can occur when interacting with a source
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    /// The source could not be reached or answered with a non-success status
    #[error("Transport error: {0}")]
    Transport(String),

    /// The response arrived but is not shaped as expected
    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    /// Invalid request parameters
    #[error("Invalid request: {0}")]
    InvalidRequest(String),
}

impl From<reqwest::Error> for SourceError {
    fn from(err: reqwest::Error) -> Self {
        SourceError::Transport(err.to_string())
    }
}

impl From<serde_json::Error> for SourceError {
    fn from(err: serde_json::Error) -> Self {
        SourceError::MalformedResponse(format!("JSON: {}", err))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_messages() {
        let err = SourceError::Transport("connection refused".to_string());
        assert_eq!(err.to_string(), "Transport error: connection refused");

        let err: SourceError = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert!(matches!(err, SourceError::MalformedResponse(_)));
        assert!(err.to_string().starts_with("Malformed response: JSON:"));
    }
}
