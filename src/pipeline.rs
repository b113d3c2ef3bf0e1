//! Search-then-classify pipeline tying the two components together.

use std::sync::Arc;

use crate::classify::RecordClassifier;
use crate::config::Config;
use crate::models::OutputRow;
use crate::sources::{Source, SourceError};

/// Runs an identifier search and classifies the records it returns.
#[derive(Debug, Clone)]
pub struct PaperFetcher {
    source: Arc<dyn Source>,
    classifier: RecordClassifier,
}

impl PaperFetcher {
    /// Create a fetcher with default heuristic settings
    pub fn new(source: Arc<dyn Source>) -> Self {
        let classifier = RecordClassifier::new(Arc::clone(&source));
        Self { source, classifier }
    }

    /// Create a fetcher from loaded configuration
    pub fn from_config(source: Arc<dyn Source>, config: &Config) -> Self {
        let classifier = RecordClassifier::from_config(Arc::clone(&source), config);
        Self { source, classifier }
    }

    /// The classifier used for the second stage
    pub fn classifier(&self) -> &RecordClassifier {
        &self.classifier
    }

    /// Search `query` (at most `limit` ids) and return the rows of articles
    /// with at least one non-academic author.
    pub async fn fetch(&self, query: &str, limit: usize) -> Result<Vec<OutputRow>, SourceError> {
        tracing::debug!("Fetching {} IDs for query: {}", self.source.name(), query);
        let ids = self.source.search_ids(query, limit).await?;
        tracing::debug!("Found {} papers.", ids.len());

        self.classifier.classify(&ids).await
    }
}
