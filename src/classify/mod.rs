//! Record classification: turns fetched PubMed records into report rows.
//!
//! [`classify_record`] is the pure part, applying an [`AffiliationHeuristic`]
//! to one [`RawArticleRecord`]. [`RecordClassifier`] wraps it with the fetch
//! request against a [`Source`].
//!
//! ```rust
//! use paper_fetcher::classify::{classify_record, AffiliationHeuristic};
//! use paper_fetcher::models::{AuthorEntry, RawArticleRecord};
//!
//! let record = RawArticleRecord::new("1").author(AuthorEntry::new(
//!     Some("Bob"),
//!     Some("Smith"),
//!     Some("Acme Pharma Inc, bob@acme.com"),
//! ));
//! let row = classify_record(&AffiliationHeuristic::default(), &record).unwrap();
//! assert_eq!(row.corresponding_author_email, "bob@acme.com");
//! ```

mod heuristic;

pub use heuristic::{
    extract_email, AffiliationHeuristic, DEFAULT_ACADEMIC_KEYWORDS, DEFAULT_INDUSTRY_KEYWORDS,
};

use std::sync::Arc;

use crate::config::Config;
use crate::models::{OutputRow, RawArticleRecord, LIST_SEPARATOR, NOT_AVAILABLE};
use crate::sources::{Source, SourceError};

/// Apply the affiliation heuristic to one record.
///
/// Returns `None` when no author qualifies as non-academic. Missing fields
/// fall back to `"N/A"`; this function never fails.
pub fn classify_record(
    heuristic: &AffiliationHeuristic,
    record: &RawArticleRecord,
) -> Option<OutputRow> {
    let mut authors = Vec::new();
    let mut companies = Vec::new();
    let mut email: Option<String> = None;

    for classified in record
        .authors
        .iter()
        .filter_map(|a| heuristic.classify_author(a))
        .filter(|c| c.is_non_academic())
    {
        if classified.is_industry {
            companies.push(classified.affiliation.clone());
        }
        if email.is_none() && classified.affiliation.contains('@') {
            email = extract_email(&classified.affiliation).map(str::to_string);
        }
        authors.push(classified.full_name);
    }

    if authors.is_empty() {
        return None;
    }

    Some(OutputRow {
        pubmed_id: record.pmid.clone().unwrap_or_else(not_available),
        title: record.title.clone().unwrap_or_else(not_available),
        publication_date: record
            .pub_date
            .as_ref()
            .map(|d| d.render())
            .unwrap_or_else(not_available),
        non_academic_authors: authors.join(LIST_SEPARATOR),
        company_affiliations: companies.join(LIST_SEPARATOR),
        corresponding_author_email: email.unwrap_or_else(not_available),
    })
}

fn not_available() -> String {
    NOT_AVAILABLE.to_string()
}

/// Fetches records for a batch of PubMed IDs and classifies them.
#[derive(Debug, Clone)]
pub struct RecordClassifier {
    source: Arc<dyn Source>,
    heuristic: AffiliationHeuristic,
    fetch_empty_batches: bool,
}

impl RecordClassifier {
    /// Create a classifier with the default keyword lists
    pub fn new(source: Arc<dyn Source>) -> Self {
        Self {
            source,
            heuristic: AffiliationHeuristic::default(),
            fetch_empty_batches: false,
        }
    }

    /// Create a classifier from loaded configuration
    pub fn from_config(source: Arc<dyn Source>, config: &Config) -> Self {
        Self {
            source,
            heuristic: AffiliationHeuristic::from(&config.heuristic),
            fetch_empty_batches: config.classifier.fetch_empty_batches,
        }
    }

    /// Replace the keyword heuristic
    pub fn heuristic(mut self, heuristic: AffiliationHeuristic) -> Self {
        self.heuristic = heuristic;
        self
    }

    /// Issue the fetch request even for an empty id list
    pub fn fetch_empty_batches(mut self, enabled: bool) -> Self {
        self.fetch_empty_batches = enabled;
        self
    }

    /// Fetch all `ids` in a single request and return one row per record
    /// with at least one non-academic author, in source order.
    pub async fn classify(&self, ids: &[String]) -> Result<Vec<OutputRow>, SourceError> {
        if ids.is_empty() && !self.fetch_empty_batches {
            tracing::debug!("No identifiers to classify, skipping fetch");
            return Ok(Vec::new());
        }

        let records = self.source.fetch_records(ids).await?;
        let rows: Vec<OutputRow> = records
            .iter()
            .filter_map(|record| classify_record(&self.heuristic, record))
            .collect();

        tracing::debug!(
            "{} of {} records have non-academic authors",
            rows.len(),
            records.len()
        );

        Ok(rows)
    }
}
