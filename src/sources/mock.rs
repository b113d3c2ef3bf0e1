//! Mock source for testing purposes.

use async_trait::async_trait;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use crate::models::RawArticleRecord;
use crate::sources::{Source, SourceError};

/// A mock source for testing that returns predefined responses.
///
/// Search returns the configured ids truncated to the requested limit; fetch
/// returns the configured records regardless of the ids asked for. Both
/// calls are counted.
#[derive(Debug, Default)]
pub struct MockSource {
    ids: Mutex<Vec<String>>,
    records: Mutex<Vec<RawArticleRecord>>,
    failure: Mutex<Option<String>>,
    search_calls: AtomicUsize,
    fetch_calls: AtomicUsize,
}

impl MockSource {
    /// Create a new mock source.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the identifiers returned by search.
    pub fn set_ids<I, S>(&self, ids: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut guard = self.ids.lock().unwrap();
        *guard = ids.into_iter().map(Into::into).collect();
    }

    /// Set the records returned by fetch.
    pub fn set_records(&self, records: Vec<RawArticleRecord>) {
        let mut guard = self.records.lock().unwrap();
        *guard = records;
    }

    /// Make every subsequent call fail with a transport error.
    pub fn fail_with_transport(&self, message: &str) {
        let mut guard = self.failure.lock().unwrap();
        *guard = Some(message.to_string());
    }

    /// Number of search calls made so far.
    pub fn search_calls(&self) -> usize {
        self.search_calls.load(Ordering::SeqCst)
    }

    /// Number of fetch calls made so far.
    pub fn fetch_calls(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    fn check_failure(&self) -> Result<(), SourceError> {
        match &*self.failure.lock().unwrap() {
            Some(message) => Err(SourceError::Transport(message.clone())),
            None => Ok(()),
        }
    }
}

#[async_trait]
impl Source for MockSource {
    fn name(&self) -> &str {
        "Mock Source"
    }

    async fn search_ids(&self, _query: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        self.search_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        let guard = self.ids.lock().unwrap();
        Ok(guard.iter().take(limit).cloned().collect())
    }

    async fn fetch_records(&self, _ids: &[String]) -> Result<Vec<RawArticleRecord>, SourceError> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        self.check_failure()?;

        Ok(self.records.lock().unwrap().clone())
    }
}
