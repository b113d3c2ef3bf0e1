//! PubMed research source implementation using E-utilities API.

use async_trait::async_trait;
use serde::Deserialize;
use std::sync::Arc;

use crate::config::{Config, EntrezConfig};
use crate::models::RawArticleRecord;
use crate::sources::{parse_efetch_xml, Source, SourceError};
use crate::utils::HttpClient;

/// E-utilities endpoint names, resolved against the configured base URL
const ESEARCH_ENDPOINT: &str = "esearch.fcgi";
const EFETCH_ENDPOINT: &str = "efetch.fcgi";

/// PubMed research source
///
/// Uses NCBI E-utilities: `esearch` (JSON) for identifiers and `efetch` (XML)
/// for the records themselves. No retries: a failed request surfaces
/// immediately as [`SourceError::Transport`].
#[derive(Debug, Clone)]
pub struct PubMedSource {
    client: Arc<HttpClient>,
    entrez: EntrezConfig,
}

impl PubMedSource {
    /// Create a new PubMed source with default settings
    pub fn new() -> Result<Self, SourceError> {
        Self::from_config(&Config::default())
    }

    /// Create a source from loaded configuration
    pub fn from_config(config: &Config) -> Result<Self, SourceError> {
        Ok(Self {
            client: Arc::new(HttpClient::from_config(&config.http)?),
            entrez: config.entrez.clone(),
        })
    }

    /// Create with a custom HTTP client (for testing)
    pub fn with_client(client: Arc<HttpClient>, entrez: EntrezConfig) -> Self {
        Self { client, entrez }
    }

    fn endpoint(&self, name: &str) -> String {
        format!("{}/{}", self.entrez.base_url.trim_end_matches('/'), name)
    }

    /// Parameters sent with every request: database plus NCBI etiquette fields
    fn base_params(&self) -> Vec<(&'static str, String)> {
        let mut params = vec![("db", self.entrez.database.clone())];
        if let Some(tool) = &self.entrez.tool {
            params.push(("tool", tool.clone()));
        }
        if let Some(email) = &self.entrez.email {
            params.push(("email", email.clone()));
        }
        if let Some(api_key) = &self.entrez.api_key {
            params.push(("api_key", api_key.clone()));
        }
        params
    }

    fn encode(params: &[(&str, String)]) -> String {
        params
            .iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Build E-utilities search URL
    fn build_search_url(&self, query: &str, limit: usize) -> String {
        let mut params = self.base_params();
        params.push(("term", query.to_string()));
        params.push(("retmax", limit.to_string()));
        params.push(("retmode", "json".to_string()));

        format!("{}?{}", self.endpoint(ESEARCH_ENDPOINT), Self::encode(&params))
    }

    /// Build E-utilities fetch URL for specific PubMed IDs
    ///
    /// All ids go into one request; very large batches can exceed the URL
    /// length NCBI accepts.
    fn build_fetch_url(&self, ids: &[String]) -> String {
        let mut params = self.base_params();
        params.push(("id", ids.join(",")));
        params.push(("retmode", "xml".to_string()));

        format!("{}?{}", self.endpoint(EFETCH_ENDPOINT), Self::encode(&params))
    }

    /// Parse E-utilities search response JSON
    fn parse_search_response(body: &str) -> Result<Vec<String>, SourceError> {
        #[derive(Debug, Deserialize)]
        struct ESearchResponse {
            esearchresult: ESearchResult,
        }

        #[derive(Debug, Deserialize)]
        struct ESearchResult {
            idlist: Option<Vec<String>>,
            #[serde(rename = "ERROR")]
            error: Option<String>,
        }

        let response: ESearchResponse = serde_json::from_str(body)?;

        match response.esearchresult {
            ESearchResult {
                idlist: Some(ids), ..
            } => Ok(ids),
            ESearchResult {
                error: Some(error), ..
            } => Err(SourceError::MalformedResponse(format!(
                "PubMed search returned an error: {}",
                error
            ))),
            _ => Err(SourceError::MalformedResponse(
                "PubMed search response has no idlist".to_string(),
            )),
        }
    }

    async fn get_text(&self, url: &str, action: &str) -> Result<String, SourceError> {
        tracing::debug!("GET {}", url);

        let response = self
            .client
            .get(url)
            .send()
            .await
            .map_err(|e| SourceError::Transport(format!("Failed to {}: {}", action, e)))?;

        if !response.status().is_success() {
            return Err(SourceError::Transport(format!(
                "PubMed API returned status: {}",
                response.status()
            )));
        }

        response
            .text()
            .await
            .map_err(|e| SourceError::Transport(format!("Failed to read response: {}", e)))
    }
}

#[async_trait]
impl Source for PubMedSource {
    fn name(&self) -> &str {
        "PubMed"
    }

    async fn search_ids(&self, query: &str, limit: usize) -> Result<Vec<String>, SourceError> {
        if query.trim().is_empty() {
            return Err(SourceError::InvalidRequest(
                "search query must not be empty".to_string(),
            ));
        }
        if limit == 0 {
            return Err(SourceError::InvalidRequest(
                "result limit must be at least 1".to_string(),
            ));
        }

        let url = self.build_search_url(query, limit);
        let body = self.get_text(&url, "search PubMed").await?;
        let ids = Self::parse_search_response(&body)?;

        tracing::debug!("PubMed search for {:?} returned {} ids", query, ids.len());
        Ok(ids)
    }

    async fn fetch_records(&self, ids: &[String]) -> Result<Vec<RawArticleRecord>, SourceError> {
        let url = self.build_fetch_url(ids);
        let xml = self.get_text(&url, "fetch PubMed details").await?;
        let records = parse_efetch_xml(&xml);

        tracing::debug!(
            "PubMed fetch for {} ids returned {} records",
            ids.len(),
            records.len()
        );
        Ok(records)
    }
}
