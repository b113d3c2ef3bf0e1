//! Integration tests for Paper Fetcher
//!
//! These tests drive the PubMed source against a local mock HTTP server and
//! run the full search-then-classify pipeline end to end.

use mockito::{Matcher, Server, ServerGuard};
use paper_fetcher::config::Config;
use paper_fetcher::report::to_csv_string;
use paper_fetcher::{PaperFetcher, PubMedSource, Source, SourceError};
use std::sync::Arc;

const EFETCH_XML: &str = r#"<?xml version="1.0" ?>
<PubmedArticleSet>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">38000001</PMID>
      <Article PubModel="Print-Electronic">
        <Journal>
          <JournalIssue CitedMedium="Internet">
            <PubDate><Year>2020</Year><Month>Jan</Month></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>KRAS inhibitors in the clinic.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Jones</LastName>
            <ForeName>Alice</ForeName>
            <AffiliationInfo>
              <Affiliation>Dept of Biology, Stanford University</Affiliation>
            </AffiliationInfo>
          </Author>
          <Author ValidYN="Y">
            <LastName>Smith</LastName>
            <ForeName>Bob</ForeName>
            <AffiliationInfo>
              <Affiliation>Research Scientist, Acme Pharma Inc, contact: b.smith@acmepharma.com</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
  <PubmedArticle>
    <MedlineCitation Status="MEDLINE" Owner="NLM">
      <PMID Version="1">38000002</PMID>
      <Article PubModel="Print">
        <Journal>
          <JournalIssue CitedMedium="Print">
            <PubDate><Year>2021</Year></PubDate>
          </JournalIssue>
        </Journal>
        <ArticleTitle>An entirely academic study.</ArticleTitle>
        <AuthorList CompleteYN="Y">
          <Author ValidYN="Y">
            <LastName>Brown</LastName>
            <ForeName>Carol</ForeName>
            <AffiliationInfo>
              <Affiliation>School of Medicine, Yale University</Affiliation>
            </AffiliationInfo>
          </Author>
        </AuthorList>
      </Article>
    </MedlineCitation>
  </PubmedArticle>
</PubmedArticleSet>
"#;

fn config_for(server: &ServerGuard) -> Config {
    let mut config = Config::default();
    config.entrez.base_url = server.url();
    config.entrez.api_key = None;
    config
}

fn source_for(server: &ServerGuard) -> PubMedSource {
    PubMedSource::from_config(&config_for(server)).unwrap()
}

#[tokio::test]
async fn test_search_ids_sends_expected_query() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("term".into(), "kras inhibitor".into()),
            Matcher::UrlEncoded("retmax".into(), "25".into()),
            Matcher::UrlEncoded("retmode".into(), "json".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "application/json")
        .with_body(r#"{"esearchresult":{"count":"2","idlist":["38000001","38000002"]}}"#)
        .create_async()
        .await;

    let ids = source_for(&server)
        .search_ids("kras inhibitor", 25)
        .await
        .unwrap();

    assert_eq!(ids, vec!["38000001", "38000002"]);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_search_ids_no_matches() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult":{"count":"0","retmax":"0","idlist":[]}}"#)
        .create_async()
        .await;

    let ids = source_for(&server).search_ids("zzzz", 50).await.unwrap();
    assert!(ids.is_empty());
}

#[tokio::test]
async fn test_search_ids_malformed_body() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<html>maintenance</html>")
        .create_async()
        .await;

    let err = source_for(&server).search_ids("kras", 50).await.unwrap_err();
    assert!(matches!(err, SourceError::MalformedResponse(_)));
}

#[tokio::test]
async fn test_search_ids_http_error_is_transport() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(500)
        .create_async()
        .await;

    let err = source_for(&server).search_ids("kras", 50).await.unwrap_err();
    assert!(matches!(err, SourceError::Transport(_)));
    assert!(err.to_string().contains("500"));
}

#[tokio::test]
async fn test_unreachable_host_is_transport() {
    let mut config = Config::default();
    config.entrez.base_url = "http://127.0.0.1:1/".to_string();
    config.http.connect_timeout_secs = 2;
    let source = PubMedSource::from_config(&config).unwrap();

    let err = source.search_ids("kras", 50).await.unwrap_err();
    assert!(matches!(err, SourceError::Transport(_)));
}

#[tokio::test]
async fn test_fetch_records_batches_ids() {
    let mut server = Server::new_async().await;
    let mock = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::AllOf(vec![
            Matcher::UrlEncoded("db".into(), "pubmed".into()),
            Matcher::UrlEncoded("id".into(), "38000001,38000002".into()),
            Matcher::UrlEncoded("retmode".into(), "xml".into()),
        ]))
        .with_status(200)
        .with_header("content-type", "text/xml")
        .with_body(EFETCH_XML)
        .expect(1)
        .create_async()
        .await;

    let records = source_for(&server)
        .fetch_records(&["38000001".to_string(), "38000002".to_string()])
        .await
        .unwrap();

    assert_eq!(records.len(), 2);
    assert_eq!(records[0].authors.len(), 2);
    assert_eq!(records[1].title.as_deref(), Some("An entirely academic study."));
    mock.assert_async().await;
}

#[tokio::test]
async fn test_fetch_records_garbage_body_degrades_to_empty() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body("<eFetchResult><ERROR>ID list is empty!</ERROR></eFetchResult>")
        .create_async()
        .await;

    let records = source_for(&server).fetch_records(&[]).await.unwrap();
    assert!(records.is_empty());
}

#[tokio::test]
async fn test_pipeline_end_to_end() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult":{"idlist":["38000001","38000002"]}}"#)
        .create_async()
        .await;
    server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(EFETCH_XML)
        .create_async()
        .await;

    let config = config_for(&server);
    let source = Arc::new(PubMedSource::from_config(&config).unwrap());
    let fetcher = PaperFetcher::from_config(source, &config);

    let rows = fetcher.fetch("kras", 50).await.unwrap();
    assert_eq!(rows.len(), 1);

    let row = &rows[0];
    assert_eq!(row.pubmed_id, "38000001");
    assert_eq!(row.title, "KRAS inhibitors in the clinic.");
    assert_eq!(row.publication_date, "2020-Jan");
    assert_eq!(row.non_academic_authors, "Bob Smith");
    assert_eq!(
        row.company_affiliations,
        "Research Scientist, Acme Pharma Inc, contact: b.smith@acmepharma.com"
    );
    assert_eq!(row.corresponding_author_email, "b.smith@acmepharma.com");

    let csv = to_csv_string(&rows).unwrap();
    assert_eq!(csv.lines().count(), 2);
}

#[tokio::test]
async fn test_pipeline_empty_search_skips_fetch() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult":{"idlist":[]}}"#)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::Any)
        .expect(0)
        .create_async()
        .await;

    let config = config_for(&server);
    let source = Arc::new(PubMedSource::from_config(&config).unwrap());
    let rows = PaperFetcher::from_config(source, &config)
        .fetch("nothing", 50)
        .await
        .unwrap();

    assert!(rows.is_empty());
    fetch.assert_async().await;
}

#[tokio::test]
async fn test_pipeline_empty_search_fetches_when_configured() {
    let mut server = Server::new_async().await;
    server
        .mock("GET", "/esearch.fcgi")
        .match_query(Matcher::Any)
        .with_status(200)
        .with_body(r#"{"esearchresult":{"idlist":[]}}"#)
        .create_async()
        .await;
    let fetch = server
        .mock("GET", "/efetch.fcgi")
        .match_query(Matcher::UrlEncoded("id".into(), "".into()))
        .with_status(200)
        .with_body("<eFetchResult><ERROR>Empty id list - nothing todo</ERROR></eFetchResult>")
        .expect(1)
        .create_async()
        .await;

    let mut config = config_for(&server);
    config.classifier.fetch_empty_batches = true;
    let source = Arc::new(PubMedSource::from_config(&config).unwrap());
    let rows = PaperFetcher::from_config(source, &config)
        .fetch("nothing", 50)
        .await
        .unwrap();

    assert!(rows.is_empty());
    fetch.assert_async().await;
}
