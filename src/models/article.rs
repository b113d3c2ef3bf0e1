//! Raw article records as parsed from an E-utilities fetch response.

use serde::{Deserialize, Serialize};

/// Publication date block of an article (`PubDate`).
///
/// Either part may be missing; PubMed frequently omits the month and some
/// journals only carry a `MedlineDate` free-text field instead.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PubDate {
    pub year: Option<String>,
    pub month: Option<String>,
}

impl PubDate {
    /// Create a date from optional year and month parts
    pub fn new(year: Option<&str>, month: Option<&str>) -> Self {
        Self {
            year: year.map(str::to_string),
            month: month.map(str::to_string),
        }
    }

    /// Render as `"{year}-{month}"`, absent parts left empty.
    ///
    /// The dangling hyphen is kept on purpose (`"2020-"`, `"-Jan"`, `"-"`),
    /// downstream consumers of the report rely on this exact shape.
    pub fn render(&self) -> String {
        format!(
            "{}-{}",
            self.year.as_deref().unwrap_or(""),
            self.month.as_deref().unwrap_or("")
        )
    }
}

/// One author of an article.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AuthorEntry {
    pub fore_name: Option<String>,
    pub last_name: Option<String>,
    /// First affiliation listed for the author
    pub affiliation: Option<String>,
}

impl AuthorEntry {
    /// Create an author entry
    pub fn new(
        fore_name: Option<&str>,
        last_name: Option<&str>,
        affiliation: Option<&str>,
    ) -> Self {
        Self {
            fore_name: fore_name.map(str::to_string),
            last_name: last_name.map(str::to_string),
            affiliation: affiliation.map(str::to_string),
        }
    }

    /// `"{fore} {last}"` with surrounding whitespace trimmed
    pub fn full_name(&self) -> String {
        format!(
            "{} {}",
            self.fore_name.as_deref().unwrap_or(""),
            self.last_name.as_deref().unwrap_or("")
        )
        .trim()
        .to_string()
    }

    /// Affiliation text, if present and non-empty
    pub fn affiliation(&self) -> Option<&str> {
        self.affiliation.as_deref().filter(|a| !a.is_empty())
    }
}

/// A single `PubmedArticle` record.
///
/// Every field is optional: absence is normal in E-utilities output and is
/// resolved to report defaults by the classifier, not here.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawArticleRecord {
    pub pmid: Option<String>,
    pub title: Option<String>,
    pub pub_date: Option<PubDate>,
    #[serde(default)]
    pub authors: Vec<AuthorEntry>,
}

impl RawArticleRecord {
    /// Create an empty record with the given PubMed ID
    pub fn new(pmid: impl Into<String>) -> Self {
        Self {
            pmid: Some(pmid.into()),
            ..Default::default()
        }
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.title = Some(title.into());
        self
    }

    /// Set the publication date
    pub fn pub_date(mut self, pub_date: PubDate) -> Self {
        self.pub_date = Some(pub_date);
        self
    }

    /// Append an author
    pub fn author(mut self, author: AuthorEntry) -> Self {
        self.authors.push(author);
        self
    }
}
