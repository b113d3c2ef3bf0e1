//! Classification results: per-author verdicts and report rows.

use serde::{Deserialize, Serialize};

/// Placeholder for missing identifiers, titles, dates and emails
pub const NOT_AVAILABLE: &str = "N/A";

/// Separator used when joining author names and company affiliations
pub const LIST_SEPARATOR: &str = "; ";

/// Column headers of the report, in output order
pub const REPORT_HEADERS: [&str; 6] = [
    "PubmedID",
    "Title",
    "Publication Date",
    "Non-academic Author(s)",
    "Company Affiliation(s)",
    "Corresponding Author Email",
];

/// The heuristic's verdict for a single author.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClassifiedAuthor {
    pub full_name: String,
    /// Affiliation text in its original case
    pub affiliation: String,
    pub is_academic: bool,
    pub is_industry: bool,
}

impl ClassifiedAuthor {
    /// Whether the author counts towards the report
    pub fn is_non_academic(&self) -> bool {
        !self.is_academic
    }
}

/// One line of the report: an article with at least one non-academic author.
///
/// `non_academic_authors` and `company_affiliations` are joined from the
/// same qualifying authors but only industry-flagged authors contribute a
/// company entry, so the two lists do not line up position by position.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutputRow {
    #[serde(rename = "PubmedID")]
    pub pubmed_id: String,

    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Publication Date")]
    pub publication_date: String,

    #[serde(rename = "Non-academic Author(s)")]
    pub non_academic_authors: String,

    #[serde(rename = "Company Affiliation(s)")]
    pub company_affiliations: String,

    #[serde(rename = "Corresponding Author Email")]
    pub corresponding_author_email: String,
}

impl OutputRow {
    /// Cells in header order
    pub fn cells(&self) -> [&str; 6] {
        [
            self.pubmed_id.as_str(),
            self.title.as_str(),
            self.publication_date.as_str(),
            self.non_academic_authors.as_str(),
            self.company_affiliations.as_str(),
            self.corresponding_author_email.as_str(),
        ]
    }

    /// Author names as a vector
    pub fn author_list(&self) -> Vec<&str> {
        split_list(&self.non_academic_authors)
    }

    /// Company affiliations as a vector
    pub fn company_list(&self) -> Vec<&str> {
        split_list(&self.company_affiliations)
    }
}

fn split_list(joined: &str) -> Vec<&str> {
    if joined.is_empty() {
        return Vec::new();
    }
    joined.split(LIST_SEPARATOR).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row() -> OutputRow {
        OutputRow {
            pubmed_id: "1".to_string(),
            title: "T".to_string(),
            publication_date: "2020-".to_string(),
            non_academic_authors: "A B; C D".to_string(),
            company_affiliations: String::new(),
            corresponding_author_email: NOT_AVAILABLE.to_string(),
        }
    }

    #[test]
    fn test_cells_follow_header_order() {
        let row = row();
        let cells = row.cells();
        assert_eq!(cells.len(), REPORT_HEADERS.len());
        assert_eq!(cells[0], "1");
        assert_eq!(cells[5], "N/A");
    }

    #[test]
    fn test_list_accessors() {
        let row = row();
        assert_eq!(row.author_list(), vec!["A B", "C D"]);
        assert!(row.company_list().is_empty());
    }

    #[test]
    fn test_serialized_field_names_match_headers() {
        let value = serde_json::to_value(row()).unwrap();
        for header in REPORT_HEADERS {
            assert!(value.get(header).is_some(), "missing {header}");
        }
    }
}
