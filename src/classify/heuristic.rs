//! Keyword heuristic deciding whether an affiliation is academic or industrial.

use regex::Regex;
use std::sync::OnceLock;

use crate::config::HeuristicConfig;
use crate::models::{AuthorEntry, ClassifiedAuthor};

/// Substrings marking an academic or clinical institution
pub const DEFAULT_ACADEMIC_KEYWORDS: [&str; 7] = [
    "university",
    "institute",
    "college",
    "school",
    "hospital",
    "academy",
    "department",
];

/// Substrings marking a commercial entity. `"co."` keeps its period so that
/// words merely containing "co" do not match.
pub const DEFAULT_INDUSTRY_KEYWORDS: [&str; 7] =
    ["pharma", "biotech", "inc", "corp", "ltd", "gmbh", "co."];

static EMAIL_REGEX: OnceLock<Regex> = OnceLock::new();

fn email_regex() -> &'static Regex {
    EMAIL_REGEX.get_or_init(|| {
        Regex::new(r"[A-Za-z0-9._%+-]+@[A-Za-z0-9-]+(?:\.[A-Za-z0-9-]+)*\.[A-Za-z]{2,}")
            .expect("email pattern is valid")
    })
}

/// First `local@domain.tld` substring of `text`, if any
pub fn extract_email(text: &str) -> Option<&str> {
    email_regex().find(text).map(|m| m.as_str())
}

/// Immutable keyword sets used to classify affiliations.
///
/// Matching is a case-insensitive substring test, not a whole-word test:
/// "Universityville Corp" counts as academic. Keywords are lowercased once
/// at construction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AffiliationHeuristic {
    academic: Vec<String>,
    industry: Vec<String>,
}

impl Default for AffiliationHeuristic {
    fn default() -> Self {
        Self::new(DEFAULT_ACADEMIC_KEYWORDS, DEFAULT_INDUSTRY_KEYWORDS)
    }
}

impl From<&HeuristicConfig> for AffiliationHeuristic {
    fn from(config: &HeuristicConfig) -> Self {
        Self::new(&config.academic_keywords, &config.industry_keywords)
    }
}

impl AffiliationHeuristic {
    /// Build a heuristic from custom keyword lists
    pub fn new<A, I>(academic: A, industry: I) -> Self
    where
        A: IntoIterator,
        A::Item: AsRef<str>,
        I: IntoIterator,
        I::Item: AsRef<str>,
    {
        Self {
            academic: normalize(academic),
            industry: normalize(industry),
        }
    }

    pub fn academic_keywords(&self) -> &[String] {
        &self.academic
    }

    pub fn industry_keywords(&self) -> &[String] {
        &self.industry
    }

    /// Whether the affiliation names an academic institution
    pub fn is_academic(&self, affiliation: &str) -> bool {
        contains_any(&affiliation.to_lowercase(), &self.academic)
    }

    /// Whether the affiliation names a company
    pub fn is_industry(&self, affiliation: &str) -> bool {
        contains_any(&affiliation.to_lowercase(), &self.industry)
    }

    /// Classify one author. Authors without affiliation text yield `None`
    /// and count neither as academic nor as non-academic.
    pub fn classify_author(&self, author: &AuthorEntry) -> Option<ClassifiedAuthor> {
        let affiliation = author.affiliation()?;
        let lowered = affiliation.to_lowercase();

        Some(ClassifiedAuthor {
            full_name: author.full_name(),
            affiliation: affiliation.to_string(),
            is_academic: contains_any(&lowered, &self.academic),
            is_industry: contains_any(&lowered, &self.industry),
        })
    }
}

fn normalize<K>(keywords: K) -> Vec<String>
where
    K: IntoIterator,
    K::Item: AsRef<str>,
{
    keywords
        .into_iter()
        .map(|k| k.as_ref().to_lowercase())
        .filter(|k| !k.is_empty())
        .collect()
}

fn contains_any(haystack: &str, keywords: &[String]) -> bool {
    keywords.iter().any(|k| haystack.contains(k.as_str()))
}
