//! Lenient streaming parser for E-utilities `efetch` XML.
//!
//! Only the handful of fields the classifier needs are extracted. The parser
//! never fails: unknown elements are skipped, missing elements leave `None`
//! behind, and a document that stops being well-formed yields the records
//! completed before the error.

use quick_xml::events::Event;
use quick_xml::Reader;

use crate::models::{AuthorEntry, PubDate, RawArticleRecord};

/// Leaf fields captured from a `PubmedArticle`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Field {
    Pmid,
    Title,
    Year,
    Month,
    ForeName,
    LastName,
    Affiliation,
}

/// Text being collected for one field; nested markup (`<i>`, `<sup>`) is
/// flattened into the buffer until the element at `depth` closes.
#[derive(Debug)]
struct Capture {
    field: Field,
    depth: usize,
    text: String,
}

#[derive(Debug, Default)]
struct ArticleState {
    record: RawArticleRecord,
    author: Option<AuthorEntry>,
    in_pub_date: bool,
}

impl ArticleState {
    fn field_for(&self, name: &str, parent: Option<&str>) -> Option<Field> {
        match name {
            "PMID" if parent == Some("MedlineCitation") && self.record.pmid.is_none() => {
                Some(Field::Pmid)
            }
            "ArticleTitle" if self.record.title.is_none() => Some(Field::Title),
            "Year" if self.in_pub_date => Some(Field::Year),
            "Month" if self.in_pub_date => Some(Field::Month),
            "ForeName" if self.author.is_some() => Some(Field::ForeName),
            "LastName" if self.author.is_some() => Some(Field::LastName),
            "Affiliation"
                if self
                    .author
                    .as_ref()
                    .is_some_and(|a| a.affiliation.is_none()) =>
            {
                Some(Field::Affiliation)
            }
            _ => None,
        }
    }

    fn store(&mut self, field: Field, text: String) {
        // Title and affiliation text are kept verbatim
        let value = match field {
            Field::Title | Field::Affiliation => Some(text),
            _ => Some(text.trim().to_string()),
        };
        match field {
            Field::Pmid => self.record.pmid = value,
            Field::Title => self.record.title = value,
            Field::Year | Field::Month => {
                let date = self.record.pub_date.get_or_insert_with(PubDate::default);
                if field == Field::Year {
                    date.year = value;
                } else {
                    date.month = value;
                }
            }
            Field::ForeName | Field::LastName | Field::Affiliation => {
                if let Some(author) = self.author.as_mut() {
                    match field {
                        Field::ForeName => author.fore_name = value,
                        Field::LastName => author.last_name = value,
                        _ => author.affiliation = value,
                    }
                }
            }
        }
    }

    fn open(&mut self, name: &str) {
        match name {
            "Author" => self.author = Some(AuthorEntry::default()),
            // Only the first PubDate of an article counts
            "PubDate" if self.record.pub_date.is_none() => {
                self.record.pub_date = Some(PubDate::default());
                self.in_pub_date = true;
            }
            _ => {}
        }
    }

    fn close(&mut self, name: &str) {
        match name {
            "Author" => {
                if let Some(author) = self.author.take() {
                    self.record.authors.push(author);
                }
            }
            "PubDate" => self.in_pub_date = false,
            _ => {}
        }
    }
}

/// Parse a `PubmedArticleSet` document into raw records, in document order.
pub fn parse_efetch_xml(xml: &str) -> Vec<RawArticleRecord> {
    let mut reader = Reader::from_str(xml);

    let mut records = Vec::new();
    let mut stack: Vec<String> = Vec::new();
    let mut article: Option<ArticleState> = None;
    let mut capture: Option<Capture> = None;

    loop {
        match reader.read_event() {
            Ok(Event::Start(e)) => {
                let name = String::from_utf8_lossy(e.local_name().as_ref()).into_owned();

                if name == "PubmedArticle" {
                    article = Some(ArticleState::default());
                } else if let Some(state) = article.as_mut() {
                    let parent = stack.last().map(String::as_str);
                    if capture.is_none() {
                        if let Some(field) = state.field_for(&name, parent) {
                            capture = Some(Capture {
                                field,
                                depth: stack.len(),
                                text: String::new(),
                            });
                        }
                    }
                    state.open(&name);
                }

                stack.push(name);
            }
            Ok(Event::End(_)) => {
                let Some(name) = stack.pop() else { continue };

                if capture.as_ref().is_some_and(|c| c.depth == stack.len()) {
                    if let (Some(c), Some(state)) = (capture.take(), article.as_mut()) {
                        state.store(c.field, c.text);
                    }
                }

                if name == "PubmedArticle" {
                    if let Some(state) = article.take() {
                        records.push(state.record);
                    }
                } else if let Some(state) = article.as_mut() {
                    state.close(&name);
                }
            }
            Ok(Event::Text(e)) => {
                if let Some(c) = capture.as_mut() {
                    match e.unescape() {
                        Ok(text) => c.text.push_str(&text),
                        Err(err) => {
                            tracing::warn!("Keeping raw text with unresolved entity: {}", err);
                            c.text.push_str(&String::from_utf8_lossy(&e));
                        }
                    }
                }
            }
            Ok(Event::CData(e)) => {
                if let Some(c) = capture.as_mut() {
                    c.text.push_str(&String::from_utf8_lossy(&e));
                }
            }
            Ok(Event::Eof) => break,
            Err(e) => {
                tracing::warn!(
                    "Malformed efetch XML at position {}: {}; keeping {} complete records",
                    reader.error_position(),
                    e,
                    records.len()
                );
                break;
            }
            _ => {}
        }
    }

    records
}
