//! Core data models for article records and report rows.

mod article;
mod row;

pub use article::{AuthorEntry, PubDate, RawArticleRecord};
pub use row::{ClassifiedAuthor, OutputRow, LIST_SEPARATOR, NOT_AVAILABLE, REPORT_HEADERS};
