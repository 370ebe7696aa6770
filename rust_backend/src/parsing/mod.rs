//! Parsers for timetable text and page documents.
//!
//! # Parsers
//!
//! - [`labels`]: Recognise day, hour, week id and week date labels
//! - [`course_text`]: Split class cell text into subject, teacher and location
//! - [`layout`]: Convert layout text lines into page words
//! - [`page_json`]: Parse JSON page documents
//!
//! # Example
//!
//! ```no_run
//! use edt_rust::parsing::page_json::parse_page_document;
//! use std::path::Path;
//!
//! let document = parse_page_document(Path::new("timetable.json"))
//!     .expect("Failed to parse page document");
//! ```

pub mod course_text;
pub mod labels;
pub mod layout;
pub mod page_json;

#[cfg(test)]
mod course_text_tests;

pub use course_text::decompose;
pub use page_json::{parse_page_document, parse_page_document_str, PageDocument, RawPage};
