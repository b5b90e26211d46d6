//! Shared fixtures for unit tests (and for integration tests with the
//! `test_utils` feature).

use crate::model::{Document, Tiddler};
use crate::reader::read_document;

/// A small wiki with one system tiddler, one tagged tiddler and one untagged
/// multi-line tiddler.
pub const MOCK_WIKI: &str = include_str!("../../tests/fixtures/mock_wiki.html");

pub fn mock_document() -> Document {
    read_document(MOCK_WIKI.as_bytes()).expect("mock wiki is well formed")
}

/// Builds a stored tiddler the way TiddlyWiki itself writes them.
pub fn stored_tiddler(title: &str, created: &str, tags: &str) -> Tiddler {
    let lines = vec![
        format!(
            "<div created=\"{created}\" modified=\"{created}\" tags=\"{tags}\" title=\"{title}\" type=\"text/x-markdown\">\n"
        ),
        "<pre>body</pre>\n".to_string(),
        "</div>\n".to_string(),
    ];
    Tiddler::from_lines(lines, 1).expect("fixture tiddler has a title")
}
