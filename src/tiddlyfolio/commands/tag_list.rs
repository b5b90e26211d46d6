//! The "Tag List" tiddler: one heading and one list of links per tag in use.
//!
//! ```text
//! !!! red dot
//! <<list-links "[tag[[[red dot]]]]">>
//! ```
//!
//! Headings show the bare tag; the list query carries the tag as stored.
//! The tiddler is always updated in place and is only rewritten when the set
//! of tags (or their order) changed.

use crate::error::Result;
use crate::factory::{upsert, UpsertRequest, Upserted};
use crate::model::Document;
use crate::tags::{strip_brackets, TagIndex};

pub const TAG_LIST_TITLE: &str = "Tag List";

/// Empty type: the wiki renders the body as its own wikitext.
const TAG_LIST_TYPE: &str = "";

pub fn render(index: &TagIndex) -> String {
    let mut body = String::new();
    for tag in index.iter() {
        body.push_str(&format!("!!! {}\n", strip_brackets(tag)));
        body.push_str(&format!("<<list-links \"[tag[{}]]\">>\n", tag));
    }
    body
}

/// Rewrites the Tag List tiddler from the current tag index.
pub fn regenerate(doc: &mut Document, modified: &str) -> Result<Upserted> {
    let body = render(&doc.tag_index());
    upsert(
        doc,
        &UpsertRequest {
            title: TAG_LIST_TITLE,
            body: &body,
            tags: &[],
            content_type: TAG_LIST_TYPE,
            replace: true,
        },
        modified,
    )
}

/// Rewrites the Tag List tiddler only if the tag index differs from `before`.
pub fn regenerate_if_changed(
    doc: &mut Document,
    before: &TagIndex,
    modified: &str,
) -> Result<Option<Upserted>> {
    if doc.tag_index() == *before {
        return Ok(None);
    }
    regenerate(doc, modified).map(Some)
}
