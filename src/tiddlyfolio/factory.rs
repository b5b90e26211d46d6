//! Builds tiddlers and puts them into a [`Document`].
//!
//! A generated tiddler always has the same three-part layout:
//!
//! ```text
//! <div created="C" modified="M" tags="T" title="TITLE" type="K">
//! <pre>ESCAPED BODY
//! </pre></div>
//! ```
//!
//! The body may span several lines. Only the body is HTML-escaped; title and
//! tags are written as given.

use crate::error::Result;
use crate::markup::escape_html;
use crate::model::{Document, Tiddler, TitleMatch};
use tracing::{debug, warn};

/// Highest numbered suffix tried when a title is taken (`Title-99`).
pub const MAX_SUFFIX: u32 = 99;

/// Everything that goes into the text of one tiddler.
#[derive(Debug, Clone)]
pub struct TiddlerDraft<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub tags: &'a [String],
    pub created: &'a str,
    pub modified: &'a str,
    pub content_type: &'a str,
}

/// Renders a draft into raw lines and reads the metadata back from them, so
/// the tiddler looks exactly like it will after the next read of the file.
pub fn build_tiddler(draft: &TiddlerDraft) -> Result<Tiddler> {
    let text = format!(
        "<div created=\"{}\" modified=\"{}\" tags=\"{}\" title=\"{}\" type=\"{}\">\n<pre>{}\n</pre></div>",
        draft.created,
        draft.modified,
        draft.tags.join(" "),
        draft.title,
        draft.content_type,
        escape_html(draft.body),
    );
    let raw_lines = text.split('\n').map(|line| format!("{}\n", line)).collect();
    Tiddler::from_lines(raw_lines, 1)
}

/// A tiddler to create or update.
#[derive(Debug, Clone)]
pub struct UpsertRequest<'a> {
    pub title: &'a str,
    pub body: &'a str,
    pub tags: &'a [String],
    pub content_type: &'a str,
    /// Overwrite a tiddler with the same title instead of adding `Title-NN`.
    pub replace: bool,
}

/// Where an upserted tiddler ended up.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Upserted {
    /// The title actually used; differs from the request on a collision.
    pub title: String,
    pub index: usize,
    /// An existing tiddler was overwritten.
    pub replaced: bool,
    /// Every numbered title was taken and `Title-99` was overwritten.
    pub collision_exhausted: bool,
}

/// Creates or updates a tiddler in `doc`, stamped with `modified`.
///
/// In replace mode the tiddler with the same title is overwritten in place and
/// keeps its `created` stamp. Otherwise a taken title is moved to the first free
/// `Title-01` .. `Title-99`.
///
/// When all 99 numbered titles are taken, `Title-99` is overwritten and the
/// outcome is flagged with `collision_exhausted`. This matches what existing
/// wikis edited by earlier versions of the tool expect; callers must surface
/// the flag as a warning.
pub fn upsert(doc: &mut Document, request: &UpsertRequest, modified: &str) -> Result<Upserted> {
    let existing = doc.find_by_title(request.title);

    let (title, slot, collision_exhausted) = match existing {
        Some(_) if !request.replace => resolve_collision(doc, request.title),
        existing => (request.title.to_string(), existing, false),
    };

    if collision_exhausted {
        warn!(
            title = %title,
            "all numbered titles up to -{} are taken, overwriting the last one",
            MAX_SUFFIX
        );
    }

    let created = slot
        .as_ref()
        .and_then(|found| found.created.clone())
        .unwrap_or_else(|| modified.to_string());

    let tiddler = build_tiddler(&TiddlerDraft {
        title: &title,
        body: request.body,
        tags: request.tags,
        created: &created,
        modified,
        content_type: request.content_type,
    })?;

    let replaced = slot.is_some();
    let index = doc.insert_or_replace(slot.map(|found| found.index), tiddler);
    debug!(title = %title, index, replaced, "stored tiddler");

    Ok(Upserted {
        title,
        index,
        replaced,
        collision_exhausted,
    })
}

/// Finds the numbered title to use when `title` is taken.
///
/// Returns the title, the slot to overwrite (only when exhausted), and
/// whether every numbered title was taken.
fn resolve_collision(doc: &Document, title: &str) -> (String, Option<TitleMatch>, bool) {
    for n in 1..MAX_SUFFIX {
        let candidate = numbered(title, n);
        if doc.find_by_title(&candidate).is_none() {
            return (candidate, None, false);
        }
    }

    let last = numbered(title, MAX_SUFFIX);
    let slot = doc.find_by_title(&last);
    let exhausted = slot.is_some();
    (last, slot, exhausted)
}

fn numbered(title: &str, n: u32) -> String {
    format!("{}-{:02}", title, n)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{mock_document, stored_tiddler};

    fn tags(list: &[&str]) -> Vec<String> {
        list.iter().map(|t| t.to_string()).collect()
    }

    fn request<'a>(title: &'a str, body: &'a str, tags: &'a [String], replace: bool) -> UpsertRequest<'a> {
        UpsertRequest {
            title,
            body,
            tags,
            content_type: "text/x-markdown",
            replace,
        }
    }

    #[test]
    fn test_builds_the_three_line_layout() {
        let tags = tags(&["yellow", "[[blue dot]]"]);
        let tiddler = build_tiddler(&TiddlerDraft {
            title: "Blue Moon",
            body: "Hello moon",
            tags: &tags,
            created: "201801",
            modified: "201802",
            content_type: "text/x-markdown",
        })
        .unwrap();

        assert_eq!(
            tiddler.raw_lines,
            vec![
                "<div created=\"201801\" modified=\"201802\" tags=\"yellow [[blue dot]]\" title=\"Blue Moon\" type=\"text/x-markdown\">\n",
                "<pre>Hello moon\n",
                "</pre></div>\n",
            ]
        );
        assert_eq!(tiddler.title(), "Blue Moon");
        assert_eq!(tiddler.created(), Some("201801"));
        assert_eq!(tiddler.tags(), Some(&tags[..]));
    }

    #[test]
    fn test_body_lines_become_raw_lines() {
        let tiddler = build_tiddler(&TiddlerDraft {
            title: "Recently Added",
            body: "# Hello moon\n* Hello sun",
            tags: &[],
            created: "1",
            modified: "2",
            content_type: "",
        })
        .unwrap();

        assert_eq!(tiddler.raw_lines[1], "<pre># Hello moon\n");
        assert_eq!(tiddler.raw_lines[2], "* Hello sun\n");
        assert_eq!(tiddler.raw_lines[3], "</pre></div>\n");
        assert_eq!(tiddler.tags(), None);
    }

    #[test]
    fn test_body_is_escaped_but_title_and_tags_are_not() {
        let tags = tags(&["[[red dot]]"]);
        let tiddler = build_tiddler(&TiddlerDraft {
            title: "A & B",
            body: "if a < b && b > c",
            tags: &tags,
            created: "1",
            modified: "1",
            content_type: "",
        })
        .unwrap();

        assert_eq!(tiddler.raw_lines[1], "<pre>if a &lt; b &amp;&amp; b &gt; c\n");
        assert!(tiddler.raw_lines[0].contains("title=\"A & B\""));
        assert_eq!(tiddler.title(), "A & B");
        assert_eq!(tiddler.tags(), Some(&tags[..]));
    }

    #[test]
    fn test_replace_keeps_created_and_slot() {
        let mut doc = mock_document();
        let tags = tags(&["yellow", "[[red dot]]"]);
        let outcome = upsert(
            &mut doc,
            &request("Recently Added", "# Hello moon\n* Hello sun", &tags, true),
            "20240101000000000",
        )
        .unwrap();

        assert_eq!(outcome.index, 2);
        assert!(outcome.replaced);
        assert_eq!(doc.len(), 3);
        let stored = &doc.tiddlers[2];
        assert_eq!(stored.created(), Some("20180206144335953"));
        assert!(stored.raw_lines[0].contains("modified=\"20240101000000000\""));
        assert_eq!(
            doc.tiddlers.iter().filter(|t| t.title() == "Recently Added").count(),
            1
        );
    }

    #[test]
    fn test_replace_of_new_title_appends_with_created_equal_to_modified() {
        let mut doc = mock_document();
        let outcome = upsert(&mut doc, &request("Blue Moon", "Hello moon\n", &[], true), "42").unwrap();

        assert_eq!(outcome.index, 3);
        assert!(!outcome.replaced);
        assert_eq!(doc.tiddlers[3].created(), Some("42"));
    }

    #[test]
    fn test_no_replace_on_free_title_uses_the_title() {
        let mut doc = mock_document();
        let outcome = upsert(&mut doc, &request("Fresh", "x", &[], false), "1").unwrap();
        assert_eq!(outcome.title, "Fresh");
        assert_eq!(doc.tiddlers.last().unwrap().title(), "Fresh");
    }

    #[test]
    fn test_taken_titles_get_numbered_suffixes() {
        let mut doc = mock_document();
        let first = upsert(&mut doc, &request("Recently Added", "jupiter", &[], false), "1").unwrap();
        let second = upsert(&mut doc, &request("Recently Added", "saturn", &[], false), "2").unwrap();

        assert_eq!(first.title, "Recently Added-01");
        assert_eq!(second.title, "Recently Added-02");
        assert!(!first.replaced && !second.replaced);
        assert_eq!(doc.len(), 5);
        assert_eq!(doc.tiddlers[3].created(), Some("1"));
        assert_eq!(doc.tiddlers[2].created(), Some("20180206144335953"));
    }

    #[test]
    fn test_exhausted_suffixes_overwrite_the_last_one() {
        let mut doc = Document::default();
        doc.tiddlers.push(stored_tiddler("Plot", "100", ""));
        for n in 1..=MAX_SUFFIX {
            doc.tiddlers.push(stored_tiddler(&numbered("Plot", n), &n.to_string(), ""));
        }

        let outcome = upsert(&mut doc, &request("Plot", "new", &[], false), "777").unwrap();

        assert!(outcome.collision_exhausted);
        assert!(outcome.replaced);
        assert_eq!(outcome.title, "Plot-99");
        assert_eq!(outcome.index, 99);
        assert_eq!(doc.len(), 100);
        assert_eq!(doc.tiddlers[99].created(), Some("99"));
        assert_eq!(doc.tiddlers[99].raw_lines[1], "<pre>new\n");
    }
}
