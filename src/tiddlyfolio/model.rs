use crate::attributes::extract_metadata;
use crate::error::Result;
use crate::tags::TagIndex;
use chrono::{DateTime, Utc};

/// Literal lines and prefixes that structure a TiddlyWiki file.
///
/// They are matched byte for byte. A wiki saved by a TiddlyWiki version that
/// writes these differently is not recognized.
pub mod markers {
    /// Last line of the header; the store area starts right after it.
    pub const STORE_AREA_START: &str = r#"<div id="storeArea" style="display:none;">"#;
    /// Prefix of the first line of every stored tiddler.
    pub const TIDDLER_START: &str = "<div created=";
    /// Suffix of the last line of every stored tiddler.
    pub const TIDDLER_END: &str = "</div>";
    /// First line of the trailer; no tiddler follows it.
    pub const LIBRARY_MODULES: &str = "<!--~~ Library modules ~~-->";
    /// Title prefix of system tiddlers.
    pub const SYSTEM_PREFIX: &str = "$:/";
}

/// Format of the `created`/`modified` attributes: `YYYYMMDDHHMMSSmmm`.
pub fn timestamp(at: DateTime<Utc>) -> String {
    at.format("%Y%m%d%H%M%S%3f").to_string()
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TiddlerKind {
    /// Title starts with `$:/`. Never part of the tag index.
    System,
    User,
}

impl TiddlerKind {
    pub fn of_title(title: &str) -> Self {
        if title.starts_with(markers::SYSTEM_PREFIX) {
            TiddlerKind::System
        } else {
            TiddlerKind::User
        }
    }
}

/// What the attribute line of a tiddler says about it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Metadata {
    pub title: String,
    pub created: Option<String>,
    pub modified: Option<String>,
    /// `None` when there is no usable `tags` attribute, or for system tiddlers.
    pub tags: Option<Vec<String>>,
}

/// One stored tiddler.
///
/// `raw_lines` is what gets written back; the other fields are derived from it
/// and are never serialized on their own.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Tiddler {
    pub raw_lines: Vec<String>,
    pub metadata: Metadata,
}

impl Tiddler {
    /// Builds a tiddler from its raw lines, extracting the metadata.
    ///
    /// `first_line` is the 1-based line number of `raw_lines[0]` in the
    /// document, used in error messages.
    pub fn from_lines(raw_lines: Vec<String>, first_line: usize) -> Result<Self> {
        let metadata = extract_metadata(&raw_lines, first_line)?;
        Ok(Self {
            raw_lines,
            metadata,
        })
    }

    pub fn title(&self) -> &str {
        &self.metadata.title
    }

    pub fn created(&self) -> Option<&str> {
        self.metadata.created.as_deref()
    }

    pub fn tags(&self) -> Option<&[String]> {
        self.metadata.tags.as_deref()
    }

    pub fn kind(&self) -> TiddlerKind {
        TiddlerKind::of_title(&self.metadata.title)
    }

    pub fn text(&self) -> String {
        self.raw_lines.concat()
    }
}

/// Result of a title lookup: where the tiddler is and when it was created.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TitleMatch {
    pub index: usize,
    pub created: Option<String>,
}

/// A whole wiki file, split into the parts that are never interpreted
/// (header, trailer) and the ordered tiddlers in between.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Document {
    pub header_lines: Vec<String>,
    pub tiddlers: Vec<Tiddler>,
    pub trailer_lines: Vec<String>,
}

impl Document {
    /// First tiddler whose title is exactly `title`.
    pub fn find_by_title(&self, title: &str) -> Option<TitleMatch> {
        self.tiddlers
            .iter()
            .position(|t| t.title() == title)
            .map(|index| TitleMatch {
                index,
                created: self.tiddlers[index].metadata.created.clone(),
            })
    }

    pub fn get(&self, title: &str) -> Option<&Tiddler> {
        self.tiddlers.iter().find(|t| t.title() == title)
    }

    /// Overwrites the tiddler at `slot`, or appends when `slot` is `None`.
    /// Returns the index the tiddler ended up at.
    pub fn insert_or_replace(&mut self, slot: Option<usize>, tiddler: Tiddler) -> usize {
        match slot {
            Some(index) => {
                self.tiddlers[index] = tiddler;
                index
            }
            None => {
                self.tiddlers.push(tiddler);
                self.tiddlers.len() - 1
            }
        }
    }

    /// Every tag used by a user tiddler, in order of first appearance.
    pub fn tag_index(&self) -> TagIndex {
        self.tiddlers
            .iter()
            .filter(|t| t.kind() == TiddlerKind::User)
            .filter_map(Tiddler::tags)
            .flatten()
            .collect()
    }

    pub fn len(&self) -> usize {
        self.tiddlers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tiddlers.is_empty()
    }
}
