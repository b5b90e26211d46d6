//! Tag support for tiddlyfolio.
//!
//! TiddlyWiki stores the tags of a tiddler as one space-separated attribute.
//! A tag that contains spaces is quoted with double brackets:
//!
//! ```text
//! tags="blue [[red dot]] brown"   ->   blue | [[red dot]] | brown
//! ```
//!
//! Tags keep their brackets everywhere inside the crate (that is how they are
//! written back to the attribute). Only display code strips them, through
//! [`strip_brackets`].

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// A bracketed phrase of word characters and spaces, or a bare run of word characters.
static TAG_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\[\[[\w ]+\]\]|\w+").expect("valid tag token regex"));

/// Splits a raw `tags` attribute value into tag tokens.
///
/// Tokens are matched left to right without overlap. Anything that is not a
/// token (punctuation, stray brackets) is skipped rather than kept as a partial
/// tag.
pub fn tokenize(raw: &str) -> Vec<String> {
    TAG_TOKEN_RE
        .find_iter(raw)
        .map(|m| m.as_str().to_string())
        .collect()
}

/// Quotes a tag containing a space as `[[tag]]`, unless it is quoted already.
pub fn decorate(tag: &str) -> String {
    if tag.contains(' ') && !is_bracketed(tag) {
        format!("[[{}]]", tag)
    } else {
        tag.to_string()
    }
}

/// Returns the bare text of a tag, without the `[[ ]]` quoting.
pub fn strip_brackets(tag: &str) -> &str {
    if is_bracketed(tag) {
        &tag[2..tag.len() - 2]
    } else {
        tag
    }
}

fn is_bracketed(tag: &str) -> bool {
    tag.len() >= 4 && tag.starts_with("[[") && tag.ends_with("]]")
}

/// Tags as supplied by a caller, before normalization.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TagsInput {
    /// One comma-delimited string, e.g. `"test, png image"`.
    Joined(String),
    /// Already split tags, e.g. `["test", "png image"]`.
    List(Vec<String>),
}

impl Default for TagsInput {
    fn default() -> Self {
        TagsInput::Joined(String::new())
    }
}

impl From<&str> for TagsInput {
    fn from(value: &str) -> Self {
        TagsInput::Joined(value.to_string())
    }
}

impl From<Vec<String>> for TagsInput {
    fn from(value: Vec<String>) -> Self {
        TagsInput::List(value)
    }
}

/// Normalizes caller-supplied tags into the stored token form.
///
/// Pieces are trimmed, empty pieces dropped, and multi-word tags quoted.
pub fn parse_input(input: &TagsInput) -> Vec<String> {
    let pieces: Vec<&str> = match input {
        TagsInput::Joined(joined) => joined.split(',').collect(),
        TagsInput::List(list) => list.iter().map(String::as_str).collect(),
    };

    pieces
        .into_iter()
        .map(str::trim)
        .filter(|piece| !piece.is_empty())
        .map(decorate)
        .collect()
}

/// Insertion-ordered, duplicate-free collection of tags.
///
/// Equality is order-sensitive: two indexes holding the same tags in a
/// different first-appearance order are different.
#[derive(Debug, Clone, Default)]
pub struct TagIndex {
    order: Vec<String>,
    seen: HashSet<String>,
}

impl TagIndex {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds `tag` if it has not been seen yet. Returns true when it was added.
    pub fn insert(&mut self, tag: &str) -> bool {
        if self.seen.contains(tag) {
            return false;
        }
        self.seen.insert(tag.to_string());
        self.order.push(tag.to_string());
        true
    }

    pub fn contains(&self, tag: &str) -> bool {
        self.seen.contains(tag)
    }

    pub fn len(&self) -> usize {
        self.order.len()
    }

    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.order.iter().map(String::as_str)
    }

    pub fn as_slice(&self) -> &[String] {
        &self.order
    }
}

impl PartialEq for TagIndex {
    fn eq(&self, other: &Self) -> bool {
        self.order == other.order
    }
}

impl Eq for TagIndex {}

impl<S: AsRef<str>> FromIterator<S> for TagIndex {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut index = TagIndex::new();
        for tag in iter {
            index.insert(tag.as_ref());
        }
        index
    }
}
