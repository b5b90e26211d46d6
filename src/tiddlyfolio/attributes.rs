//! Reads the metadata of a stored tiddler from its opening `<div ...>` line.
//!
//! The line always has the same flat shape:
//!
//! ```text
//! <div created="C" modified="M" tags="T" title="TITLE" type="K">
//! ```
//!
//! so instead of a markup parser this module carries a small scanner for
//! `name="value"` pairs. Attribute order does not matter and unknown
//! attributes are ignored.

use crate::error::{Result, TiddlyError};
use crate::markup::unescape_html;
use crate::model::{Metadata, TiddlerKind};
use crate::tags::tokenize;

/// Extracts title, timestamps and tags from the raw lines of one tiddler.
///
/// The attribute line is the first line that opens a `div`. `first_line` is
/// the document line number of `raw_lines[0]` and only feeds error messages.
pub fn extract_metadata(raw_lines: &[String], first_line: usize) -> Result<Metadata> {
    let (offset, line) = raw_lines
        .iter()
        .enumerate()
        .find(|(_, line)| line.trim_start().starts_with("<div"))
        .ok_or(TiddlyError::MissingTitle { line: first_line })?;

    let attrs = parse_attributes(line);
    let lookup = |name: &str| {
        attrs
            .iter()
            .rev()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.clone())
    };

    let title = lookup("title").ok_or(TiddlyError::MissingTitle {
        line: first_line + offset,
    })?;

    let tags = match TiddlerKind::of_title(&title) {
        TiddlerKind::System => None,
        TiddlerKind::User => lookup("tags")
            .filter(|raw| !raw.is_empty())
            .map(|raw| tokenize(&raw)),
    };

    Ok(Metadata {
        created: lookup("created"),
        modified: lookup("modified"),
        title,
        tags,
    })
}

/// Parses the attributes of the first start tag on `line`.
///
/// Names are lowercased. Values may be double quoted, single quoted or bare;
/// entity references in them are decoded. An attribute without a value maps
/// to the empty string.
pub fn parse_attributes(line: &str) -> Vec<(String, String)> {
    let mut scanner = Scanner::new(line.trim_start());
    let mut attrs = Vec::new();

    if scanner.bump() != Some('<') {
        return attrs;
    }
    scanner.take_while(|c| c.is_ascii_alphanumeric());

    loop {
        scanner.skip_whitespace();
        match scanner.peek() {
            None | Some('>') => break,
            Some('/') => {
                scanner.bump();
                continue;
            }
            _ => {}
        }

        let name = scanner
            .take_while(|c| !c.is_whitespace() && c != '=' && c != '>' && c != '/')
            .to_ascii_lowercase();
        if name.is_empty() {
            // Unexpected character; nothing sensible left to read.
            break;
        }

        scanner.skip_whitespace();
        let value = if scanner.peek() == Some('=') {
            scanner.bump();
            scanner.skip_whitespace();
            match scanner.peek() {
                Some(quote @ ('"' | '\'')) => {
                    scanner.bump();
                    let value = scanner.take_while(|c| c != quote);
                    scanner.bump();
                    value
                }
                _ => scanner.take_while(|c| !c.is_whitespace() && c != '>'),
            }
        } else {
            ""
        };

        attrs.push((name, unescape_html(value)));
    }

    attrs
}

struct Scanner<'a> {
    src: &'a str,
    pos: usize,
}

impl<'a> Scanner<'a> {
    fn new(src: &'a str) -> Self {
        Self { src, pos: 0 }
    }

    fn peek(&self) -> Option<char> {
        self.src[self.pos..].chars().next()
    }

    fn bump(&mut self) -> Option<char> {
        let c = self.peek()?;
        self.pos += c.len_utf8();
        Some(c)
    }

    fn skip_whitespace(&mut self) {
        self.take_while(char::is_whitespace);
    }

    fn take_while(&mut self, keep: impl Fn(char) -> bool) -> &'a str {
        let start = self.pos;
        while let Some(c) = self.peek() {
            if !keep(c) {
                break;
            }
            self.pos += c.len_utf8();
        }
        &self.src[start..self.pos]
    }
}
