//! Splits a wiki file into header, tiddlers and trailer.
//!
//! There is no HTML parsing here. The file is read line by line and cut at
//! fixed marker lines (see [`markers`]):
//!
//! ```text
//! ...header...
//! <div id="storeArea" style="display:none;">      <- last header line
//! <div created="..." ... title="A" ...>           <- tiddler A
//! <pre>...</pre></div>
//! <div created="..." ... title="B" ...>           <- tiddler B
//! ...
//! </pre></div>
//! </div>
//! <!--~~ Library modules ~~-->                    <- first trailer line
//! ...trailer...
//! ```
//!
//! Every line keeps its terminator, so concatenating the three parts gives
//! back the input unchanged.

use crate::error::{Result, TiddlyError};
use crate::model::{markers, Document, Tiddler};
use std::io::BufRead;
use tracing::debug;

/// Reads a whole document. Nothing is interpreted outside the tiddler blocks.
pub fn read_document<R: BufRead>(reader: R) -> Result<Document> {
    let mut lines = Lines::new(reader);

    let header_lines = read_header(&mut lines)?;
    let (tiddlers, mut trailer_lines) = read_tiddlers(&mut lines)?;
    while let Some(line) = lines.next_line()? {
        trailer_lines.push(line);
    }

    debug!(
        header = header_lines.len(),
        tiddlers = tiddlers.len(),
        trailer = trailer_lines.len(),
        "segmented document"
    );

    Ok(Document {
        header_lines,
        tiddlers,
        trailer_lines,
    })
}

fn read_header<R: BufRead>(lines: &mut Lines<R>) -> Result<Vec<String>> {
    let mut header = Vec::new();
    loop {
        let line = lines.next_line()?.ok_or_else(|| {
            TiddlyError::MalformedDocument(format!(
                "no `{}` line found",
                markers::STORE_AREA_START
            ))
        })?;
        let done = content(&line) == markers::STORE_AREA_START;
        header.push(line);
        if done {
            return Ok(header);
        }
    }
}

/// Reads tiddler blocks until the library modules marker.
///
/// Returns the tiddlers and the lines that start the trailer: the marker
/// itself, preceded by whatever sat between the last tiddler and the marker.
fn read_tiddlers<R: BufRead>(lines: &mut Lines<R>) -> Result<(Vec<Tiddler>, Vec<String>)> {
    let mut tiddlers = Vec::new();

    loop {
        let first_line = lines.line_no + 1;
        let mut block = Vec::new();

        loop {
            let line = lines.next_line()?.ok_or_else(|| {
                TiddlyError::MalformedDocument(format!(
                    "no `{}` line found after the store area",
                    markers::LIBRARY_MODULES
                ))
            })?;
            if content(&line) == markers::LIBRARY_MODULES {
                block.push(line);
                return Ok((tiddlers, block));
            }
            let starts_tiddler = line.starts_with(markers::TIDDLER_START);
            block.push(line);
            if starts_tiddler {
                break;
            }
        }

        let start_line = lines.line_no;
        while !block
            .last()
            .is_some_and(|line| content(line).ends_with(markers::TIDDLER_END))
        {
            let line = lines.next_line()?.ok_or_else(|| {
                TiddlyError::MalformedDocument(format!(
                    "tiddler starting at line {} is never closed by `{}`",
                    start_line,
                    markers::TIDDLER_END
                ))
            })?;
            block.push(line);
        }

        tiddlers.push(Tiddler::from_lines(block, first_line)?);
    }
}

/// A line without its terminator (`\n` or `\r\n`).
fn content(line: &str) -> &str {
    match line.strip_suffix('\n') {
        Some(stripped) => stripped.strip_suffix('\r').unwrap_or(stripped),
        None => line,
    }
}

struct Lines<R> {
    inner: R,
    line_no: usize,
}

impl<R: BufRead> Lines<R> {
    fn new(inner: R) -> Self {
        Self { inner, line_no: 0 }
    }

    fn next_line(&mut self) -> Result<Option<String>> {
        let mut line = String::new();
        if self.inner.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        self.line_no += 1;
        Ok(Some(line))
    }
}
