//! Serializes a [`Document`] back to text.
//!
//! Output is the header lines, the raw lines of every tiddler, then the
//! trailer lines. Nothing is added between them; every line already carries
//! its terminator.

use crate::error::Result;
use crate::model::Document;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::Path;
use tempfile::NamedTempFile;
use tracing::{debug, info};

fn lines(doc: &Document) -> impl Iterator<Item = &str> {
    doc.header_lines
        .iter()
        .chain(doc.tiddlers.iter().flat_map(|t| t.raw_lines.iter()))
        .chain(doc.trailer_lines.iter())
        .map(String::as_str)
}

pub fn write_document<W: Write>(doc: &Document, mut out: W) -> Result<()> {
    for line in lines(doc) {
        out.write_all(line.as_bytes())?;
    }
    out.flush()?;
    Ok(())
}

pub fn write_to_string(doc: &Document) -> String {
    lines(doc).collect()
}

/// Writes `doc` to `destination`, replacing it atomically.
///
/// The text goes to a temporary file in the destination's directory, which is
/// synced and then renamed over the destination. If anything fails before the
/// rename, the temporary file is removed and the destination is untouched.
///
/// An existing destination keeps its permissions. A new destination takes
/// the permissions of `template` (the wiki that was read) instead of the
/// owner-only mode temporary files are created with.
pub fn publish(doc: &Document, destination: &Path, template: &Path) -> Result<()> {
    let dir = match destination.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut temp = NamedTempFile::new_in(dir)?;
    debug!(temp = %temp.path().display(), "writing document to temporary file");

    write_document(doc, BufWriter::new(temp.as_file_mut()))?;
    temp.as_file().sync_all()?;

    let permissions = fs::metadata(destination)
        .or_else(|_| fs::metadata(template))
        .map(|meta| meta.permissions());
    if let Ok(permissions) = permissions {
        temp.as_file().set_permissions(permissions)?;
    }

    temp.persist(destination)?;
    info!(path = %destination.display(), tiddlers = doc.len(), "published document");
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::reader::read_document;
    use crate::test_utils::MOCK_WIKI;

    #[test]
    fn test_writes_parts_in_order_without_separators() {
        let doc = Document {
            header_lines: vec!["h1\n".into(), "h2\n".into()],
            tiddlers: Vec::new(),
            trailer_lines: vec!["t\n".into()],
        };
        let mut out = Vec::new();
        write_document(&doc, &mut out).unwrap();
        assert_eq!(out, b"h1\nh2\nt\n");
    }

    #[test]
    fn test_publish_replaces_file_and_leaves_no_temp_files() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("wiki.html");
        fs::write(&path, "old contents").unwrap();

        let doc = read_document(MOCK_WIKI.as_bytes()).unwrap();
        publish(&doc, &path, &path).unwrap();

        assert_eq!(fs::read_to_string(&path).unwrap(), MOCK_WIKI);
        let entries: Vec<_> = fs::read_dir(dir.path()).unwrap().collect();
        assert_eq!(entries.len(), 1, "found leftover files: {:?}", entries);
    }

    #[test]
    fn test_publish_into_missing_directory_fails_without_side_effects() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("wiki.html");
        let doc = read_document(MOCK_WIKI.as_bytes()).unwrap();

        assert!(publish(&doc, &path, &path).is_err());
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_new_file_copies_template_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wiki.html");
        let output = dir.path().join("published.html");
        fs::write(&source, MOCK_WIKI).unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o644)).unwrap();

        let doc = read_document(MOCK_WIKI.as_bytes()).unwrap();
        publish(&doc, &output, &source).unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_publish_keeps_existing_destination_mode() {
        use std::os::unix::fs::PermissionsExt;

        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wiki.html");
        let output = dir.path().join("published.html");
        fs::write(&source, MOCK_WIKI).unwrap();
        fs::write(&output, "old").unwrap();
        fs::set_permissions(&source, fs::Permissions::from_mode(0o600)).unwrap();
        fs::set_permissions(&output, fs::Permissions::from_mode(0o664)).unwrap();

        let doc = read_document(MOCK_WIKI.as_bytes()).unwrap();
        publish(&doc, &output, &source).unwrap();

        let mode = fs::metadata(&output).unwrap().permissions().mode();
        assert_eq!(mode & 0o777, 0o664);
    }
}
