use super::WikiStore;
use crate::error::Result;
use crate::model::Document;
use crate::paths::normalize;
use crate::reader::read_document;
use crate::writer::publish;
use std::fs::File;
use std::io::BufReader;
use std::path::{Path, PathBuf};
use tracing::debug;

/// A wiki file on disk.
///
/// Without an output path the source file is rewritten in place.
pub struct FileStore {
    source: PathBuf,
    output: Option<PathBuf>,
}

impl FileStore {
    pub fn new(source: impl Into<PathBuf>) -> Self {
        Self {
            source: source.into(),
            output: None,
        }
    }

    pub fn with_output(mut self, output: Option<PathBuf>) -> Self {
        self.output = output;
        self
    }

    pub fn source(&self) -> &Path {
        &self.source
    }

    /// True when saving overwrites the file that was read.
    pub fn in_place(&self) -> bool {
        match &self.output {
            None => true,
            Some(output) => normalize(output) == normalize(&self.source),
        }
    }
}

impl WikiStore for FileStore {
    fn load(&self) -> Result<Document> {
        debug!(path = %self.source.display(), "reading document");
        let file = File::open(&self.source)?;
        read_document(BufReader::new(file))
    }

    fn save(&mut self, doc: &Document) -> Result<()> {
        debug!(in_place = self.in_place(), "saving document");
        publish(doc, self.destination(), &self.source)
    }

    fn destination(&self) -> &Path {
        self.output.as_deref().unwrap_or(&self.source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::MOCK_WIKI;
    use std::fs;

    #[test]
    fn test_in_place_without_output() {
        let store = FileStore::new("wiki.html");
        assert!(store.in_place());
        assert_eq!(store.destination(), Path::new("wiki.html"));
    }

    #[test]
    fn test_in_place_when_output_names_the_source() {
        let store = FileStore::new("dir/wiki.html").with_output(Some("dir/./wiki.html".into()));
        assert!(store.in_place());

        let store = FileStore::new("wiki.html").with_output(Some("copy.html".into()));
        assert!(!store.in_place());
        assert_eq!(store.destination(), Path::new("copy.html"));
    }

    #[test]
    fn test_save_to_separate_output_keeps_source() {
        let dir = tempfile::tempdir().unwrap();
        let source = dir.path().join("wiki.html");
        let output = dir.path().join("out.html");
        fs::write(&source, MOCK_WIKI).unwrap();

        let mut store = FileStore::new(&source).with_output(Some(output.clone()));
        let mut doc = store.load().unwrap();
        doc.tiddlers.pop();
        store.save(&doc).unwrap();

        assert_eq!(fs::read_to_string(&source).unwrap(), MOCK_WIKI);
        assert!(fs::read_to_string(&output).unwrap().len() < MOCK_WIKI.len());
    }

    #[test]
    fn test_load_missing_file_is_io_error() {
        let store = FileStore::new("/definitely/not/here.html");
        assert!(matches!(store.load(), Err(crate::error::TiddlyError::Io(_))));
    }
}
