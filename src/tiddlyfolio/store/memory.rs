use super::WikiStore;
use crate::error::Result;
use crate::model::Document;
use crate::reader::read_document;
use crate::writer::write_to_string;
use std::path::{Path, PathBuf};

/// Wiki text held in memory. Saving replaces the text.
pub struct InMemoryStore {
    text: String,
    destination: PathBuf,
    saves: usize,
}

impl InMemoryStore {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            destination: PathBuf::from("wiki.html"),
            saves: 0,
        }
    }

    pub fn with_destination(mut self, destination: impl Into<PathBuf>) -> Self {
        self.destination = destination.into();
        self
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    /// How many times the document was written.
    pub fn saves(&self) -> usize {
        self.saves
    }
}

impl WikiStore for InMemoryStore {
    fn load(&self) -> Result<Document> {
        read_document(self.text.as_bytes())
    }

    fn save(&mut self, doc: &Document) -> Result<()> {
        self.text = write_to_string(doc);
        self.saves += 1;
        Ok(())
    }

    fn destination(&self) -> &Path {
        &self.destination
    }
}
