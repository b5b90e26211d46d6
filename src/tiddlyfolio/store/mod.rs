//! # Storage Layer
//!
//! The [`WikiStore`] trait is the only place where a [`Document`] meets the
//! outside world. Commands load a document, change it in memory, and hand it
//! back to the store to be written.
//!
//! ## Implementations
//!
//! - [`fs::FileStore`]: reads a wiki file from disk and publishes the result
//!   either over the same file or to a separate output file. Writes are
//!   atomic (temporary file + rename).
//! - [`memory::InMemoryStore`]: keeps the wiki text in a `String`, for tests.
//!
//! Both go through the same [`reader`](crate::reader) and
//! [`writer`](crate::writer), so the in-memory store exercises the exact
//! serialization used on disk.

use crate::error::Result;
use crate::model::Document;
use std::path::Path;

pub mod fs;
pub mod memory;

/// Abstract interface for reading and writing one wiki document.
pub trait WikiStore {
    /// Read and segment the document
    fn load(&self) -> Result<Document>;

    /// Write the whole document to its destination
    fn save(&mut self, doc: &Document) -> Result<()>;

    /// Path the document is written to; image links are relative to it
    fn destination(&self) -> &Path;
}
