//! # Tiddlyfolio Architecture
//!
//! Tiddlyfolio adds figure and note tiddlers to a single-file TiddlyWiki while
//! leaving every other byte of the file as it was. The HTML is never parsed as
//! a tree: the file is cut into three runs of lines by fixed marker strings,
//! and only the tiddler that changes (plus the derived "Tag List" tiddler) is
//! regenerated.
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────┐
//! │  CLI Layer (args.rs, wired by main.rs)                      │
//! │  - Parses arguments, prints messages, sets the exit code    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  API Layer (api.rs)                                         │
//! │  - Thin facade over commands                                │
//! │  - Supplies clock, working directory, configuration         │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Command Layer (commands/*.rs)                              │
//! │  - add, list, tags, Tag List regeneration                   │
//! │  - Returns CmdResult with leveled messages                  │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Document Layer (reader, writer, model, factory)            │
//! │  - Segments the file into header / tiddlers / trailer       │
//! │  - Builds and upserts generated tiddlers                    │
//! └─────────────────────────────────────────────────────────────┘
//!                              │
//!                              ▼
//! ┌─────────────────────────────────────────────────────────────┐
//! │  Storage Layer (store/)                                     │
//! │  - WikiStore trait                                          │
//! │  - FileStore (production), InMemoryStore (testing)          │
//! └─────────────────────────────────────────────────────────────┘
//! ```
//!
//! ## Round trips
//!
//! Every line read from the wiki is kept verbatim, terminator included, and
//! written back unchanged. Reading and then writing a document without edits
//! reproduces the input byte for byte.
//!
//! ## Module Overview
//!
//! - [`api`]: The API facade
//! - [`commands`]: Business logic for each command
//! - [`reader`] / [`writer`]: Segmenting and publishing a wiki file
//! - [`model`]: `Document`, `Tiddler`, `Metadata`
//! - [`attributes`]: Metadata from a tiddler's opening `<div>` line
//! - [`tags`]: Tag tokenizing, decoration, and the ordered tag index
//! - [`factory`]: Generated tiddlers and title collision handling
//! - [`body`] / [`paths`]: Figure bodies and image links
//! - [`markup`]: HTML entity escaping
//! - [`store`]: Storage abstraction and implementations
//! - [`config`]: Configuration management
//! - [`error`]: Error types

pub mod api;
pub mod attributes;
pub mod body;
pub mod commands;
pub mod config;
pub mod error;
pub mod factory;
pub mod markup;
pub mod model;
pub mod paths;
pub mod reader;
pub mod store;
pub mod tags;
pub mod writer;

#[cfg(any(test, feature = "test_utils"))]
pub mod test_utils;
