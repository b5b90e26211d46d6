//! Adds a figure or note tiddler to a wiki.
//!
//! The body is made of one markdown image line per image (linked relative to
//! the wiki file being written) followed by the description. After the tiddler
//! is stored, the Tag List tiddler is regenerated if the set of tags in use
//! changed.

use crate::body::compose;
use crate::commands::tag_list;
use crate::commands::{CmdMessage, CmdResult, TiddlerSummary};
use crate::config::FolioConfig;
use crate::error::{Result, TiddlyError};
use crate::factory::{upsert, UpsertRequest, MAX_SUFFIX};
use crate::markup::unescape_html;
use crate::model::timestamp;
use crate::paths::image_link;
use crate::store::WikiStore;
use crate::tags::{parse_input, TagsInput};
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};

#[derive(Debug, Clone)]
pub struct AddRequest {
    pub title: String,
    pub images: Vec<PathBuf>,
    pub description: String,
    pub tags: TagsInput,
    /// Overwrite a tiddler with the same title (the default) instead of
    /// adding `Title-01`, `Title-02`, ...
    pub replace: bool,
}

impl AddRequest {
    pub fn new(title: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            images: Vec::new(),
            description: String::new(),
            tags: TagsInput::default(),
            replace: true,
        }
    }

    pub fn with_images(mut self, images: Vec<PathBuf>) -> Self {
        self.images = images;
        self
    }

    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = description.into();
        self
    }

    pub fn with_tags(mut self, tags: impl Into<TagsInput>) -> Self {
        self.tags = tags.into();
        self
    }

    pub fn with_replace(mut self, replace: bool) -> Self {
        self.replace = replace;
        self
    }

    /// Checks the request before any file is touched.
    ///
    /// Title and tags are written into the attribute line unescaped, so they
    /// cannot contain double quotes or line breaks. Entity references are
    /// refused too: they would be decoded on the next read, and the stored
    /// title would no longer match the requested one.
    pub fn validate(&self) -> Result<()> {
        if self.images.is_empty() && self.description.is_empty() {
            return Err(TiddlyError::InvalidRequest(
                "at least one image or a description is required".into(),
            ));
        }
        if self.title.trim().is_empty() {
            return Err(TiddlyError::InvalidRequest("title cannot be empty".into()));
        }
        if !attribute_safe(&self.title) {
            return Err(TiddlyError::InvalidRequest(format!(
                "title cannot contain quotes, line breaks or entity references: {:?}",
                self.title
            )));
        }
        if let Some(tag) = parse_input(&self.tags).iter().find(|t| !attribute_safe(t)) {
            return Err(TiddlyError::InvalidRequest(format!(
                "tag cannot contain quotes, line breaks or entity references: {:?}",
                tag
            )));
        }
        Ok(())
    }
}

fn attribute_safe(value: &str) -> bool {
    !value.contains(&['"', '\n', '\r'][..]) && unescape_html(value) == value
}

pub fn run<S: WikiStore>(
    store: &mut S,
    request: &AddRequest,
    config: &FolioConfig,
    now: DateTime<Utc>,
    cwd: &Path,
) -> Result<CmdResult> {
    request.validate()?;

    let mut doc = store.load()?;

    let links: Vec<String> = request
        .images
        .iter()
        .map(|image| image_link(store.destination(), image, cwd))
        .collect();
    let body = compose(&links, &request.description, config.image_width);
    let tags = parse_input(&request.tags);
    let modified = timestamp(now);

    let tags_before = doc.tag_index();
    let outcome = upsert(
        &mut doc,
        &UpsertRequest {
            title: &request.title,
            body: &body,
            tags: &tags,
            content_type: &config.tiddler_type,
            replace: request.replace,
        },
        &modified,
    )?;

    let mut result = CmdResult::default();
    if outcome.collision_exhausted {
        result.add_message(CmdMessage::warning(format!(
            "All titles up to \"{}-{}\" are taken; overwrote \"{}\"",
            request.title, MAX_SUFFIX, outcome.title
        )));
    }

    if let Some(regenerated) = tag_list::regenerate_if_changed(&mut doc, &tags_before, &modified)? {
        result.add_message(CmdMessage::info(format!(
            "{} updated ({} tags)",
            regenerated.title,
            doc.tag_index().len()
        )));
    }

    store.save(&doc)?;

    let verb = if outcome.replaced { "updated" } else { "added" };
    result.add_message(CmdMessage::success(format!(
        "Tiddler {}: {} -> {}",
        verb,
        outcome.title,
        store.destination().display()
    )));
    result
        .affected_tiddlers
        .push(TiddlerSummary::from(&doc.tiddlers[outcome.index]));
    Ok(result)
}
