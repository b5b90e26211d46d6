//! # API Facade
//!
//! The API layer is a thin facade over the command layer and the single entry
//! point for every tiddlyfolio operation.
//!
//! The facade:
//! - **Dispatches** to the matching `commands::<cmd>::run`
//! - **Normalizes inputs** (image glob patterns → existing image files)
//! - **Supplies the environment** commands take as plain arguments: the
//!   current time, the working directory used to resolve relative image
//!   paths, and the loaded [`FolioConfig`]
//! - **Returns structured types** (`Result<CmdResult>`)
//!
//! It does no printing and holds no business logic.
//!
//! ## Generic Over WikiStore
//!
//! - Production: `TiddlyApi<FileStore>`
//! - Testing: `TiddlyApi<InMemoryStore>`
//!
//! API tests check dispatch and argument plumbing only; the behavior itself is
//! tested in the command modules.

use crate::commands;
use crate::config::FolioConfig;
use crate::error::Result;
use crate::paths::expand_images;
use crate::store::WikiStore;
use chrono::Utc;
use std::path::Path;

pub use crate::commands::add::AddRequest;
pub use crate::commands::config::ConfigAction;
pub use crate::commands::{CmdMessage, CmdResult, MessageLevel, TiddlerSummary};
pub use crate::tags::TagsInput;

/// Shows or changes the configuration file at `path`. Needs no wiki.
pub fn configure(path: &Path, action: ConfigAction) -> Result<CmdResult> {
    commands::config::run(path, action)
}

pub struct TiddlyApi<S: WikiStore> {
    store: S,
    config: FolioConfig,
}

impl<S: WikiStore> TiddlyApi<S> {
    pub fn new(store: S, config: FolioConfig) -> Self {
        Self { store, config }
    }

    /// Adds a tiddler. `request.images` may hold glob patterns; each must
    /// match at least one existing file.
    pub fn add_tiddler(&mut self, request: &AddRequest) -> Result<CmdResult> {
        let cwd = std::env::current_dir()?;
        request.validate()?;
        let request = AddRequest {
            images: expand_images(&request.images, &cwd)?,
            ..request.clone()
        };
        commands::add::run(&mut self.store, &request, &self.config, Utc::now(), &cwd)
    }

    pub fn list_tiddlers(&self, tag: Option<&str>, include_system: bool) -> Result<CmdResult> {
        commands::list::run(&self.store, tag, include_system)
    }

    pub fn tags(&mut self, rebuild: bool) -> Result<CmdResult> {
        commands::tags::run(&mut self.store, rebuild, Utc::now())
    }

    pub fn store(&self) -> &S {
        &self.store
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::memory::InMemoryStore;
    use crate::test_utils::MOCK_WIKI;

    fn api() -> TiddlyApi<InMemoryStore> {
        TiddlyApi::new(InMemoryStore::new(MOCK_WIKI), FolioConfig::default())
    }

    #[test]
    fn test_add_dispatches_and_saves() {
        let mut api = api();
        let request = AddRequest::new("Note").with_description("hello");
        let result = api.add_tiddler(&request).unwrap();

        assert_eq!(result.affected_tiddlers.len(), 1);
        assert_eq!(result.affected_tiddlers[0].title, "Note");
        assert_eq!(api.store().saves(), 1);
    }

    #[test]
    fn test_add_uses_configured_type_and_width() {
        let config = FolioConfig {
            image_width: 640,
            tiddler_type: "text/vnd.tiddlywiki".to_string(),
        };
        let dir = tempfile::tempdir().unwrap();
        std::fs::write(dir.path().join("fig.png"), "png").unwrap();
        let mut api = TiddlyApi::new(
            InMemoryStore::new(MOCK_WIKI).with_destination(dir.path().join("wiki.html")),
            config,
        );
        let request = AddRequest::new("Fig").with_images(vec![dir.path().join("*.png")]);
        api.add_tiddler(&request).unwrap();

        let text = api.store().text();
        assert!(text.contains("type=\"text/vnd.tiddlywiki\""));
        assert!(text.contains("<pre>![image](fig.png){:width=&quot;640&quot;}\n"));
    }

    #[test]
    fn test_add_rejects_images_that_do_not_exist() {
        let dir = tempfile::tempdir().unwrap();
        let mut api = api();
        let request = AddRequest::new("Glob").with_images(vec![dir.path().join("*.png")]);

        let err = api.add_tiddler(&request).unwrap_err();
        assert!(matches!(err, crate::error::TiddlyError::InvalidRequest(_)));
        assert_eq!(api.store().saves(), 0);
        assert_eq!(api.store().text(), MOCK_WIKI);
    }

    #[test]
    fn test_invalid_request_is_not_saved() {
        let mut api = api();
        assert!(api.add_tiddler(&AddRequest::new("Nothing")).is_err());
        assert_eq!(api.store().saves(), 0);
    }

    #[test]
    fn test_list_and_tags_are_read_only() {
        let mut api = api();
        let listed = api.list_tiddlers(Some("blue"), false).unwrap();
        assert_eq!(listed.listed_tiddlers.len(), 1);

        let tags = api.tags(false).unwrap();
        assert_eq!(tags.tags.len(), 2);
        assert_eq!(api.store().saves(), 0);
    }

    #[test]
    fn test_configure_dispatches_to_config_command() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.json");
        configure(&path, ConfigAction::Set("tiddler-type".into(), "text/plain".into())).unwrap();

        let shown = configure(&path, ConfigAction::ShowAll).unwrap();
        assert_eq!(shown.config.unwrap().tiddler_type, "text/plain");
    }

    #[test]
    fn test_tags_rebuild_saves() {
        let mut api = api();
        api.tags(true).unwrap();
        assert_eq!(api.store().saves(), 1);
    }
}
