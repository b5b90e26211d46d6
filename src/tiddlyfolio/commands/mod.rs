use crate::config::FolioConfig;
use crate::model::{Tiddler, TiddlerKind};

pub mod add;
pub mod config;
pub mod list;
pub mod tag_list;
pub mod tags;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum MessageLevel {
    Info,
    Success,
    Warning,
    Error,
}

#[derive(Debug, Clone)]
pub struct CmdMessage {
    pub level: MessageLevel,
    pub content: String,
}

impl CmdMessage {
    pub fn info(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Info,
            content: content.into(),
        }
    }

    pub fn success(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Success,
            content: content.into(),
        }
    }

    pub fn warning(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Warning,
            content: content.into(),
        }
    }

    pub fn error(content: impl Into<String>) -> Self {
        Self {
            level: MessageLevel::Error,
            content: content.into(),
        }
    }
}

/// What a command reports about one tiddler.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TiddlerSummary {
    pub title: String,
    pub created: Option<String>,
    pub tags: Vec<String>,
    pub kind: TiddlerKind,
}

impl From<&Tiddler> for TiddlerSummary {
    fn from(tiddler: &Tiddler) -> Self {
        Self {
            title: tiddler.title().to_string(),
            created: tiddler.metadata.created.clone(),
            tags: tiddler.tags().map(<[String]>::to_vec).unwrap_or_default(),
            kind: tiddler.kind(),
        }
    }
}

#[derive(Debug, Default)]
pub struct CmdResult {
    pub affected_tiddlers: Vec<TiddlerSummary>,
    pub listed_tiddlers: Vec<TiddlerSummary>,
    pub tags: Vec<String>,
    pub config: Option<FolioConfig>,
    pub messages: Vec<CmdMessage>,
}

impl CmdResult {
    pub fn add_message(&mut self, message: CmdMessage) {
        self.messages.push(message);
    }

    pub fn with_listed_tiddlers(mut self, tiddlers: Vec<TiddlerSummary>) -> Self {
        self.listed_tiddlers = tiddlers;
        self
    }

    pub fn with_tags(mut self, tags: Vec<String>) -> Self {
        self.tags = tags;
        self
    }

    pub fn with_config(mut self, config: FolioConfig) -> Self {
        self.config = Some(config);
        self
    }

    pub fn has_errors(&self) -> bool {
        self.messages.iter().any(|m| m.level == MessageLevel::Error)
    }

    pub fn has_warnings(&self) -> bool {
        self.messages
            .iter()
            .any(|m| m.level == MessageLevel::Warning)
    }
}
