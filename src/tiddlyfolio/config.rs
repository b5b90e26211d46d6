use crate::body::DEFAULT_IMAGE_WIDTH;
use crate::error::Result;
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

const CONFIG_FILENAME: &str = "config.json";
const DEFAULT_TIDDLER_TYPE: &str = "text/x-markdown";

/// Configuration for tiddlyfolio, stored as JSON in the user's config directory.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FolioConfig {
    /// Width given to every embedded image
    #[serde(default = "default_image_width")]
    pub image_width: u32,

    /// Content type of generated figure tiddlers (e.g. "text/x-markdown")
    #[serde(default = "default_tiddler_type")]
    pub tiddler_type: String,
}

fn default_image_width() -> u32 {
    DEFAULT_IMAGE_WIDTH
}

fn default_tiddler_type() -> String {
    DEFAULT_TIDDLER_TYPE.to_string()
}

impl Default for FolioConfig {
    fn default() -> Self {
        Self {
            image_width: default_image_width(),
            tiddler_type: default_tiddler_type(),
        }
    }
}

impl FolioConfig {
    /// Platform config file, e.g. `~/.config/tiddlyfolio/config.json`
    pub fn default_path() -> Option<PathBuf> {
        ProjectDirs::from("org", "tiddlyfolio", "tiddlyfolio")
            .map(|dirs| dirs.config_dir().join(CONFIG_FILENAME))
    }

    /// Load config from the given file, or return defaults if not found
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();

        if !path.exists() {
            return Ok(Self::default());
        }

        let content = fs::read_to_string(path)?;
        let config: FolioConfig = serde_json::from_str(&content)?;
        Ok(config)
    }

    /// Current value of a config key, formatted for display
    pub fn get(&self, key: &str) -> Option<String> {
        match key {
            "image-width" => Some(self.image_width.to_string()),
            "tiddler-type" => Some(self.tiddler_type.clone()),
            _ => None,
        }
    }

    /// Set a config key from its textual value
    pub fn set(&mut self, key: &str, value: &str) -> std::result::Result<(), String> {
        match key {
            "image-width" => {
                self.image_width = value
                    .trim()
                    .parse::<u32>()
                    .ok()
                    .filter(|width| *width > 0)
                    .ok_or_else(|| format!("image-width must be a positive integer, got {:?}", value))?;
            }
            "tiddler-type" => self.tiddler_type = value.trim().to_string(),
            other => return Err(format!("Unknown config key: {}", other)),
        }
        Ok(())
    }

    /// Save config to the given file
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let path = path.as_ref();

        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() && !parent.exists() {
                fs::create_dir_all(parent)?;
            }
        }

        let content = serde_json::to_string_pretty(self)?;
        fs::write(path, content)?;
        Ok(())
    }
}
