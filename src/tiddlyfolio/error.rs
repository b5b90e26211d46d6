use thiserror::Error;

#[derive(Error, Debug)]
pub enum TiddlyError {
    #[error("Malformed document: {0}")]
    MalformedDocument(String),

    #[error("Tiddler starting at line {line} has no title attribute")]
    MissingTitle { line: usize },

    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Could not replace the document: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Configuration error: {0}")]
    Config(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, TiddlyError>;
