pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("invalid entry id: {id:?}")]
    InvalidIdentifier { id: String },

    #[error("entry already indexed: {id}")]
    AlreadyExists { id: String },

    #[error("no stored content for entry: {id}")]
    NotFound { id: String },

    #[error("malformed index record: {line:?}")]
    Corrupt { line: String },

    #[error("serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),
}
