use std::path::PathBuf;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("configuration error: {0}")]
    Config(String),

    #[error("{kind} not found: {name}")]
    NotFound { kind: &'static str, name: String },

    /// The request was malformed (client error); no lookup was attempted.
    #[error("{0}")]
    InvalidRequest(String),

    #[error("could not load document {}: {source}", path.display())]
    Document {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}
