use std::path::PathBuf;

use thiserror::Error;

/// Failure while loading or assembling a lexicon. Always fatal for
/// initialization: no partially filled `Lexicon` is ever produced.
#[derive(Debug, Error)]
pub enum LexiconError {
    #[error("failed to read lexicon file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("lexicon source unavailable for {file}: {message}")]
    Source { file: String, message: String },
    #[error("lexicon list {0} is empty")]
    EmptyList(String),
}

/// Failure while decoding a share link.
#[derive(Debug, Error)]
pub enum DecodeError {
    #[error("share payload missing")]
    MissingPayload,
    #[error("invalid base64 in share payload: {0}")]
    Base64(#[from] base64::DecodeError),
    #[error("share payload is not valid UTF-8: {0}")]
    Utf8(#[from] std::str::Utf8Error),
    #[error("invalid share payload JSON: {0}")]
    Json(#[from] serde_json::Error),
}

/// Failure in the key-value persistence layer.
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("store lock poisoned during {0}")]
    LockPoisoned(&'static str),
    #[error("store I/O error for key {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },
    #[error("state serialization error: {0}")]
    Serde(#[from] serde_json::Error),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("failed to read config {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid config: {0}")]
    Parse(#[from] toml::de::Error),
}
