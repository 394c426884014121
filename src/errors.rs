use std::path::PathBuf;

use thiserror::Error;

#[derive(Debug, Error)]
pub enum SummarizeError {
    #[error("num_sentences must be >= 1, got {0}")]
    InvalidSentenceCount(usize),
}

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("default_sentences must be >= 1, got {0}")]
    InvalidSentenceCount(usize),
    #[error("unknown stopword language: {0}")]
    UnknownLanguage(String),
    #[error("failed to read stopwords file {path}: {source}")]
    StopwordFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("request_timeout_ms must be > 0")]
    InvalidTimeout,
}
