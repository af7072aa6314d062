//! Error types for the question index.

use thiserror::Error;

/// Result type alias for question index operations.
pub type Result<T> = std::result::Result<T, QuestionIndexError>;

/// Errors that can occur in the question index.
#[derive(Error, Debug)]
pub enum QuestionIndexError {
    /// Corpus source is valid JSON but not one of the supported shapes.
    #[error("unsupported corpus format: {0}")]
    UnsupportedFormat(String),

    /// Search attempted with no questions loaded.
    #[error("no questions loaded, call load_questions first")]
    EmptyIndex,

    /// Embedding provider error.
    #[error("embedding error: {0}")]
    Embedding(#[from] insights_embeddings::EmbeddingError),

    /// Corpus source is not parseable JSON.
    #[error("json error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}
