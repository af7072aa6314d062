//! Configuration for the question index.

use std::path::PathBuf;

use serde::{Deserialize, Serialize};

/// Default number of results returned by a search.
pub const DEFAULT_TOP_K: usize = 5;

/// Configuration for the question index.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct IndexConfig {
    /// Path to the question corpus JSON document.
    pub corpus_path: PathBuf,

    /// Embedding provider configuration.
    pub embedding: EmbeddingConfig,

    /// Number of results a search returns when the caller has no
    /// preference.
    pub default_top_k: usize,
}

impl IndexConfig {
    /// Create a new configuration with default values.
    pub fn new(corpus_path: impl Into<PathBuf>) -> Self {
        Self {
            corpus_path: corpus_path.into(),
            embedding: EmbeddingConfig::default(),
            default_top_k: DEFAULT_TOP_K,
        }
    }

    /// Set the embedding configuration.
    pub fn with_embedding(mut self, config: EmbeddingConfig) -> Self {
        self.embedding = config;
        self
    }

    /// Set the default number of search results.
    pub fn with_default_top_k(mut self, top_k: usize) -> Self {
        self.default_top_k = top_k;
        self
    }
}

/// Configuration for the embedding provider.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EmbeddingConfig {
    /// Which provider to use.
    pub provider: EmbeddingProviderType,

    /// Model identifier (provider default when unset).
    pub model: Option<String>,

    /// API key for remote providers (falls back to the environment).
    pub api_key: Option<String>,

    /// Base URL for remote providers.
    pub base_url: Option<String>,

    /// Embedding dimension for the hashing provider.
    pub dimension: Option<usize>,
}

impl EmbeddingConfig {
    /// Set the model identifier.
    pub fn with_model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }
}

impl Default for EmbeddingConfig {
    fn default() -> Self {
        Self {
            provider: EmbeddingProviderType::OpenAi,
            model: None,
            api_key: None,
            base_url: None,
            dimension: None,
        }
    }
}

/// Type of embedding provider.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EmbeddingProviderType {
    /// OpenAI-compatible embeddings API.
    OpenAi,
    /// Local feature-hashing embeddings.
    Hash,
}
