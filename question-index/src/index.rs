//! The question index: owns the corpus and answers ranked queries.

use std::path::Path;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info, warn};

use insights_embeddings::{
    Embedding, EmbeddingError, EmbeddingProvider, HashProvider, OpenAiProvider, rank_top_k,
};

use crate::config::{EmbeddingConfig, EmbeddingProviderType, IndexConfig};
use crate::corpus::{self, LoadReport, QuestionRecord};
use crate::error::{QuestionIndexError, Result};

/// A ranked match for a search query.
///
/// Transient projection of a [`QuestionRecord`] plus a freshly computed
/// score; never stored.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchResult {
    /// Identifier of the matched question.
    pub question_id: String,

    /// Text of the matched question.
    pub question_text: String,

    /// Cosine similarity against the query embedding.
    pub similarity_score: f32,
}

/// In-memory semantic index over a question corpus.
///
/// Starts empty; [`load_questions`](Self::load_questions) populates the
/// record sequence and its positionally aligned embedding matrix, replacing
/// any prior corpus wholesale. Searches are read-only, so an index behind
/// `Arc<RwLock<_>>` supports concurrent queries; loads take `&mut self` and
/// therefore cannot interleave with reads on the same instance.
pub struct QuestionIndex {
    /// Embedding provider shared by the ingestion and query paths.
    provider: Arc<dyn EmbeddingProvider>,

    /// Loaded corpus, in load order.
    questions: Vec<QuestionRecord>,

    /// Embedding matrix; row *i* embeds `questions[i]`.
    embeddings: Vec<Embedding>,
}

impl QuestionIndex {
    /// Create an empty index, acquiring the embedding provider described by
    /// the configuration.
    ///
    /// Fails with [`EmbeddingError::ModelLoad`] when the requested provider
    /// cannot be initialized, before any index state exists.
    pub fn open(config: &IndexConfig) -> Result<Self> {
        let provider = build_provider(&config.embedding)?;
        info!(
            "Question index opened with {} provider (model: {})",
            provider.name(),
            provider.model()
        );
        Ok(Self::with_provider(provider))
    }

    /// Create an empty index around an already constructed provider.
    pub fn with_provider(provider: Arc<dyn EmbeddingProvider>) -> Self {
        Self {
            provider,
            questions: Vec::new(),
            embeddings: Vec::new(),
        }
    }

    /// Get the embedding provider.
    pub fn provider(&self) -> &Arc<dyn EmbeddingProvider> {
        &self.provider
    }

    /// Number of loaded questions.
    pub fn len(&self) -> usize {
        self.questions.len()
    }

    /// Check whether any questions are loaded.
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    /// Load a corpus from a JSON file on disk, replacing any prior corpus.
    pub async fn load_questions_from_path(&mut self, path: impl AsRef<Path>) -> Result<LoadReport> {
        let content = tokio::fs::read_to_string(path.as_ref()).await?;
        let source: Value = serde_json::from_str(&content)?;
        self.load_questions(&source).await
    }

    /// Load a corpus from a parsed JSON document, replacing any prior
    /// corpus.
    ///
    /// The records and their embedding matrix are swapped in together only
    /// after parsing and batch encoding have fully succeeded; on any failure
    /// the previously loaded corpus stays untouched and searchable.
    pub async fn load_questions(&mut self, source: &Value) -> Result<LoadReport> {
        let parsed = corpus::parse_corpus(source)?;

        if parsed.dropped > 0 {
            warn!(
                "Dropped {} corpus entries without usable question text",
                parsed.dropped
            );
        }

        let texts: Vec<String> = parsed
            .records
            .iter()
            .map(|record| record.question_text.clone())
            .collect();
        let embeddings = self.provider.encode_batch(&texts).await?;

        if embeddings.len() != parsed.records.len() {
            return Err(EmbeddingError::InvalidResponse(format!(
                "provider returned {} embeddings for {} questions",
                embeddings.len(),
                parsed.records.len()
            ))
            .into());
        }

        let report = LoadReport {
            loaded: parsed.records.len(),
            dropped: parsed.dropped,
        };

        // Atomic replacement: records and matrix change together.
        self.questions = parsed.records;
        self.embeddings = embeddings;

        info!("Loaded {} questions into the index", report.loaded);
        Ok(report)
    }

    /// Search the corpus for the questions most similar to `query`.
    ///
    /// Returns at most `top_k` results sorted by non-increasing similarity
    /// score, with exact ties broken by corpus position. Fewer than `top_k`
    /// results is a valid response when the corpus is smaller.
    pub async fn search(&self, query: &str, top_k: usize) -> Result<Vec<SearchResult>> {
        if self.questions.is_empty() {
            return Err(QuestionIndexError::EmptyIndex);
        }

        debug!("Searching {} questions for: {query}", self.questions.len());

        let query_embedding = self.provider.encode(query).await?;
        let ranked = rank_top_k(&query_embedding, &self.embeddings, top_k)?;

        Ok(ranked
            .into_iter()
            .map(|(position, similarity_score)| {
                let record = &self.questions[position];
                SearchResult {
                    question_id: record.question_id.clone(),
                    question_text: record.question_text.clone(),
                    similarity_score,
                }
            })
            .collect())
    }
}

/// Build the embedding provider described by the configuration, failing
/// fast when it cannot be initialized.
fn build_provider(config: &EmbeddingConfig) -> Result<Arc<dyn EmbeddingProvider>> {
    match config.provider {
        EmbeddingProviderType::OpenAi => {
            let mut provider = OpenAiProvider::new();
            if let Some(key) = &config.api_key {
                provider = provider.with_api_key(key);
            }
            if let Some(url) = &config.base_url {
                provider = provider.with_base_url(url);
            }
            if let Some(model) = &config.model {
                provider = provider.with_model(model);
            }
            if !provider.is_available() {
                return Err(EmbeddingError::ModelLoad(format!(
                    "model {} unavailable: no API key configured",
                    provider.model()
                ))
                .into());
            }
            Ok(Arc::new(provider))
        }
        EmbeddingProviderType::Hash => {
            let provider = match config.dimension {
                Some(dimension) => HashProvider::with_dimension(dimension),
                None => HashProvider::new(),
            };
            Ok(Arc::new(provider))
        }
    }
}
