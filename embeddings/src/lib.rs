//! # Embeddings
//!
//! This crate provides sentence embedding generation and similarity ranking
//! for the survey question search system.
//!
//! ## Features
//!
//! - **Embedding Generation**: Convert question text to dense vectors
//! - **Similarity Ranking**: Rank candidates by cosine similarity
//! - **Multiple Providers**: OpenAI-compatible APIs or a local hashing model
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                    Embeddings System                            │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  EmbeddingProvider ──► Embedding ──► rank_top_k                 │
//! │       │                                   │                     │
//! │       ▼                                   ▼                     │
//! │  OpenAI/Hash                      cosine_similarity             │
//! └─────────────────────────────────────────────────────────────────┘
//! ```

pub mod error;
pub mod provider;
pub mod similarity;

pub use error::{EmbeddingError, Result};
pub use provider::{EmbeddingProvider, HashProvider, OpenAiProvider};
pub use similarity::{cosine_similarity, rank_top_k};

/// A dense vector embedding.
pub type Embedding = Vec<f32>;

/// Dimension of embeddings (varies by model).
pub const DEFAULT_DIMENSION: usize = 1536; // OpenAI text-embedding-3-small
