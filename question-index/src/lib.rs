//! # Question Index
//!
//! This crate owns the survey question corpus and answers ranked semantic
//! queries against it.
//!
//! ## Architecture
//!
//! ```text
//! ┌─────────────────────────────────────────────────────────────────┐
//! │                      Question Index                             │
//! ├─────────────────────────────────────────────────────────────────┤
//! │  corpus JSON ──► QuestionRecord[] ──► EmbeddingMatrix           │
//! │                        │                    │                   │
//! │                        └────────┬───────────┘                   │
//! │                                 ▼                               │
//! │                     search(query, top_k)                        │
//! │                                 │                               │
//! │                                 ▼                               │
//! │                        SearchResult[]                           │
//! └─────────────────────────────────────────────────────────────────┘
//! ```
//!
//! The record sequence and the embedding matrix are positionally aligned:
//! row *i* of the matrix is the embedding of record *i*. Both are replaced
//! together on every load, never mutated piecemeal.
//!
//! ## Usage
//!
//! ```rust,ignore
//! use insights_question_index::{IndexConfig, QuestionIndex};
//!
//! let mut index = QuestionIndex::open(&config)?;
//! index.load_questions_from_path(&config.corpus_path).await?;
//!
//! let results = index.search("job satisfaction", 5).await?;
//! ```

pub mod config;
pub mod corpus;
pub mod error;
pub mod index;

pub use config::{DEFAULT_TOP_K, EmbeddingConfig, EmbeddingProviderType, IndexConfig};
pub use corpus::{LoadReport, QuestionRecord};
pub use error::{QuestionIndexError, Result};
pub use index::{QuestionIndex, SearchResult};

// Re-export from dependencies for convenience
pub use insights_embeddings::{EmbeddingProvider, HashProvider, OpenAiProvider};
