//! Similarity computation for embeddings.

use ordered_float::OrderedFloat;

use crate::Embedding;
use crate::error::{EmbeddingError, Result};

/// Compute the cosine similarity between two embeddings.
///
/// Returns a value between -1.0 and 1.0, where:
/// - 1.0 means identical vectors
/// - 0.0 means orthogonal vectors
/// - -1.0 means opposite vectors
///
/// A zero-norm vector on either side yields 0.0 rather than an error, so
/// ranking stays total over degenerate embeddings.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> Result<f32> {
    if a.len() != b.len() {
        return Err(EmbeddingError::DimensionMismatch {
            expected: a.len(),
            actual: b.len(),
        });
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let magnitude_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let magnitude_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if magnitude_a == 0.0 || magnitude_b == 0.0 {
        return Ok(0.0);
    }

    Ok(dot_product / (magnitude_a * magnitude_b))
}

/// Rank the rows of an embedding matrix against a query vector.
///
/// Scores every row with cosine similarity and returns at most `k`
/// `(row_index, score)` pairs sorted by descending score. Exactly equal
/// scores are broken by the lower row index, so the ordering is
/// deterministic across calls.
pub fn rank_top_k(
    query: &Embedding,
    matrix: &[Embedding],
    k: usize,
) -> Result<Vec<(usize, f32)>> {
    let mut scores: Vec<(usize, OrderedFloat<f32>)> = Vec::with_capacity(matrix.len());

    for (index, embedding) in matrix.iter().enumerate() {
        let score = cosine_similarity(query, embedding)?;
        scores.push((index, OrderedFloat(score)));
    }

    // Descending score, ascending index on ties.
    scores.sort_by(|a, b| b.1.cmp(&a.1).then_with(|| a.0.cmp(&b.0)));

    Ok(scores
        .into_iter()
        .take(k)
        .map(|(index, score)| (index, score.0))
        .collect())
}
