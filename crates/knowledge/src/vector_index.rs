//! Vector index abstraction for document records.
//!
//! Defines a trait for backend-agnostic vector storage and retrieval.

use crate::types::DocumentRecord;
use ragnarok_core::AppResult;

/// Trait for vector index backends.
///
/// Implementations must support:
/// - Inserting records with their embeddings
/// - Searching for similar vectors (top-k)
/// - Reporting how many records are stored
pub trait VectorIndex: Send + Sync {
    /// Insert a record with its embedding.
    fn insert(&mut self, document: DocumentRecord, embedding: Vec<f32>) -> AppResult<()>;

    /// Search for the top-k most similar records to the query embedding.
    ///
    /// Returns records ordered by descending similarity score. Equal scores
    /// keep insertion order.
    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(DocumentRecord, f32)>>;

    /// Number of stored records.
    fn len(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

/// Cosine similarity; 0.0 for mismatched lengths or zero vectors.
pub fn cosine_similarity(a: &[f32], b: &[f32]) -> f32 {
    if a.len() != b.len() {
        return 0.0;
    }

    let dot_product: f32 = a.iter().zip(b.iter()).map(|(x, y)| x * y).sum();
    let norm_a: f32 = a.iter().map(|x| x * x).sum::<f32>().sqrt();
    let norm_b: f32 = b.iter().map(|x| x * x).sum::<f32>().sqrt();

    if norm_a == 0.0 || norm_b == 0.0 {
        return 0.0;
    }

    dot_product / (norm_a * norm_b)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cosine_similarity() {
        assert!((cosine_similarity(&[1.0, 0.0], &[1.0, 0.0]) - 1.0).abs() < 1e-6);
        assert!(cosine_similarity(&[1.0, 0.0], &[0.0, 1.0]).abs() < 1e-6);
        assert!((cosine_similarity(&[1.0, 0.0], &[-1.0, 0.0]) + 1.0).abs() < 1e-6);
    }

    #[test]
    fn test_cosine_degenerate_inputs() {
        assert_eq!(cosine_similarity(&[1.0, 2.0], &[1.0]), 0.0);
        assert_eq!(cosine_similarity(&[0.0, 0.0], &[1.0, 0.0]), 0.0);
    }
}
