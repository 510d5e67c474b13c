//! In-memory vector index with brute-force cosine search.

use crate::types::DocumentRecord;
use crate::vector_index::{cosine_similarity, VectorIndex};
use ragnarok_core::{AppError, AppResult};
use std::collections::HashSet;

/// Flat in-memory index.
///
/// Populated once per process; every search scans all entries.
#[derive(Debug, Default)]
pub struct MemoryIndex {
    entries: Vec<(DocumentRecord, Vec<f32>)>,
    ids: HashSet<String>,
    dimensions: Option<usize>,
}

impl MemoryIndex {
    pub fn new() -> Self {
        Self::default()
    }
}

impl VectorIndex for MemoryIndex {
    fn insert(&mut self, document: DocumentRecord, embedding: Vec<f32>) -> AppResult<()> {
        if document.content.trim().is_empty() {
            return Err(AppError::Retrieval(format!(
                "Refusing to index empty document '{}'",
                document.id
            )));
        }

        match self.dimensions {
            Some(dims) if dims != embedding.len() => {
                return Err(AppError::Retrieval(format!(
                    "Embedding for '{}' has {} dimensions, index expects {}",
                    document.id,
                    embedding.len(),
                    dims
                )));
            }
            None => self.dimensions = Some(embedding.len()),
            _ => {}
        }

        if !self.ids.insert(document.id.clone()) {
            return Err(AppError::Retrieval(format!(
                "Duplicate document id '{}'",
                document.id
            )));
        }

        self.entries.push((document, embedding));
        Ok(())
    }

    fn search(&self, query_embedding: &[f32], top_k: usize) -> AppResult<Vec<(DocumentRecord, f32)>> {
        if top_k == 0 || self.entries.is_empty() {
            return Ok(Vec::new());
        }

        if let Some(dims) = self.dimensions {
            if dims != query_embedding.len() {
                return Err(AppError::Retrieval(format!(
                    "Query embedding has {} dimensions, index expects {}",
                    query_embedding.len(),
                    dims
                )));
            }
        }

        let mut scored: Vec<(usize, f32)> = self
            .entries
            .iter()
            .enumerate()
            .map(|(i, (_, embedding))| (i, cosine_similarity(query_embedding, embedding)))
            .collect();

        // Stable sort keeps insertion order on ties.
        scored.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
        scored.truncate(top_k);

        Ok(scored
            .into_iter()
            .map(|(i, score)| (self.entries[i].0.clone(), score))
            .collect())
    }

    fn len(&self) -> usize {
        self.entries.len()
    }
}
