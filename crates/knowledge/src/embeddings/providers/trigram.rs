//! Offline embedding provider built from word and character-trigram hashes.

use crate::embeddings::provider::EmbeddingProvider;
use ragnarok_core::AppResult;
use std::collections::{BTreeMap, HashSet};

/// Words that carry no retrieval signal, including question words.
const STOP_WORDS: &[&str] = &[
    "the", "is", "at", "which", "on", "a", "an", "as", "are", "was", "were", "for", "to", "of",
    "in", "and", "or", "but", "with", "by", "from", "this", "that", "be", "have", "has", "had",
    "it", "its", "their", "they", "them", "what", "who", "how", "why", "when", "where", "does",
    "can", "you", "about",
];

/// Deterministic, content-dependent embeddings with no network access.
///
/// Each non-stop word adds weight to one dimension for the whole word and one
/// per character trigram; the result is normalized to unit length. Good
/// enough for lexical overlap, not a semantic model.
#[derive(Debug)]
pub struct TrigramProvider {
    dimensions: usize,
    stop_words: HashSet<&'static str>,
}

impl TrigramProvider {
    /// Create a new trigram provider with specified dimensions.
    pub fn new(dimensions: usize) -> Self {
        Self {
            dimensions: dimensions.max(1),
            stop_words: STOP_WORDS.iter().copied().collect(),
        }
    }

    fn tokens(&self, text: &str) -> BTreeMap<String, u32> {
        let mut freq = BTreeMap::new();
        for word in text
            .to_lowercase()
            .split(|c: char| !c.is_alphanumeric())
            .filter(|w| w.chars().count() > 2 && !self.stop_words.contains(w))
        {
            *freq.entry(word.to_string()).or_insert(0) += 1;
        }
        freq
    }

    fn bucket(&self, bytes: &[u8], multiplier: u64) -> usize {
        let hash = bytes
            .iter()
            .fold(0u64, |acc, b| acc.wrapping_mul(multiplier).wrapping_add(*b as u64));
        (hash % self.dimensions as u64) as usize
    }

    fn embed_text(&self, text: &str) -> Vec<f32> {
        let mut embedding = vec![0.0f32; self.dimensions];

        for (word, freq) in self.tokens(text) {
            let chars: Vec<char> = word.chars().collect();
            for window in chars.windows(3) {
                let trigram: String = window.iter().collect();
                embedding[self.bucket(trigram.as_bytes(), 37)] += (freq as f32).sqrt();
            }
            embedding[self.bucket(word.as_bytes(), 31)] += freq as f32;
        }

        let norm: f32 = embedding.iter().map(|x| x * x).sum::<f32>().sqrt();
        if norm > 0.0 {
            for v in &mut embedding {
                *v /= norm;
            }
        }

        embedding
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for TrigramProvider {
    fn provider_name(&self) -> &str {
        "trigram"
    }

    fn model_name(&self) -> &str {
        "trigram-v1"
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| self.embed_text(text)).collect())
    }
}
