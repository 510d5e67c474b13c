//! Retrieval store initialization and query behavior.

use super::support::{trigram_store, write_corpus, LOT_RECORD, SKILLS_RECORD};
use crate::embeddings::providers::trigram::TrigramProvider;
use crate::embeddings::EmbeddingProvider;
use crate::store::{Include, QueryRequest, RetrievalStore};
use ragnarok_core::{AppError, AppResult};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use tempfile::TempDir;

/// Trigram embedder that counts batch calls.
#[derive(Debug)]
struct CountingEmbedder {
    inner: TrigramProvider,
    batches: AtomicUsize,
}

impl CountingEmbedder {
    fn new() -> Arc<Self> {
        Arc::new(Self {
            inner: TrigramProvider::new(128),
            batches: AtomicUsize::new(0),
        })
    }

    fn batches(&self) -> usize {
        self.batches.load(Ordering::SeqCst)
    }
}

#[async_trait::async_trait]
impl EmbeddingProvider for CountingEmbedder {
    fn provider_name(&self) -> &str {
        "counting"
    }

    fn model_name(&self) -> &str {
        "counting-trigram"
    }

    fn dimensions(&self) -> usize {
        self.inner.dimensions()
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        self.batches.fetch_add(1, Ordering::SeqCst);
        self.inner.embed_batch(texts).await
    }
}

#[tokio::test]
async fn test_initialize_is_idempotent() {
    let dir = TempDir::new().unwrap();
    let text = format!("{}\n---\n{}", LOT_RECORD, SKILLS_RECORD);
    write_corpus(dir.path(), &[("kb.txt", text.as_str())]);
    let mut store = trigram_store(dir.path());

    let first = store.initialize().await.unwrap();
    assert_eq!(first.documents_loaded, 2);
    assert!(!first.already_populated);

    let second = store.initialize().await.unwrap();
    assert!(second.already_populated);
    assert_eq!(second.documents_loaded, 0);
    assert_eq!(store.len(), 2);
}

#[tokio::test]
async fn test_empty_corpus_is_load_error() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &[("blank.txt", "\n---\n   \n")]);
    let mut store = trigram_store(dir.path());

    let result = store.initialize().await;
    assert!(matches!(result, Err(AppError::Load(ref msg)) if msg.contains("No documents loaded")));
    assert!(store.is_empty());
}

#[tokio::test]
async fn test_empty_store_query_skips_embedding() {
    let dir = TempDir::new().unwrap();
    let embedder = CountingEmbedder::new();
    let store = RetrievalStore::new("c", dir.path(), embedder.clone());

    assert!(store.query("What is LOT?", 3).await.unwrap().is_empty());
    assert_eq!(embedder.batches(), 0);
}

#[tokio::test]
async fn test_zero_k_returns_nothing() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &[("lot.txt", LOT_RECORD)]);
    let mut store = trigram_store(dir.path());
    store.initialize().await.unwrap();

    assert!(store.query("LOT", 0).await.unwrap().is_empty());
}

#[tokio::test]
async fn test_documents_embedded_in_batches() {
    let dir = TempDir::new().unwrap();
    let corpus: Vec<String> = (0..5)
        .map(|i| format!("Title: Doc {}\nContent: distinct body number {}", i, i))
        .collect();
    let text = corpus.join("\n---\n");
    write_corpus(dir.path(), &[("kb.txt", text.as_str())]);

    let embedder = CountingEmbedder::new();
    let mut store = RetrievalStore::new("c", dir.path(), embedder.clone()).with_batch_size(2);
    let report = store.initialize().await.unwrap();

    assert_eq!(report.documents_loaded, 5);
    assert_eq!(embedder.batches(), 3);
}

#[tokio::test]
async fn test_query_ranks_and_limits() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &[("lot.txt", LOT_RECORD), ("skills.txt", SKILLS_RECORD)]);
    let mut store = trigram_store(dir.path());
    store.initialize().await.unwrap();

    let results = store
        .query("free skills library for job postings and resumes", 1)
        .await
        .unwrap();
    assert_eq!(results.len(), 1);
    assert_eq!(results[0].rank, 1);
    assert_eq!(results[0].document.title, "Lightcast Open Skills");

    let all = store.query("skills", 10).await.unwrap();
    assert_eq!(all.len(), 2);
    assert!(all[0].score >= all[1].score);
}

#[tokio::test]
async fn test_query_batch_shapes() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &[("lot.txt", LOT_RECORD), ("skills.txt", SKILLS_RECORD)]);
    let mut store = trigram_store(dir.path());
    store.initialize().await.unwrap();

    let request = QueryRequest::new(
        vec!["occupation taxonomy".to_string(), "open skills".to_string()],
        1,
    );
    let response = store.query_batch(&request).await.unwrap();

    assert_eq!(response.ids.len(), 2);
    assert_eq!(response.ids[0], vec!["doc_0_0".to_string()]);
    let metadatas = response.metadatas.unwrap();
    assert_eq!(metadatas[0][0].source, "https://kb.lightcast.io/lot");
    assert_eq!(metadatas[1][0].source, "kb.lightcast.io/skills");
    assert!(response.documents.unwrap()[0][0].starts_with("LOT is the Lightcast"));
    assert!(response.distances[0][0] < 1.0);

    let docs_only = QueryRequest {
        include: vec![Include::Documents],
        ..request
    };
    let response = store.query_batch(&docs_only).await.unwrap();
    assert!(response.metadatas.is_none());
    assert!(response.documents.is_some());
}

#[tokio::test]
async fn test_stats_reports_collection() {
    let dir = TempDir::new().unwrap();
    write_corpus(dir.path(), &[("lot.txt", LOT_RECORD)]);
    let mut store = trigram_store(dir.path());
    store.initialize().await.unwrap();

    let stats = store.stats();
    assert_eq!(stats.collection_name, "test_collection");
    assert_eq!(stats.document_count, 1);
    assert_eq!(stats.embedding_provider, "trigram");
}
