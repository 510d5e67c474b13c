//! Retrieval store: embedding function + vector index over the corpus.
//!
//! `initialize(&mut self)` populates the index once; `query(&self)` is the
//! read path used for every question.

use crate::embeddings::EmbeddingProvider;
use crate::loader::load_documents;
use crate::memory_index::MemoryIndex;
use crate::types::{DocumentMetadata, DocumentRecord, RetrievalResult};
use crate::vector_index::VectorIndex;
use ragnarok_core::{AppConfig, AppError, AppResult};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Instant;

/// Default batch size for embedding during initialization.
pub const DEFAULT_BATCH_SIZE: usize = 100;

/// Outcome of [`RetrievalStore::initialize`].
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InitReport {
    /// Documents loaded by this call (0 when already populated)
    pub documents_loaded: usize,

    /// The index already had documents; nothing was loaded
    pub already_populated: bool,

    /// Wall-clock time of the call
    pub duration_secs: f64,
}

/// Optional parts of a [`QueryResponse`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Include {
    Documents,
    Metadatas,
}

/// Batch query: one ranked list per query text.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct QueryRequest {
    pub query_texts: Vec<String>,
    pub n_results: usize,
    #[serde(default = "default_include")]
    pub include: Vec<Include>,
}

fn default_include() -> Vec<Include> {
    vec![Include::Documents, Include::Metadatas]
}

impl QueryRequest {
    pub fn new(query_texts: Vec<String>, n_results: usize) -> Self {
        Self {
            query_texts,
            n_results,
            include: default_include(),
        }
    }
}

/// Parallel lists, outer index = query text, inner index = rank.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct QueryResponse {
    pub ids: Vec<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub documents: Option<Vec<Vec<String>>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub metadatas: Option<Vec<Vec<DocumentMetadata>>>,
    /// Cosine distance (`1 - similarity`)
    pub distances: Vec<Vec<f32>>,
}

/// Store statistics for `stats` output.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StoreStats {
    pub collection_name: String,
    pub corpus_path: PathBuf,
    pub document_count: usize,
    pub embedding_provider: String,
    pub embedding_model: String,
    pub dimensions: usize,
}

/// Long-lived owner of the document index.
pub struct RetrievalStore {
    collection_name: String,
    corpus_path: PathBuf,
    extensions: Vec<String>,
    batch_size: usize,
    embedder: Arc<dyn EmbeddingProvider>,
    index: Box<dyn VectorIndex>,
}

impl std::fmt::Debug for RetrievalStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RetrievalStore")
            .field("collection_name", &self.collection_name)
            .field("corpus_path", &self.corpus_path)
            .field("documents", &self.index.len())
            .field("embedder", &self.embedder)
            .finish()
    }
}

impl RetrievalStore {
    /// Create an empty store backed by an in-memory index.
    pub fn new(
        collection_name: impl Into<String>,
        corpus_path: impl Into<PathBuf>,
        embedder: Arc<dyn EmbeddingProvider>,
    ) -> Self {
        Self {
            collection_name: collection_name.into(),
            corpus_path: corpus_path.into(),
            extensions: vec!["txt".to_string()],
            batch_size: DEFAULT_BATCH_SIZE,
            embedder,
            index: Box::new(MemoryIndex::new()),
        }
    }

    /// Create an empty store from application configuration.
    pub fn from_config(config: &AppConfig, embedder: Arc<dyn EmbeddingProvider>) -> Self {
        Self::new(
            config.retrieval.collection_name.clone(),
            config.corpus_path(),
            embedder,
        )
        .with_extensions(config.retrieval.extensions.clone())
        .with_batch_size(config.embedding.batch_size)
    }

    pub fn with_extensions(mut self, extensions: Vec<String>) -> Self {
        self.extensions = extensions;
        self
    }

    pub fn with_batch_size(mut self, batch_size: usize) -> Self {
        self.batch_size = batch_size.max(1);
        self
    }

    /// Replace the backing index.
    pub fn with_index(mut self, index: Box<dyn VectorIndex>) -> Self {
        self.index = index;
        self
    }

    pub fn collection_name(&self) -> &str {
        &self.collection_name
    }

    pub fn corpus_path(&self) -> &Path {
        &self.corpus_path
    }

    pub fn len(&self) -> usize {
        self.index.len()
    }

    pub fn is_empty(&self) -> bool {
        self.index.is_empty()
    }

    pub fn stats(&self) -> StoreStats {
        StoreStats {
            collection_name: self.collection_name.clone(),
            corpus_path: self.corpus_path.clone(),
            document_count: self.index.len(),
            embedding_provider: self.embedder.provider_name().to_string(),
            embedding_model: self.embedder.model_name().to_string(),
            dimensions: self.embedder.dimensions(),
        }
    }

    /// Populate the index from the corpus if it is empty.
    ///
    /// A second call is a no-op. A corpus that yields no documents is a
    /// [`AppError::Load`].
    pub async fn initialize(&mut self) -> AppResult<InitReport> {
        let start = Instant::now();

        if !self.index.is_empty() {
            tracing::debug!(
                "Collection '{}' already holds {} documents",
                self.collection_name,
                self.index.len()
            );
            return Ok(InitReport {
                documents_loaded: 0,
                already_populated: true,
                duration_secs: start.elapsed().as_secs_f64(),
            });
        }

        let documents = load_documents(&self.corpus_path, &self.extensions)?;
        if documents.is_empty() {
            return Err(AppError::Load(format!(
                "No documents loaded from '{}'. Please ensure it contains correctly formatted files.",
                self.corpus_path.display()
            )));
        }

        tracing::info!(
            "Populating collection '{}' with {} documents",
            self.collection_name,
            documents.len()
        );

        let loaded = self.insert_documents(documents).await?;
        let duration_secs = start.elapsed().as_secs_f64();

        tracing::info!(
            "Collection '{}' ready: {} documents in {:.2}s",
            self.collection_name,
            loaded,
            duration_secs
        );

        Ok(InitReport {
            documents_loaded: loaded,
            already_populated: false,
            duration_secs,
        })
    }

    /// Embed and index records in batches.
    pub async fn insert_documents(&mut self, documents: Vec<DocumentRecord>) -> AppResult<usize> {
        let total = documents.len();
        let mut remaining = documents.into_iter().peekable();
        let mut batch_number = 0;

        while remaining.peek().is_some() {
            let batch: Vec<DocumentRecord> = remaining.by_ref().take(self.batch_size).collect();
            batch_number += 1;

            let texts: Vec<String> = batch.iter().map(|d| d.content.clone()).collect();
            let embeddings = self
                .embedder
                .embed_batch(&texts)
                .await
                .map_err(as_retrieval_error)?;

            if embeddings.len() != batch.len() {
                return Err(AppError::Retrieval(format!(
                    "Embedder returned {} vectors for {} documents",
                    embeddings.len(),
                    batch.len()
                )));
            }

            tracing::debug!("Embedded batch {} ({} documents)", batch_number, batch.len());

            for (document, embedding) in batch.into_iter().zip(embeddings) {
                self.index.insert(document, embedding)?;
            }
        }

        Ok(total)
    }

    /// Top-`k` documents for `text`, most similar first.
    ///
    /// Returns an empty list without embedding when the store is empty or
    /// `k == 0`.
    pub async fn query(&self, text: &str, k: usize) -> AppResult<Vec<RetrievalResult>> {
        if k == 0 || self.index.is_empty() {
            tracing::debug!("Skipping search (k={}, documents={})", k, self.index.len());
            return Ok(Vec::new());
        }

        let embedding = self.embedder.embed(text).await.map_err(as_retrieval_error)?;
        let hits = self.index.search(&embedding, k)?;

        let results: Vec<RetrievalResult> = hits
            .into_iter()
            .enumerate()
            .map(|(i, (document, score))| RetrievalResult {
                document,
                rank: i + 1,
                score,
            })
            .collect();

        for result in &results {
            tracing::debug!(
                rank = result.rank,
                score = result.score,
                id = %result.document.id,
                "Retrieved document"
            );
        }

        Ok(results)
    }

    /// Batch form of [`query`](Self::query).
    pub async fn query_batch(&self, request: &QueryRequest) -> AppResult<QueryResponse> {
        let mut response = QueryResponse {
            documents: request
                .include
                .contains(&Include::Documents)
                .then(Vec::new),
            metadatas: request
                .include
                .contains(&Include::Metadatas)
                .then(Vec::new),
            ..QueryResponse::default()
        };

        for text in &request.query_texts {
            let results = self.query(text, request.n_results).await?;

            response
                .ids
                .push(results.iter().map(|r| r.document.id.clone()).collect());
            response
                .distances
                .push(results.iter().map(|r| 1.0 - r.score).collect());
            if let Some(documents) = response.documents.as_mut() {
                documents.push(results.iter().map(|r| r.document.content.clone()).collect());
            }
            if let Some(metadatas) = response.metadatas.as_mut() {
                metadatas.push(results.iter().map(|r| r.document.metadata()).collect());
            }
        }

        Ok(response)
    }
}

fn as_retrieval_error(err: AppError) -> AppError {
    match err {
        AppError::Retrieval(_) => err,
        other => AppError::Retrieval(other.to_string()),
    }
}
