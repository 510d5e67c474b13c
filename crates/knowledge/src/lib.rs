//! Knowledge base and retrieval-augmented answering for RAGnarok.
//!
//! Loads the corpus into an in-memory vector index and answers questions
//! against it through the [`rag::RagPipeline`].

pub mod embeddings;
pub mod loader;
pub mod memory_index;
pub mod rag;
pub mod store;
pub mod types;
pub mod vector_index;

#[cfg(test)]
mod tests;

pub use embeddings::{create_provider, EmbeddingProvider};
pub use loader::load_documents;
pub use rag::{Conversation, ConversationTurn, PipelineState, RagAnswer, RagPipeline, Role};
pub use store::{InitReport, QueryRequest, QueryResponse, RetrievalStore, StoreStats};
pub use types::{DocumentMetadata, DocumentRecord, RetrievalResult};

use ragnarok_core::{AppConfig, AppResult};
use ragnarok_llm::{create_client, ClientSettings};

/// Create the configured store and populate it from the corpus.
pub async fn open_store(config: &AppConfig) -> AppResult<(RetrievalStore, InitReport)> {
    let embedder = create_provider(&config.embedding, config.api_token.as_ref())?;

    tracing::debug!(
        "Embedding provider: {} ({}, {} dims)",
        embedder.provider_name(),
        embedder.model_name(),
        embedder.dimensions()
    );

    let mut store = RetrievalStore::from_config(config, embedder);
    let report = store.initialize().await?;
    Ok((store, report))
}

/// Wire a populated store to the configured generation client.
pub fn build_pipeline(config: &AppConfig, store: RetrievalStore) -> AppResult<RagPipeline> {
    let client = create_client(&ClientSettings::from(config))?;

    tracing::info!(
        "Using {} model '{}'",
        client.provider_name(),
        client.model_name()
    );

    RagPipeline::from_config(config, store, client)
}
