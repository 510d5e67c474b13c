//! Embedding provider trait and factory.

use ragnarok_core::config::EmbeddingSettings;
use ragnarok_core::{ApiToken, AppError, AppResult};
use std::sync::Arc;

/// Trait for embedding providers.
#[async_trait::async_trait]
pub trait EmbeddingProvider: Send + Sync + std::fmt::Debug {
    /// Get provider name (e.g., "trigram", "huggingface")
    fn provider_name(&self) -> &str;

    /// Get model identifier
    fn model_name(&self) -> &str;

    /// Get embedding dimensions
    fn dimensions(&self) -> usize;

    /// Generate embeddings for multiple texts in a batch.
    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>>;

    /// Generate embedding for a single text (convenience method).
    async fn embed(&self, text: &str) -> AppResult<Vec<f32>> {
        let mut results = self.embed_batch(&[text.to_string()]).await?;
        results
            .pop()
            .ok_or_else(|| AppError::Retrieval("No embedding returned".to_string()))
    }
}

/// Create an embedding provider based on configuration.
pub fn create_provider(
    settings: &EmbeddingSettings,
    token: Option<&ApiToken>,
) -> AppResult<Arc<dyn EmbeddingProvider>> {
    match settings.provider.as_str() {
        "trigram" => Ok(Arc::new(super::providers::trigram::TrigramProvider::new(
            settings.dimensions,
        ))),

        "huggingface" => {
            let token = token.cloned().ok_or_else(|| {
                AppError::Config(
                    "Hugging Face embeddings require an API token (set HF_API_TOKEN)".to_string(),
                )
            })?;
            let provider =
                super::providers::huggingface::HuggingFaceEmbeddings::new(settings, token)?;
            Ok(Arc::new(provider))
        }

        _ => Err(AppError::Config(format!(
            "Unknown embedding provider: '{}'. Supported providers: trigram, huggingface",
            settings.provider
        ))),
    }
}
