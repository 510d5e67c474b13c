//! Hugging Face feature-extraction embedding provider.
//!
//! `POST https://api-inference.huggingface.co/pipeline/feature-extraction/<model>`
//! with `{inputs: [..], options: {wait_for_model: true}}`; the response is
//! one vector per input.

use crate::embeddings::EmbeddingProvider;
use ragnarok_core::config::EmbeddingSettings;
use ragnarok_core::{ApiToken, AppError, AppResult};
use reqwest::Client;
use serde::Serialize;
use std::time::Duration;
use tracing::{debug, instrument, warn};

/// Base URL for the hosted feature-extraction pipeline.
const DEFAULT_FEATURE_EXTRACTION_BASE: &str =
    "https://api-inference.huggingface.co/pipeline/feature-extraction";

/// Maximum attempts per batch
const MAX_RETRIES: u32 = 3;

/// Initial backoff duration in milliseconds
const INITIAL_BACKOFF_MS: u64 = 200;

/// Request timeout in seconds
const REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Serialize)]
struct FeatureExtractionRequest<'a> {
    inputs: &'a [String],
    options: FeatureExtractionOptions,
}

#[derive(Debug, Serialize)]
struct FeatureExtractionOptions {
    wait_for_model: bool,
}

/// Remote sentence-embedding provider.
#[derive(Debug)]
pub struct HuggingFaceEmbeddings {
    client: Client,
    endpoint: String,
    model: String,
    dimensions: usize,
    token: ApiToken,
}

impl HuggingFaceEmbeddings {
    pub fn new(settings: &EmbeddingSettings, token: ApiToken) -> AppResult<Self> {
        let client = Client::builder()
            .timeout(Duration::from_secs(REQUEST_TIMEOUT_SECS))
            .build()
            .map_err(|e| AppError::Config(format!("Failed to create HTTP client: {}", e)))?;

        let endpoint = settings
            .endpoint
            .clone()
            .unwrap_or_else(|| format!("{}/{}", DEFAULT_FEATURE_EXTRACTION_BASE, settings.model));

        Ok(Self {
            client,
            endpoint,
            model: settings.model.clone(),
            dimensions: settings.dimensions,
            token,
        })
    }

    #[instrument(skip(self, texts), fields(batch = texts.len(), model = %self.model))]
    async fn embed_with_retries(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        let mut attempt = 0;

        loop {
            attempt += 1;
            match self.embed_once(texts).await {
                Ok(vectors) => return Ok(vectors),
                Err(RequestFailure::Retryable(msg)) if attempt < MAX_RETRIES => {
                    let backoff_ms = INITIAL_BACKOFF_MS * 2_u64.pow(attempt - 1);
                    warn!(
                        "Embedding request failed (attempt {}/{}), retrying in {}ms: {}",
                        attempt, MAX_RETRIES, backoff_ms, msg
                    );
                    tokio::time::sleep(Duration::from_millis(backoff_ms)).await;
                }
                Err(RequestFailure::Retryable(msg)) | Err(RequestFailure::Fatal(msg)) => {
                    return Err(AppError::Retrieval(format!("Embedding request failed: {}", msg)));
                }
            }
        }
    }

    async fn embed_once(&self, texts: &[String]) -> Result<Vec<Vec<f32>>, RequestFailure> {
        let request = FeatureExtractionRequest {
            inputs: texts,
            options: FeatureExtractionOptions {
                wait_for_model: true,
            },
        };

        let response = self
            .client
            .post(&self.endpoint)
            .bearer_auth(self.token.expose())
            .json(&request)
            .send()
            .await
            .map_err(|e| RequestFailure::Retryable(e.without_url().to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| RequestFailure::Retryable(e.to_string()))?;

        if status.is_server_error() || status.as_u16() == 429 {
            return Err(RequestFailure::Retryable(format!("HTTP {}: {}", status, body)));
        }
        if !status.is_success() {
            return Err(RequestFailure::Fatal(format!("HTTP {}: {}", status, body)));
        }

        let vectors: Vec<Vec<f32>> = serde_json::from_str(&body).map_err(|e| {
            RequestFailure::Fatal(format!("Unexpected embedding response ({}): {}", e, body))
        })?;

        self.check_shape(texts.len(), &vectors)
            .map_err(RequestFailure::Fatal)?;

        debug!("Received {} embeddings", vectors.len());
        Ok(vectors)
    }

    fn check_shape(&self, expected: usize, vectors: &[Vec<f32>]) -> Result<(), String> {
        if vectors.len() != expected {
            return Err(format!(
                "Expected {} embeddings, received {}",
                expected,
                vectors.len()
            ));
        }
        if let Some(bad) = vectors.iter().find(|v| v.len() != self.dimensions) {
            return Err(format!(
                "Model '{}' returned {} dimensions, expected {}",
                self.model,
                bad.len(),
                self.dimensions
            ));
        }
        Ok(())
    }
}

enum RequestFailure {
    Retryable(String),
    Fatal(String),
}

#[async_trait::async_trait]
impl EmbeddingProvider for HuggingFaceEmbeddings {
    fn provider_name(&self) -> &str {
        "huggingface"
    }

    fn model_name(&self) -> &str {
        &self.model
    }

    fn dimensions(&self) -> usize {
        self.dimensions
    }

    async fn embed_batch(&self, texts: &[String]) -> AppResult<Vec<Vec<f32>>> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        self.embed_with_retries(texts).await
    }
}
