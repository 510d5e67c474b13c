//! LLM provider factory.
//!
//! Resolves the configured provider name into a concrete client and checks
//! that the credentials it needs are present.

use crate::client::LlmClient;
use crate::error::LlmError;
use crate::providers::{HuggingFaceClient, OllamaClient};
use crate::types::{ClientSettings, ProviderType};
use std::sync::Arc;
use std::time::Duration;

/// Create an LLM client from resolved settings.
///
/// # Errors
/// Returns [`LlmError::Config`] if the provider is unknown, a required token
/// is missing, or the HTTP client cannot be built.
pub fn create_client(settings: &ClientSettings) -> Result<Arc<dyn LlmClient>, LlmError> {
    let provider = ProviderType::parse(&settings.provider)
        .ok_or_else(|| LlmError::Config(format!("Unknown provider: {}", settings.provider)))?;

    tracing::debug!(provider = provider.as_str(), model = %settings.model, "Creating LLM client");

    match provider {
        ProviderType::HuggingFace => {
            let token = settings.api_token.clone().ok_or_else(|| {
                LlmError::Config("Hugging Face provider requires an API token".to_string())
            })?;

            let mut client = match &settings.endpoint {
                Some(endpoint) => HuggingFaceClient::with_endpoint(endpoint, &settings.model, token),
                None => HuggingFaceClient::new(&settings.model, token),
            };
            if let Some(secs) = settings.timeout_secs {
                client = client.with_timeout(Duration::from_secs(secs))?;
            }
            Ok(Arc::new(client))
        }
        ProviderType::Ollama => {
            let client = match &settings.endpoint {
                Some(endpoint) => OllamaClient::with_base_url(endpoint, &settings.model),
                None => OllamaClient::new(&settings.model),
            };
            Ok(Arc::new(client))
        }
    }
}
