//! LLM provider selection types.

use ragnarok_core::{ApiToken, AppConfig};

/// Provider type enum for matching.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderType {
    HuggingFace,
    Ollama,
}

impl ProviderType {
    /// Parse provider type from string.
    pub fn parse(s: &str) -> Option<Self> {
        match s.to_lowercase().as_str() {
            "huggingface" | "hf" => Some(Self::HuggingFace),
            "ollama" => Some(Self::Ollama),
            _ => None,
        }
    }

    /// Get the canonical provider name.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::HuggingFace => "huggingface",
            Self::Ollama => "ollama",
        }
    }
}

/// Everything the factory needs to build a client.
#[derive(Debug, Clone)]
pub struct ClientSettings {
    /// Provider identifier
    pub provider: String,

    /// Model identifier
    pub model: String,

    /// Endpoint override
    pub endpoint: Option<String>,

    /// Bearer token (required by Hugging Face)
    pub api_token: Option<ApiToken>,

    /// HTTP timeout in seconds
    pub timeout_secs: Option<u64>,
}

impl ClientSettings {
    pub fn new(provider: impl Into<String>, model: impl Into<String>) -> Self {
        Self {
            provider: provider.into(),
            model: model.into(),
            endpoint: None,
            api_token: None,
            timeout_secs: None,
        }
    }

    pub fn with_endpoint(mut self, endpoint: impl Into<String>) -> Self {
        self.endpoint = Some(endpoint.into());
        self
    }

    pub fn with_token(mut self, token: ApiToken) -> Self {
        self.api_token = Some(token);
        self
    }
}

impl From<&AppConfig> for ClientSettings {
    fn from(config: &AppConfig) -> Self {
        Self {
            provider: config.provider.clone(),
            model: config.model.clone(),
            endpoint: config.endpoint.clone(),
            api_token: config.api_token.clone(),
            timeout_secs: config.timeout_secs,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_provider_type_parsing() {
        assert_eq!(ProviderType::parse("huggingface"), Some(ProviderType::HuggingFace));
        assert_eq!(ProviderType::parse("HF"), Some(ProviderType::HuggingFace));
        assert_eq!(ProviderType::parse("ollama"), Some(ProviderType::Ollama));
        assert_eq!(ProviderType::parse("openai"), None);
        assert_eq!(ProviderType::Ollama.as_str(), "ollama");
    }

    #[test]
    fn test_settings_from_app_config() {
        let mut config = AppConfig::default();
        config.api_token = Some(ApiToken::new("hf_x"));
        config.timeout_secs = Some(30);

        let settings = ClientSettings::from(&config);
        assert_eq!(settings.provider, "huggingface");
        assert_eq!(settings.model, config.model);
        assert_eq!(settings.timeout_secs, Some(30));
        assert!(settings.api_token.is_some());
    }
}
