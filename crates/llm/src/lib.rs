//! Text generation clients for RAGnarok.
//!
//! A provider-agnostic [`LlmClient`] trait with two implementations:
//!
//! - **Hugging Face**: hosted Inference API (default)
//! - **Ollama**: local runtime
//!
//! # Example
//! ```no_run
//! use ragnarok_core::ApiToken;
//! use ragnarok_llm::{LlmClient, LlmRequest, providers::HuggingFaceClient};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = HuggingFaceClient::new("mistralai/Mistral-7B-Instruct-v0.3", ApiToken::new("hf_..."));
//! let request = LlmRequest::new("What is Lightcast?").with_max_tokens(100);
//! let response = client.complete(&request).await?;
//! println!("{}", response.content);
//! # Ok(())
//! # }
//! ```

pub mod client;
pub mod error;
pub mod factory;
pub mod providers;
pub mod types;

pub use client::{GenerationParams, LlmClient, LlmRequest, LlmResponse};
pub use error::LlmError;
pub use factory::create_client;
pub use providers::{HuggingFaceClient, OllamaClient};
pub use types::{ClientSettings, ProviderType};
