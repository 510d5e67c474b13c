//! Generation provider implementations.

pub mod huggingface;
pub mod ollama;

pub use huggingface::HuggingFaceClient;
pub use ollama::OllamaClient;
