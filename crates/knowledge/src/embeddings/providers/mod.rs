//! Embedding provider implementations.

pub mod huggingface;
pub mod trigram;
