//! Embedding functions for the retrieval store.
//!
//! The store treats an embedder as a black box: text in, fixed-length
//! vector out.

pub mod provider;
pub mod providers;

pub use provider::{create_provider, EmbeddingProvider};
