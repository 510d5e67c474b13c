//! Error types for RAGnarok.
//!
//! This module defines a unified error enum covering every failure category
//! in the answer pipeline: corpus loading, retrieval, query rewriting and
//! answer generation, plus the ambient configuration, I/O, prompt and
//! serialization errors.

use thiserror::Error;

/// Unified error type for RAGnarok.
///
/// Only `Load` is allowed to abort the process. Per-question failures
/// (`Retrieval`, `Rewrite`, `Generation`) are recovered inside the pipeline
/// and degraded to a displayable answer.
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration-related errors
    #[error("Configuration error: {0}")]
    Config(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Corpus unreadable, missing or empty
    #[error("Load error: {0}")]
    Load(String),

    /// Embedding or index lookup failure
    #[error("Retrieval error: {0}")]
    Retrieval(String),

    /// Remote call failure while rewriting a follow-up question
    #[error("Rewrite error: {0}")]
    Rewrite(String),

    /// Remote call failure or malformed response while generating an answer
    #[error("Generation error: {0}")]
    Generation(String),

    /// Prompt definition and rendering errors
    #[error("Prompt error: {0}")]
    Prompt(String),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl AppError {
    /// Whether this error must abort the process rather than a single turn.
    pub fn is_fatal(&self) -> bool {
        matches!(self, AppError::Load(_) | AppError::Config(_))
    }
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;
