//! RAGnarok Core Library
//!
//! This crate provides the foundational utilities shared by every RAGnarok crate:
//! - Error handling (`AppError`, `AppResult`)
//! - Logging infrastructure
//! - Configuration management
//! - Credential handling (`ApiToken`)

pub mod config;
pub mod error;
pub mod logging;
pub mod secret;

// Re-export commonly used types
pub use config::AppConfig;
pub use error::{AppError, AppResult};
pub use secret::ApiToken;
