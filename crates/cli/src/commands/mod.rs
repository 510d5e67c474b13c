//! Command handlers for the RAGnarok CLI.
//!
//! This module organizes all CLI commands into separate submodules.

pub mod ask;
pub mod chat;
pub mod search;
pub mod stats;

// Re-export command types for convenience
pub use ask::AskCommand;
pub use chat::ChatCommand;
pub use search::SearchCommand;
pub use stats::StatsCommand;

use ragnarok_core::{AppError, AppResult};

/// Pretty-print a JSON value to stdout.
pub(crate) fn print_json(value: &serde_json::Value) -> AppResult<()> {
    let json = serde_json::to_string_pretty(value)
        .map_err(|e| AppError::Serialization(e.to_string()))?;
    println!("{}", json);
    Ok(())
}
