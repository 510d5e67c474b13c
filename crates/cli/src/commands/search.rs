//! Search command handler.
//!
//! Runs retrieval only; no generation client is created, so no token is
//! needed with the offline embedder.

use crate::commands::print_json;
use clap::Args;
use ragnarok_core::{config::AppConfig, AppError, AppResult};
use ragnarok_knowledge::open_store;

/// Show the documents retrieved for a query, without generation
#[derive(Args, Debug)]
pub struct SearchCommand {
    /// Query text
    pub query: String,

    /// Number of documents to return (default: from config)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl SearchCommand {
    /// Execute the search command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing search command");

        let query = self.query.trim();
        if query.is_empty() {
            return Err(AppError::Config("No query provided".to_string()));
        }

        let (store, _) = open_store(config).await?;
        let k = self.top_k.unwrap_or(config.retrieval.n_results);
        let results = store.query(query, k).await?;

        if self.json {
            let hits: Vec<_> = results
                .iter()
                .map(|r| {
                    serde_json::json!({
                        "rank": r.rank,
                        "score": r.score,
                        "id": r.document.id,
                        "title": r.document.title,
                        "source": r.document.source,
                    })
                })
                .collect();
            return print_json(&serde_json::json!({ "query": query, "results": hits }));
        }

        if results.is_empty() {
            println!("No documents matched.");
            return Ok(());
        }

        for r in &results {
            println!("{}. {} ({:.3})", r.rank, r.document.title, r.score);
            println!("   {}", r.document.source);
        }

        Ok(())
    }
}
