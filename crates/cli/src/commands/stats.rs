//! Stats command handler.

use crate::commands::print_json;
use clap::Args;
use ragnarok_core::{config::AppConfig, AppResult};
use ragnarok_knowledge::open_store;

/// Show knowledge base statistics
#[derive(Args, Debug)]
pub struct StatsCommand {
    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl StatsCommand {
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing stats command");

        let (store, report) = open_store(config).await?;
        let stats = store.stats();

        if self.json {
            return print_json(&serde_json::json!({
                "knowledgeBase": config.retrieval.knowledge_base_name,
                "collection": stats,
                "loadSeconds": report.duration_secs,
            }));
        }

        println!("Knowledge base:  {}", config.retrieval.knowledge_base_name);
        println!("Collection:      {}", stats.collection_name);
        println!("Corpus:          {}", stats.corpus_path.display());
        println!("Documents:       {}", stats.document_count);
        println!(
            "Embeddings:      {} ({}, {} dims)",
            stats.embedding_provider, stats.embedding_model, stats.dimensions
        );
        println!("Load time:       {:.2}s", report.duration_secs);

        Ok(())
    }
}
