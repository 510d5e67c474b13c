//! Ask command handler.
//!
//! Answers one question against the knowledge base.

use crate::commands::print_json;
use clap::Args;
use ragnarok_core::{config::AppConfig, AppError, AppResult};
use ragnarok_knowledge::{build_pipeline, open_store};

/// Answer a single question
#[derive(Args, Debug)]
pub struct AskCommand {
    /// The question to ask
    pub question: String,

    /// Number of documents to retrieve (default: from config)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

impl AskCommand {
    /// Execute the ask command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing ask command");
        tracing::debug!("Ask command options: {:?}", self);

        let question = self.question.trim();
        if question.is_empty() {
            return Err(AppError::Config("No question provided".to_string()));
        }

        let mut config = config.clone();
        if let Some(k) = self.top_k {
            config.retrieval.n_results = k;
        }
        config.validate()?;

        let (store, report) = open_store(&config).await?;
        tracing::debug!(
            "Knowledge base ready: {} documents in {:.2}s",
            report.documents_loaded,
            report.duration_secs
        );

        let mut pipeline = build_pipeline(&config, store)?;
        let answer = pipeline.answer(question, &[]).await;

        if self.json {
            print_json(&serde_json::json!({
                "answer": answer.answer,
                "citations": answer.citations,
                "effectiveQuery": answer.effective_query,
                "rewritten": answer.rewritten,
                "documentsUsed": answer.documents_used,
                "provider": config.provider,
                "model": config.model,
            }))?;
        } else {
            println!("{}", answer.answer);
        }

        Ok(())
    }
}
