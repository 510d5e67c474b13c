//! Chat command handler.
//!
//! Reads questions from stdin and keeps the conversation in memory so
//! follow-ups are rewritten against the previous exchange.

use clap::Args;
use ragnarok_core::{config::AppConfig, AppResult};
use ragnarok_knowledge::{build_pipeline, open_store, Conversation};
use std::io::Write;
use tokio::io::{AsyncBufReadExt, BufReader};

/// Interactive conversation with follow-up questions
#[derive(Args, Debug)]
pub struct ChatCommand {
    /// Number of documents to retrieve per question (default: from config)
    #[arg(short = 'k', long)]
    pub top_k: Option<usize>,

    /// Print the query used for retrieval after each answer
    #[arg(long)]
    pub show_query: bool,
}

impl ChatCommand {
    /// Execute the chat command.
    pub async fn execute(&self, config: &AppConfig) -> AppResult<()> {
        tracing::info!("Executing chat command");

        let mut config = config.clone();
        if let Some(k) = self.top_k {
            config.retrieval.n_results = k;
        }
        config.validate()?;

        let (store, report) = open_store(&config).await?;
        let mut pipeline = build_pipeline(&config, store)?;
        let mut conversation = Conversation::new();

        let started = chrono::Local::now();
        tracing::info!(session = %started.format("%Y-%m-%dT%H:%M:%S"), "Chat session started");

        println!(
            "RAGnarok ready: {} documents from the {}. Type 'exit' to quit.",
            report.documents_loaded, config.retrieval.knowledge_base_name
        );

        let mut lines = BufReader::new(tokio::io::stdin()).lines();
        loop {
            print!("> ");
            std::io::stdout().flush()?;

            let Some(line) = lines.next_line().await? else {
                break;
            };
            let question = line.trim();
            if question.is_empty() {
                continue;
            }
            if question.eq_ignore_ascii_case("exit") || question.eq_ignore_ascii_case("quit") {
                break;
            }

            let answer = conversation.ask(&mut pipeline, question).await;
            println!("\n{}\n", answer.answer);

            if self.show_query && answer.rewritten {
                println!("(searched for: {})\n", answer.effective_query);
            }
        }

        let elapsed = chrono::Local::now() - started;
        tracing::info!(
            turns = conversation.len(),
            seconds = elapsed.num_seconds(),
            "Chat session ended"
        );

        Ok(())
    }
}
