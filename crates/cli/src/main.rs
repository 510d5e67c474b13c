//! RAGnarok CLI
//!
//! Main entry point for the `ragnarok` command-line tool.
//! Answers questions against a local knowledge base with a remote LLM.

mod commands;

use clap::{Parser, Subcommand};
use commands::{AskCommand, ChatCommand, SearchCommand, StatsCommand};
use ragnarok_core::{config::AppConfig, logging, AppResult};
use std::path::PathBuf;

/// RAGnarok - retrieval-augmented answers from your knowledge base
#[derive(Parser, Debug)]
#[command(name = "ragnarok")]
#[command(about = "Retrieval-augmented answers from a local knowledge base", long_about = None)]
#[command(version)]
struct Cli {
    /// Path to workspace directory (default: current directory)
    #[arg(short, long, global = true, env = "RAGNAROK_WORKSPACE")]
    workspace: Option<PathBuf>,

    /// Path to config file
    #[arg(short, long, global = true, env = "RAGNAROK_CONFIG")]
    config: Option<PathBuf>,

    /// Log level (error, warn, info, debug, trace)
    #[arg(long, global = true, env = "RUST_LOG")]
    log_level: Option<String>,

    /// Enable verbose output (sets log level to debug)
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Disable colored output
    #[arg(long, global = true, env = "NO_COLOR")]
    no_color: bool,

    /// Generation provider (huggingface, ollama)
    #[arg(short, long, global = true, env = "RAGNAROK_PROVIDER")]
    provider: Option<String>,

    /// Model identifier
    #[arg(short, long, global = true, env = "RAGNAROK_MODEL")]
    model: Option<String>,

    /// Corpus file or directory
    #[arg(long, global = true, env = "RAGNAROK_CORPUS")]
    corpus: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Answer a single question
    Ask(AskCommand),

    /// Interactive conversation with follow-up questions
    Chat(ChatCommand),

    /// Show the documents retrieved for a query, without generation
    Search(SearchCommand),

    /// Show knowledge base statistics
    Stats(StatsCommand),
}

#[tokio::main]
async fn main() -> AppResult<()> {
    // Parse command-line arguments first (needed for logging config)
    let cli = Cli::parse();

    // Workspace and config file must be known before the YAML is read
    let config = AppConfig::load_with(cli.workspace.clone(), cli.config.clone())?;

    // Apply CLI overrides
    let config = config.with_overrides(
        cli.workspace,
        cli.config,
        cli.provider,
        cli.model,
        cli.corpus,
        cli.log_level,
        cli.verbose,
        cli.no_color,
    );

    // Initialize logging with final configuration
    logging::init_logging(config.log_level.as_deref(), config.no_color)?;

    tracing::info!("RAGnarok starting");
    tracing::debug!("Workspace: {:?}", config.workspace);
    tracing::debug!("Provider: {}", config.provider);
    tracing::debug!("Model: {}", config.model);
    tracing::debug!("Corpus: {:?}", config.corpus_path());

    let command_name = match &cli.command {
        Commands::Ask(_) => "ask",
        Commands::Chat(_) => "chat",
        Commands::Search(_) => "search",
        Commands::Stats(_) => "stats",
    };
    let _span = tracing::info_span!("command", name = command_name).entered();

    // Route to command handlers
    let result = match cli.command {
        Commands::Ask(cmd) => cmd.execute(&config).await,
        Commands::Chat(cmd) => cmd.execute(&config).await,
        Commands::Search(cmd) => cmd.execute(&config).await,
        Commands::Stats(cmd) => cmd.execute(&config).await,
    };

    match &result {
        Ok(_) => tracing::info!("Command completed successfully"),
        Err(e) => tracing::error!("Command failed: {}", e),
    }

    result
}
