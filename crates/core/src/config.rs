//! Configuration management for RAGnarok.
//!
//! This module handles loading and merging configuration from multiple sources:
//! - Built-in defaults
//! - Config file (.ragnarok/config.yaml)
//! - Environment variables
//! - Command-line flags
//!
//! Later sources win. The workspace directory anchors relative paths such as
//! the corpus location.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{AppError, AppResult};
use crate::secret::ApiToken;

/// Environment variable holding the inference API token by default.
pub const DEFAULT_TOKEN_ENV: &str = "HF_API_TOKEN";

/// Generation providers the LLM factory knows how to build.
pub const KNOWN_PROVIDERS: [&str; 2] = ["huggingface", "ollama"];

/// Embedding providers the embedding factory knows how to build.
pub const KNOWN_EMBEDDING_PROVIDERS: [&str; 2] = ["trigram", "huggingface"];

/// Main application configuration.
#[derive(Debug, Clone)]
pub struct AppConfig {
    /// Path to the workspace root (contains .ragnarok/)
    pub workspace: PathBuf,

    /// Optional config file path
    pub config_file: Option<PathBuf>,

    /// Generation provider ("huggingface" or "ollama")
    pub provider: String,

    /// Generation model identifier
    pub model: String,

    /// Custom generation endpoint; providers derive one from the model when unset
    pub endpoint: Option<String>,

    /// Bearer token for the inference API
    pub api_token: Option<ApiToken>,

    /// Environment variable the token is read from
    pub token_env: String,

    /// Optional HTTP timeout in seconds (transport default when unset)
    pub timeout_secs: Option<u64>,

    /// Corpus and retrieval settings
    pub retrieval: RetrievalSettings,

    /// Embedding backend settings
    pub embedding: EmbeddingSettings,

    /// Log level override
    pub log_level: Option<String>,

    /// Verbose mode (enables debug logging)
    pub verbose: bool,

    /// Disable colored output
    pub no_color: bool,
}

/// Corpus location and retrieval behavior.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct RetrievalSettings {
    /// Corpus directory or file, relative paths resolve against the workspace
    pub corpus_path: PathBuf,

    /// Name of the in-memory collection
    pub collection_name: String,

    /// Human-readable knowledge base name used in prompts and messages
    pub knowledge_base_name: String,

    /// Number of documents retrieved per question
    pub n_results: usize,

    /// File extensions picked up when the corpus path is a directory
    pub extensions: Vec<String>,
}

impl Default for RetrievalSettings {
    fn default() -> Self {
        Self {
            corpus_path: PathBuf::from("data"),
            collection_name: "lightcast_kb_collection".to_string(),
            knowledge_base_name: "Lightcast Knowledge Base".to_string(),
            n_results: 1,
            extensions: vec!["txt".to_string()],
        }
    }
}

/// Embedding backend selection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default, rename_all = "camelCase")]
pub struct EmbeddingSettings {
    /// "trigram" (offline) or "huggingface" (feature-extraction API)
    pub provider: String,

    /// Model identifier for remote providers
    pub model: String,

    /// Embedding vector dimensions
    pub dimensions: usize,

    /// Texts per embedding request during initialization
    pub batch_size: usize,

    /// Custom embedding endpoint
    pub endpoint: Option<String>,
}

impl Default for EmbeddingSettings {
    fn default() -> Self {
        Self {
            provider: "trigram".to_string(),
            model: "sentence-transformers/all-MiniLM-L6-v2".to_string(),
            dimensions: 384,
            batch_size: 100,
            endpoint: None,
        }
    }
}

/// Full configuration file structure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
struct ConfigFile {
    llm: Option<LlmSection>,
    retrieval: Option<RetrievalSettings>,
    embedding: Option<EmbeddingSettings>,
    workspace: Option<WorkspaceSection>,
    logging: Option<LoggingSection>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct LlmSection {
    provider: Option<String>,
    model: Option<String>,
    endpoint: Option<String>,
    timeout: Option<u64>,
    api_token_env: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct WorkspaceSection {
    path: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct LoggingSection {
    level: Option<String>,
    color: Option<bool>,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            workspace: std::env::current_dir().unwrap_or_else(|_| PathBuf::from(".")),
            config_file: None,
            provider: "huggingface".to_string(),
            model: "mistralai/Mistral-7B-Instruct-v0.3".to_string(),
            endpoint: None,
            api_token: None,
            token_env: DEFAULT_TOKEN_ENV.to_string(),
            timeout_secs: None,
            retrieval: RetrievalSettings::default(),
            embedding: EmbeddingSettings::default(),
            log_level: None,
            verbose: false,
            no_color: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from defaults, the YAML file and the environment.
    ///
    /// Environment variables:
    /// - `RAGNAROK_WORKSPACE`: Override workspace path
    /// - `RAGNAROK_CONFIG`: Path to config file
    /// - `RAGNAROK_PROVIDER`: Generation provider
    /// - `RAGNAROK_MODEL`: Generation model identifier
    /// - `RAGNAROK_CORPUS`: Corpus directory or file
    /// - `HF_API_TOKEN` (or the configured `apiTokenEnv`): API token
    /// - `RUST_LOG`: Log level
    /// - `NO_COLOR`: Disable colored output
    ///
    /// # Example
    /// ```no_run
    /// use ragnarok_core::config::AppConfig;
    ///
    /// let config = AppConfig::load().expect("Failed to load config");
    /// println!("Corpus: {:?}", config.corpus_path());
    /// ```
    pub fn load() -> AppResult<Self> {
        Self::load_with(None, None)
    }

    /// Like [`load`](Self::load), with workspace and config file paths that
    /// take precedence over `RAGNAROK_WORKSPACE` and `RAGNAROK_CONFIG`.
    pub fn load_with(workspace: Option<PathBuf>, config_file: Option<PathBuf>) -> AppResult<Self> {
        let mut config = Self::default();

        if let Some(workspace) =
            workspace.or_else(|| std::env::var("RAGNAROK_WORKSPACE").ok().map(PathBuf::from))
        {
            config.workspace = workspace;
        }

        if let Some(config_file) =
            config_file.or_else(|| std::env::var("RAGNAROK_CONFIG").ok().map(PathBuf::from))
        {
            config.config_file = Some(config_file);
        }

        if !config.workspace.exists() {
            return Err(AppError::Config(format!(
                "Workspace directory does not exist: {:?}",
                config.workspace
            )));
        }

        let config_path = config
            .config_file
            .clone()
            .unwrap_or_else(|| config.ragnarok_dir().join("config.yaml"));

        if config_path.exists() {
            config = config.merge_yaml(&config_path)?;
        }

        // Environment variables override YAML config
        if let Ok(provider) = std::env::var("RAGNAROK_PROVIDER") {
            config.provider = provider;
        }

        if let Ok(model) = std::env::var("RAGNAROK_MODEL") {
            config.model = model;
        }

        if let Ok(corpus) = std::env::var("RAGNAROK_CORPUS") {
            config.retrieval.corpus_path = PathBuf::from(corpus);
        }

        config.api_token =
            ApiToken::from_env("RAGNAROK_API_TOKEN").or_else(|| ApiToken::from_env(&config.token_env));

        if let Ok(level) = std::env::var("RUST_LOG") {
            config.log_level = Some(level);
        }

        if std::env::var("NO_COLOR").is_ok() {
            config.no_color = true;
        }

        Ok(config)
    }

    /// Merge a YAML configuration file into this config.
    fn merge_yaml(mut self, path: &Path) -> AppResult<Self> {
        let contents = std::fs::read_to_string(path).map_err(|e| {
            AppError::Config(format!("Failed to read config file {:?}: {}", path, e))
        })?;

        let file: ConfigFile = serde_yaml::from_str(&contents).map_err(|e| {
            AppError::Config(format!("Failed to parse config file {:?}: {}", path, e))
        })?;

        if let Some(path) = file.workspace.and_then(|ws| ws.path) {
            self.workspace = PathBuf::from(path);
        }

        if let Some(logging) = file.logging {
            if let Some(level) = logging.level {
                self.log_level = Some(level);
            }
            if let Some(color) = logging.color {
                self.no_color = !color;
            }
        }

        if let Some(llm) = file.llm {
            if let Some(provider) = llm.provider {
                self.provider = provider;
            }
            if let Some(model) = llm.model {
                self.model = model;
            }
            if llm.endpoint.is_some() {
                self.endpoint = llm.endpoint;
            }
            if llm.timeout.is_some() {
                self.timeout_secs = llm.timeout;
            }
            if let Some(env) = llm.api_token_env {
                self.token_env = env;
            }
        }

        if let Some(retrieval) = file.retrieval {
            self.retrieval = retrieval;
        }

        if let Some(embedding) = file.embedding {
            self.embedding = embedding;
        }

        tracing::debug!("Merged config file {:?}", path);
        Ok(self)
    }

    /// Apply CLI overrides to the configuration.
    ///
    /// CLI flags take precedence over environment variables and the config file.
    #[allow(clippy::too_many_arguments)]
    pub fn with_overrides(
        mut self,
        workspace: Option<PathBuf>,
        config_file: Option<PathBuf>,
        provider: Option<String>,
        model: Option<String>,
        corpus: Option<PathBuf>,
        log_level: Option<String>,
        verbose: bool,
        no_color: bool,
    ) -> Self {
        if let Some(workspace) = workspace {
            self.workspace = workspace;
        }

        if let Some(config_file) = config_file {
            self.config_file = Some(config_file);
        }

        if let Some(provider) = provider {
            self.provider = provider;
        }

        if let Some(model) = model {
            self.model = model;
        }

        if let Some(corpus) = corpus {
            self.retrieval.corpus_path = corpus;
        }

        if let Some(log_level) = log_level {
            self.log_level = Some(log_level);
        }

        if verbose {
            self.verbose = true;
            if self.log_level.is_none() {
                self.log_level = Some("debug".to_string());
            }
        }

        if no_color {
            self.no_color = true;
        }

        self
    }

    /// Get the path to the .ragnarok directory.
    pub fn ragnarok_dir(&self) -> PathBuf {
        self.workspace.join(".ragnarok")
    }

    /// Resolve the corpus location against the workspace.
    pub fn corpus_path(&self) -> PathBuf {
        if self.retrieval.corpus_path.is_absolute() {
            self.retrieval.corpus_path.clone()
        } else {
            self.workspace.join(&self.retrieval.corpus_path)
        }
    }

    /// Validate configuration for the active providers.
    pub fn validate(&self) -> AppResult<()> {
        if !KNOWN_PROVIDERS.contains(&self.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown provider: {}. Supported: {}",
                self.provider,
                KNOWN_PROVIDERS.join(", ")
            )));
        }

        if self.provider == "huggingface" && self.api_token.is_none() {
            return Err(AppError::Config(format!(
                "API token not found in environment variable: {}",
                self.token_env
            )));
        }

        if !KNOWN_EMBEDDING_PROVIDERS.contains(&self.embedding.provider.as_str()) {
            return Err(AppError::Config(format!(
                "Unknown embedding provider: {}. Supported: {}",
                self.embedding.provider,
                KNOWN_EMBEDDING_PROVIDERS.join(", ")
            )));
        }

        if self.embedding.dimensions == 0 || self.embedding.batch_size == 0 {
            return Err(AppError::Config(
                "Embedding dimensions and batch size must be positive".to_string(),
            ));
        }

        if self.retrieval.n_results == 0 {
            return Err(AppError::Config("nResults must be at least 1".to_string()));
        }

        Ok(())
    }
}
