//! Pipeline orchestration: rewrite, retrieve, assemble, synthesize.

use crate::rag::context::assemble_context;
use crate::rag::rewrite::QueryRewriter;
use crate::rag::synth::AnswerSynthesizer;
use crate::rag::types::{ConversationTurn, RagAnswer};
use crate::store::RetrievalStore;
use ragnarok_core::{AppConfig, AppResult};
use ragnarok_llm::LlmClient;
use ragnarok_prompt::{resolve_prompt, PromptDefinition, QUERY_REWRITE_PROMPT_ID, RAG_ANSWER_PROMPT_ID};
use std::sync::Arc;

/// Message returned when retrieval finds nothing.
pub fn no_relevant_information(knowledge_base_name: &str) -> String {
    format!(
        "No relevant information found in the {} for your query. Please try rephrasing.",
        knowledge_base_name
    )
}

/// Message returned when retrieval fails.
pub fn search_failed(cause: &str) -> String {
    format!("Could not search the knowledge base: {}", cause)
}

/// Orchestrator state.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelineState {
    Idle,
    Processing,
}

/// Tunables for one pipeline.
#[derive(Debug, Clone)]
pub struct PipelineOptions {
    /// Documents retrieved per question
    pub n_results: usize,

    /// Name used in prompts and the empty-result message
    pub knowledge_base_name: String,
}

impl Default for PipelineOptions {
    fn default() -> Self {
        Self {
            n_results: 1,
            knowledge_base_name: "Lightcast Knowledge Base".to_string(),
        }
    }
}

/// Prompt definitions used by the pipeline.
#[derive(Debug, Clone)]
pub struct PipelinePrompts {
    pub answer: PromptDefinition,
    pub rewrite: PromptDefinition,
}

impl PipelinePrompts {
    /// Workspace overrides, falling back to the built-in definitions.
    pub fn resolve(config: &AppConfig) -> AppResult<Self> {
        Ok(Self {
            answer: resolve_prompt(&config.workspace, RAG_ANSWER_PROMPT_ID)?,
            rewrite: resolve_prompt(&config.workspace, QUERY_REWRITE_PROMPT_ID)?,
        })
    }
}

/// The answer pipeline.
///
/// `answer` takes `&mut self`, so a pipeline handles one question at a time.
pub struct RagPipeline {
    store: RetrievalStore,
    rewriter: QueryRewriter,
    synthesizer: AnswerSynthesizer,
    options: PipelineOptions,
    state: PipelineState,
}

impl RagPipeline {
    pub fn new(
        store: RetrievalStore,
        client: Arc<dyn LlmClient>,
        prompts: PipelinePrompts,
        options: PipelineOptions,
    ) -> Self {
        let rewriter = QueryRewriter::new(Arc::clone(&client), prompts.rewrite);
        let synthesizer =
            AnswerSynthesizer::new(client, prompts.answer, options.knowledge_base_name.clone());

        Self {
            store,
            rewriter,
            synthesizer,
            options,
            state: PipelineState::Idle,
        }
    }

    /// Build a pipeline from configuration, resolving prompt overrides.
    pub fn from_config(
        config: &AppConfig,
        store: RetrievalStore,
        client: Arc<dyn LlmClient>,
    ) -> AppResult<Self> {
        let options = PipelineOptions {
            n_results: config.retrieval.n_results,
            knowledge_base_name: config.retrieval.knowledge_base_name.clone(),
        };
        Ok(Self::new(store, client, PipelinePrompts::resolve(config)?, options))
    }

    pub fn state(&self) -> PipelineState {
        self.state
    }

    pub fn store(&self) -> &RetrievalStore {
        &self.store
    }

    pub fn options(&self) -> &PipelineOptions {
        &self.options
    }

    /// Answer `question` given the prior conversation.
    ///
    /// Failures are folded into the answer text; this never returns an error.
    pub async fn answer(&mut self, question: &str, history: &[ConversationTurn]) -> RagAnswer {
        self.state = PipelineState::Processing;
        let answer = self.run(question, history).await;
        self.state = PipelineState::Idle;
        answer
    }

    async fn run(&self, question: &str, history: &[ConversationTurn]) -> RagAnswer {
        tracing::info!(history = history.len(), "Answering question");

        let rewrite = self.rewriter.rewrite(question, history).await;

        let results = match self.store.query(&rewrite.query, self.options.n_results).await {
            Ok(results) => results,
            Err(e) => {
                tracing::warn!("Retrieval failed: {}", e);
                return RagAnswer::uncited(search_failed(&e.to_string()), rewrite.query, rewrite.rewritten);
            }
        };

        if results.is_empty() {
            tracing::info!("No documents retrieved");
            return RagAnswer::uncited(
                no_relevant_information(&self.options.knowledge_base_name),
                rewrite.query,
                rewrite.rewritten,
            );
        }

        let context = assemble_context(&results);
        tracing::info!(
            documents = context.document_count,
            citations = context.citations.len(),
            "Synthesizing answer"
        );

        let (answer, citations) = self.synthesizer.synthesize(question, &context).await;

        RagAnswer {
            answer,
            citations,
            effective_query: rewrite.query,
            rewritten: rewrite.rewritten,
            documents_used: context.document_count,
        }
    }
}
