//! Answer synthesis: prompt construction, generation, source attribution.

use crate::rag::context::{AssembledContext, CitationSet, NormalizedSource};
use crate::rag::types::SOURCES_MARKER;
use ragnarok_llm::{LlmClient, LlmError, LlmRequest};
use ragnarok_prompt::{build_prompt, PromptDefinition, PromptRecord};
use std::sync::Arc;

/// Assistant identity used in the answer prompt.
pub const ASSISTANT_NAME: &str = "RAGnarok";

const ANSWER_INSTRUCTIONS: [&str; 3] = [
    "Your goal is to provide concise, accurate, and conversational answers to the user's question based ONLY on the provided context.",
    "If the answer cannot be found in the provided context, state that you don't know or that the information is not available in the knowledge base.",
    "Always include the source URL(s) from the context at the end of your answer, formatted as markdown links. If the source is a local file, state \"Source: [Filename]\".",
];

const ANSWER_MAX_TOKENS: u32 = 500;
const ANSWER_TEMPERATURE: f32 = 0.7;
const ANSWER_TOP_P: f32 = 0.9;

/// Builds the answer prompt and calls the generation model.
pub struct AnswerSynthesizer {
    client: Arc<dyn LlmClient>,
    definition: PromptDefinition,
    knowledge_base_name: String,
}

impl AnswerSynthesizer {
    pub fn new(
        client: Arc<dyn LlmClient>,
        definition: PromptDefinition,
        knowledge_base_name: impl Into<String>,
    ) -> Self {
        Self {
            client,
            definition,
            knowledge_base_name: knowledge_base_name.into(),
        }
    }

    /// Answer `question` from `context`.
    ///
    /// Returns `(answer_text, citations)`. Failures become a diagnostic
    /// answer with no citations; this never returns an error.
    pub async fn synthesize(&self, question: &str, context: &AssembledContext) -> (String, Vec<String>) {
        let record = ANSWER_INSTRUCTIONS
            .iter()
            .fold(PromptRecord::new(question).with_role(ASSISTANT_NAME), |record, line| {
                record.with_instruction(*line)
            })
            .with_context(&self.knowledge_base_name, &context.text);

        let prompt = match build_prompt(&self.definition, &record) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Could not build answer prompt: {}", e);
                return (format!("Could not build the answer prompt: {}", e), Vec::new());
            }
        };

        tracing::debug!(chars = prompt.text.len(), "Answer prompt built");

        let request = LlmRequest::new(prompt.text)
            .with_max_tokens(ANSWER_MAX_TOKENS)
            .with_temperature(ANSWER_TEMPERATURE)
            .with_top_p(ANSWER_TOP_P)
            .with_sampling(true);

        match self.client.complete(&request).await {
            Ok(response) => {
                let mut answer = response.content.trim().to_string();
                if let Some(section) = sources_section(&context.citations) {
                    answer.push_str(&section);
                }
                (answer, context.citations.urls())
            }
            Err(e) => {
                tracing::warn!("Answer generation failed: {}", e);
                (failure_message(&e), Vec::new())
            }
        }
    }
}

/// The `**Sources:**` block appended to a successful answer.
pub fn sources_section(citations: &CitationSet) -> Option<String> {
    if citations.is_empty() {
        return None;
    }

    let lines: Vec<String> = citations
        .entries()
        .iter()
        .filter_map(|source| match source {
            NormalizedSource::Url(url) => Some(format!("- [{}]({})", url, url)),
            NormalizedSource::LocalFile(_) => Some(format!("- {}", source.display())),
            NormalizedSource::Unattributed(_) => None,
        })
        .collect();

    Some(format!("\n\n{}\n{}", SOURCES_MARKER, lines.join("\n")))
}

/// User-facing text for a failed generation call.
pub fn failure_message(err: &LlmError) -> String {
    match err {
        LlmError::Transport(cause) => {
            format!("An HTTP error occurred with the generation API: {}", cause)
        }
        LlmError::Status { status, body } => format!(
            "An HTTP error occurred with the generation API: status {}. Response: {}",
            status, body
        ),
        LlmError::Decode { message, body } => format!(
            "Error decoding JSON from the generation API response: {}. Response: {}",
            message, body
        ),
        LlmError::UnexpectedResponse(body) => {
            format!("Received unexpected response from the generation API: {}", body)
        }
        LlmError::Config(cause) => format!("The generation client is misconfigured: {}", cause),
    }
}
