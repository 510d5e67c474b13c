//! Follow-up question rewriting.
//!
//! Turns "Who maintains it?" into a standalone question using the most
//! recent exchange, so retrieval does not depend on conversation state.

use crate::rag::types::{ConversationTurn, Role, SOURCES_MARKER};
use ragnarok_core::AppError;
use ragnarok_llm::{LlmClient, LlmRequest};
use ragnarok_prompt::{build_prompt, PromptDefinition, PromptRecord};
use std::sync::Arc;

const REWRITE_INSTRUCTIONS: [&str; 2] = [
    "Given the following conversation history and a follow-up question, rewrite the follow-up question to be a standalone question.",
    "The rewritten question should be clear and understandable without needing the previous context.",
];

const ANSWER_LABEL: &str = "Rewritten Standalone Question:";

/// Generation settings for rewriting: short and near-deterministic.
const REWRITE_MAX_TOKENS: u32 = 100;
const REWRITE_TEMPERATURE: f32 = 0.1;

/// Query actually used for retrieval.
#[derive(Debug, Clone, PartialEq)]
pub struct RewriteOutcome {
    pub query: String,
    pub rewritten: bool,
}

impl RewriteOutcome {
    fn unchanged(query: &str) -> Self {
        Self {
            query: query.to_string(),
            rewritten: false,
        }
    }
}

/// Rewrites follow-up questions through the generation model.
pub struct QueryRewriter {
    client: Arc<dyn LlmClient>,
    definition: PromptDefinition,
}

impl QueryRewriter {
    pub fn new(client: Arc<dyn LlmClient>, definition: PromptDefinition) -> Self {
        Self { client, definition }
    }

    /// Produce a standalone query, or return `query` unchanged.
    ///
    /// Never fails: without a prior user and assistant turn the query is
    /// returned as-is, and any model failure falls back to it.
    pub async fn rewrite(&self, query: &str, history: &[ConversationTurn]) -> RewriteOutcome {
        let Some((last_user, last_assistant)) = last_exchange(history) else {
            tracing::debug!("No complete exchange in history; skipping rewrite");
            return RewriteOutcome::unchanged(query);
        };

        let record = REWRITE_INSTRUCTIONS
            .iter()
            .fold(PromptRecord::new(query), |record, line| record.with_instruction(*line))
            .with_exchange(last_user, strip_sources(last_assistant));

        let prompt = match build_prompt(&self.definition, &record) {
            Ok(prompt) => prompt,
            Err(e) => {
                tracing::warn!("Query rewrite skipped: {}", e);
                return RewriteOutcome::unchanged(query);
            }
        };

        let request = LlmRequest::new(prompt.text)
            .with_max_tokens(REWRITE_MAX_TOKENS)
            .with_temperature(REWRITE_TEMPERATURE)
            .with_sampling(false);

        match self.client.complete(&request).await {
            Ok(response) => match clean_rewrite(&response.content) {
                Some(rewritten) => {
                    tracing::info!("Rewrote query: '{}' -> '{}'", query, rewritten);
                    RewriteOutcome {
                        query: rewritten,
                        rewritten: true,
                    }
                }
                None => {
                    tracing::warn!("Query rewrite returned no text; using original query");
                    RewriteOutcome::unchanged(query)
                }
            },
            Err(e) => {
                let err = AppError::Rewrite(e.to_string());
                tracing::warn!("{}; using original query", err);
                RewriteOutcome::unchanged(query)
            }
        }
    }
}

/// Most recent user turn and most recent assistant turn, scanning from the end.
pub fn last_exchange(history: &[ConversationTurn]) -> Option<(&str, &str)> {
    let last_of = |role: Role| {
        history
            .iter()
            .rev()
            .find(|turn| turn.role == role)
            .map(|turn| turn.content.as_str())
    };

    Some((last_of(Role::User)?, last_of(Role::Assistant)?))
}

/// Drop the appended citation block from an assistant message.
pub fn strip_sources(message: &str) -> &str {
    message
        .split(SOURCES_MARKER)
        .next()
        .unwrap_or(message)
        .trim()
}

/// Trim model output and drop a restated answer label.
fn clean_rewrite(output: &str) -> Option<String> {
    let text = output.trim();
    let text = match text.get(..ANSWER_LABEL.len()) {
        Some(head) if head.eq_ignore_ascii_case(ANSWER_LABEL) => text[ANSWER_LABEL.len()..].trim(),
        _ => text,
    };

    (!text.is_empty()).then(|| text.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_last_exchange_requires_both_roles() {
        assert_eq!(last_exchange(&[]), None);
        assert_eq!(last_exchange(&[ConversationTurn::user("What is LOT?")]), None);
        assert_eq!(last_exchange(&[ConversationTurn::assistant("Hello")]), None);
    }

    #[test]
    fn test_last_exchange_picks_most_recent() {
        let history = vec![
            ConversationTurn::user("first question"),
            ConversationTurn::assistant("first answer"),
            ConversationTurn::user("second question"),
            ConversationTurn::assistant("second answer"),
        ];
        assert_eq!(
            last_exchange(&history),
            Some(("second question", "second answer"))
        );
    }

    #[test]
    fn test_strip_sources() {
        let message = "LOT is the taxonomy.\n\n**Sources:**\n- [https://kb.lightcast.io/lot](https://kb.lightcast.io/lot)";
        assert_eq!(strip_sources(message), "LOT is the taxonomy.");
        assert_eq!(strip_sources("  plain answer "), "plain answer");
    }

    #[test]
    fn test_clean_rewrite() {
        assert_eq!(
            clean_rewrite(" rewritten standalone question: Who maintains LOT? "),
            Some("Who maintains LOT?".to_string())
        );
        assert_eq!(
            clean_rewrite("Who maintains LOT?\n"),
            Some("Who maintains LOT?".to_string())
        );
        assert_eq!(clean_rewrite("Rewritten Standalone Question:   "), None);
        assert_eq!(clean_rewrite(""), None);
    }
}
