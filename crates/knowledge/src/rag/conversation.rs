//! Caller-side conversation history.

use crate::rag::pipeline::RagPipeline;
use crate::rag::types::{ConversationTurn, RagAnswer};

/// In-memory conversation that feeds its history to the pipeline.
#[derive(Debug, Clone, Default)]
pub struct Conversation {
    turns: Vec<ConversationTurn>,
}

impl Conversation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn turns(&self) -> &[ConversationTurn] {
        &self.turns
    }

    pub fn len(&self) -> usize {
        self.turns.len()
    }

    pub fn is_empty(&self) -> bool {
        self.turns.is_empty()
    }

    pub fn clear(&mut self) {
        self.turns.clear();
    }

    /// Ask the pipeline, then record the user and assistant turns.
    pub async fn ask(&mut self, pipeline: &mut RagPipeline, question: &str) -> RagAnswer {
        let answer = pipeline.answer(question, &self.turns).await;
        self.turns.push(ConversationTurn::user(question));
        self.turns.push(ConversationTurn::assistant(answer.answer.clone()));
        answer
    }
}
