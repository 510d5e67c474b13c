//! Conversation and answer types.

use serde::{Deserialize, Serialize};

/// Marker that opens the citation block appended to answers.
pub const SOURCES_MARKER: &str = "**Sources:**";

/// Speaker of a conversation turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    User,
    Assistant,
}

/// One message in a conversation.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConversationTurn {
    pub role: Role,
    pub content: String,
}

impl ConversationTurn {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: Role::User,
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: Role::Assistant,
            content: content.into(),
        }
    }
}

/// Result of one pipeline invocation.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RagAnswer {
    /// Answer text, including the appended sources block
    pub answer: String,

    /// Normalized source URLs, in first-seen order
    pub citations: Vec<String>,

    /// Query actually used for retrieval
    pub effective_query: String,

    /// Whether `effective_query` came from the rewriter
    pub rewritten: bool,

    /// Number of retrieved documents in the context
    pub documents_used: usize,
}

impl RagAnswer {
    /// An answer with no citations (empty context or a handled failure).
    pub fn uncited(answer: impl Into<String>, effective_query: impl Into<String>, rewritten: bool) -> Self {
        Self {
            answer: answer.into(),
            citations: Vec::new(),
            effective_query: effective_query.into(),
            rewritten,
            documents_used: 0,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_turn_serialization() {
        let json = serde_json::to_value(ConversationTurn::assistant("hi")).unwrap();
        assert_eq!(json["role"], "assistant");
        assert_eq!(json["content"], "hi");
    }

    #[test]
    fn test_uncited_answer() {
        let answer = RagAnswer::uncited("nothing found", "q", false);
        assert!(answer.citations.is_empty());
        assert_eq!(answer.documents_used, 0);
    }
}
