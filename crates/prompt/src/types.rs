//! Prompt types for RAGnarok.
//!
//! A [`PromptDefinition`] is the template side (built in or loaded from YAML);
//! a [`PromptRecord`] is the structured data side filled in by the pipeline.

use serde::{Deserialize, Serialize};

/// A prompt definition loaded from YAML.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PromptDefinition {
    /// Unique prompt identifier
    pub id: String,

    /// Human-readable title
    pub title: String,

    /// API version for schema evolution
    #[serde(rename = "apiVersion")]
    pub api_version: String,

    /// Creator identifier
    #[serde(rename = "createdBy", default)]
    pub created_by: String,

    /// Template string with Handlebars syntax
    pub template: String,
}

/// Labeled block of retrieved text.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ContextBlock {
    /// Where the context comes from (e.g. the knowledge base name)
    pub label: String,

    /// The assembled context text
    pub body: String,
}

/// One prior user/assistant exchange.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Exchange {
    pub user: String,
    pub assistant: String,
}

/// Structured content of a prompt, rendered through a [`PromptDefinition`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct PromptRecord {
    /// Assistant identity
    #[serde(skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,

    /// Instruction lines, rendered one per line
    #[serde(default)]
    pub instructions: Vec<String>,

    /// Retrieved context
    #[serde(skip_serializing_if = "Option::is_none")]
    pub context: Option<ContextBlock>,

    /// Prior exchange for follow-up questions
    #[serde(skip_serializing_if = "Option::is_none")]
    pub exchange: Option<Exchange>,

    /// The question being asked
    pub question: String,
}

impl PromptRecord {
    pub fn new(question: impl Into<String>) -> Self {
        Self {
            question: question.into(),
            ..Self::default()
        }
    }

    pub fn with_role(mut self, role: impl Into<String>) -> Self {
        self.role = Some(role.into());
        self
    }

    pub fn with_instruction(mut self, instruction: impl Into<String>) -> Self {
        self.instructions.push(instruction.into());
        self
    }

    pub fn with_context(mut self, label: impl Into<String>, body: impl Into<String>) -> Self {
        self.context = Some(ContextBlock {
            label: label.into(),
            body: body.into(),
        });
        self
    }

    pub fn with_exchange(mut self, user: impl Into<String>, assistant: impl Into<String>) -> Self {
        self.exchange = Some(Exchange {
            user: user.into(),
            assistant: assistant.into(),
        });
        self
    }
}

/// A fully built prompt ready for LLM execution.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPrompt {
    /// Rendered prompt text
    pub text: String,

    /// Metadata about the built prompt
    pub metadata: BuiltPromptMetadata,
}

/// Metadata about a built prompt.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct BuiltPromptMetadata {
    /// Source prompt ID
    #[serde(rename = "sourcePromptId")]
    pub source_prompt_id: String,

    /// Knowledge base used (if any)
    #[serde(rename = "knowledgeBaseUsed", skip_serializing_if = "Option::is_none")]
    pub knowledge_base_used: Option<String>,

    /// Whether a prior exchange was included
    #[serde(rename = "exchangeIncluded")]
    pub exchange_included: bool,
}
