//! Built-in prompt definitions.

use crate::types::PromptDefinition;

/// Identifier of the answer-synthesis prompt.
pub const RAG_ANSWER_PROMPT_ID: &str = "rag.answer";

/// Identifier of the follow-up rewrite prompt.
pub const QUERY_REWRITE_PROMPT_ID: &str = "query.rewrite";

const RAG_ANSWER_TEMPLATE: &str = "You are {{role}}, an AI assistant for the {{context.label}}.
{{instructions}}

Context from {{context.label}}:
---
{{context.body}}
---

User Question: {{question}}

Answer:
";

const QUERY_REWRITE_TEMPLATE: &str = "{{instructions}}

Conversation History:
User: {{exchange.user}}
Assistant: {{exchange.assistant}}

Follow-up Question: {{question}}

Rewritten Standalone Question:
";

/// Look up a built-in definition by ID.
pub fn builtin_prompt(id: &str) -> Option<PromptDefinition> {
    let (title, template) = match id {
        RAG_ANSWER_PROMPT_ID => ("Knowledge base answer", RAG_ANSWER_TEMPLATE),
        QUERY_REWRITE_PROMPT_ID => ("Standalone question rewrite", QUERY_REWRITE_TEMPLATE),
        _ => return None,
    };

    Some(PromptDefinition {
        id: id.to_string(),
        title: title.to_string(),
        api_version: "1.0".to_string(),
        created_by: "ragnarok".to_string(),
        template: template.to_string(),
    })
}

/// IDs of all built-in definitions.
pub fn builtin_prompt_ids() -> [&'static str; 2] {
    [RAG_ANSWER_PROMPT_ID, QUERY_REWRITE_PROMPT_ID]
}
