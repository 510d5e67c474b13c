//! Prompt system for RAGnarok.
//!
//! - Structured [`PromptRecord`]s filled in by the pipeline
//! - Built-in `rag.answer` and `query.rewrite` definitions
//! - YAML overrides under `.ragnarok/prompts/`
//! - Handlebars template rendering

pub mod builder;
pub mod defaults;
pub mod loader;
pub mod types;

pub use builder::build_prompt;
pub use defaults::{builtin_prompt, QUERY_REWRITE_PROMPT_ID, RAG_ANSWER_PROMPT_ID};
pub use loader::{list_prompts, load_prompt, resolve_prompt};
pub use types::{BuiltPrompt, BuiltPromptMetadata, ContextBlock, Exchange, PromptDefinition, PromptRecord};
