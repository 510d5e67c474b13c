//! Prompt builder: renders a [`PromptRecord`] through a definition's template.

use crate::types::{BuiltPrompt, BuiltPromptMetadata, PromptDefinition, PromptRecord};
use handlebars::Handlebars;
use ragnarok_core::{AppError, AppResult};
use serde_json::json;

/// Build a prompt from a definition and a structured record.
///
/// Template variables:
/// - `role`: assistant identity
/// - `instructions`: instruction lines joined with newlines
/// - `context.label`, `context.body`: retrieved context
/// - `exchange.user`, `exchange.assistant`: prior exchange
/// - `question`: the question
///
/// Missing optional parts render as empty strings.
///
/// # Example
/// ```no_run
/// use ragnarok_prompt::{build_prompt, builtin_prompt, PromptRecord};
///
/// # fn example() -> Result<(), Box<dyn std::error::Error>> {
/// let def = builtin_prompt("rag.answer").unwrap();
/// let record = PromptRecord::new("What is LOT?")
///     .with_role("RAGnarok")
///     .with_context("Lightcast Knowledge Base", "### Document Title: LOT");
/// let built = build_prompt(&def, &record)?;
/// println!("{}", built.text);
/// # Ok(())
/// # }
/// ```
pub fn build_prompt(definition: &PromptDefinition, record: &PromptRecord) -> AppResult<BuiltPrompt> {
    tracing::debug!("Building prompt: {}", definition.id);

    let data = json!({
        "role": record.role.as_deref().unwrap_or_default(),
        "instructions": record.instructions.join("\n"),
        "context": record.context,
        "exchange": record.exchange,
        "question": record.question,
    });

    let text = render_template(&definition.template, &data)?;

    tracing::debug!(
        prompt_id = %definition.id,
        chars = text.len(),
        "Rendered prompt"
    );

    Ok(BuiltPrompt {
        text,
        metadata: BuiltPromptMetadata {
            source_prompt_id: definition.id.clone(),
            knowledge_base_used: record.context.as_ref().map(|c| c.label.clone()),
            exchange_included: record.exchange.is_some(),
        },
    })
}

/// Render a Handlebars template with JSON data.
fn render_template(template: &str, data: &serde_json::Value) -> AppResult<String> {
    let mut handlebars = Handlebars::new();

    // Plain text output, no HTML escaping
    handlebars.register_escape_fn(handlebars::no_escape);

    handlebars
        .register_template_string("prompt", template)
        .map_err(|e| AppError::Prompt(format!("Failed to register template: {}", e)))?;

    handlebars
        .render("prompt", data)
        .map_err(|e| AppError::Prompt(format!("Failed to render template: {}", e)))
}
