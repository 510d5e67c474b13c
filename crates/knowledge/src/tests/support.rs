//! Shared fixtures: a scripted generation client and corpus helpers.

use crate::embeddings::providers::trigram::TrigramProvider;
use crate::rag::{PipelineOptions, PipelinePrompts, RagPipeline};
use crate::store::RetrievalStore;
use ragnarok_llm::{LlmClient, LlmError, LlmRequest, LlmResponse};
use ragnarok_prompt::{builtin_prompt, QUERY_REWRITE_PROMPT_ID, RAG_ANSWER_PROMPT_ID};
use std::collections::VecDeque;
use std::path::Path;
use std::sync::{Arc, Mutex};

/// Replays queued responses and records every request it receives.
#[derive(Debug, Default)]
pub struct ScriptedClient {
    responses: Mutex<VecDeque<Result<String, LlmError>>>,
    requests: Mutex<Vec<LlmRequest>>,
}

impl ScriptedClient {
    pub fn new() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn push_ok(&self, text: &str) {
        self.responses.lock().unwrap().push_back(Ok(text.to_string()));
    }

    pub fn push_err(&self, err: LlmError) {
        self.responses.lock().unwrap().push_back(Err(err));
    }

    pub fn calls(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    pub fn requests(&self) -> Vec<LlmRequest> {
        self.requests.lock().unwrap().clone()
    }
}

#[async_trait::async_trait]
impl LlmClient for ScriptedClient {
    fn provider_name(&self) -> &str {
        "scripted"
    }

    fn model_name(&self) -> &str {
        "scripted-model"
    }

    async fn complete(&self, request: &LlmRequest) -> Result<LlmResponse, LlmError> {
        self.requests.lock().unwrap().push(request.clone());
        let next = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Err(LlmError::Transport("no scripted response".to_string())));

        next.map(|content| LlmResponse {
            content,
            model: "scripted-model".to_string(),
        })
    }
}

pub const LOT_RECORD: &str = "Title: Lightcast Occupation Taxonomy (LOT)
Source: https://kb.lightcast.io/lot
Content: LOT is the Lightcast occupation taxonomy. It is maintained by the Lightcast taxonomy team and updated quarterly.";

pub const SKILLS_RECORD: &str = "Title: Lightcast Open Skills
Source: kb.lightcast.io/skills
Content: Open Skills is a free library of skills used in job postings and resumes.";

pub fn write_corpus(dir: &Path, files: &[(&str, &str)]) {
    for (name, text) in files {
        std::fs::write(dir.join(name), text).unwrap();
    }
}

pub fn trigram_store(corpus: &Path) -> RetrievalStore {
    RetrievalStore::new("test_collection", corpus, Arc::new(TrigramProvider::new(256)))
}

pub fn builtin_prompts() -> PipelinePrompts {
    PipelinePrompts {
        answer: builtin_prompt(RAG_ANSWER_PROMPT_ID).unwrap(),
        rewrite: builtin_prompt(QUERY_REWRITE_PROMPT_ID).unwrap(),
    }
}

pub fn pipeline(store: RetrievalStore, client: Arc<ScriptedClient>) -> RagPipeline {
    RagPipeline::new(store, client, builtin_prompts(), PipelineOptions::default())
}
