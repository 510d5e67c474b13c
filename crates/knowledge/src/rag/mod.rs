//! Retrieval-augmented answering.
//!
//! Query rewriting, context assembly, answer synthesis, and the pipeline
//! that sequences them.

pub mod context;
pub mod conversation;
pub mod pipeline;
pub mod rewrite;
pub mod synth;
pub mod types;

pub use context::{assemble_context, normalize_source, AssembledContext, CitationSet, NormalizedSource};
pub use conversation::Conversation;
pub use pipeline::{no_relevant_information, PipelineOptions, PipelinePrompts, PipelineState, RagPipeline};
pub use rewrite::{QueryRewriter, RewriteOutcome};
pub use synth::AnswerSynthesizer;
pub use types::{ConversationTurn, RagAnswer, Role, SOURCES_MARKER};
