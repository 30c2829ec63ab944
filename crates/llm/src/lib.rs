//! Gist summarization pipeline
//!
//! Chunker, prompt builder, chat-completion client and map-reduce summarizer

mod chunking;
mod client;
mod extract;
mod llm_trait;
mod prompts;
mod summarize;
mod types;

pub use chunking::{chunk, word_count, ChunkingStrategy, Segment};
pub use client::OpenAiClient;
pub use extract::{extract_summary, parse_response};
pub use llm_trait::ChatBackend;
pub use prompts::{
    build_prompt, combine_prompt, BandKind, PromptBand, PromptPlan, PromptStrategy, Sampling,
    TokenBudget, COMBINE_PREFIX, GUIDELINES,
};
pub use summarize::Summarizer;
pub use types::{ChatMessage, ChatRequest, ChatResponse, Role};
