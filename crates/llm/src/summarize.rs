use futures::stream::{self, StreamExt, TryStreamExt};
use gist_common::{AppConfig, CombineMode, GistError, Result};
use std::sync::Arc;
use tracing::{debug, info, info_span, Instrument};
use uuid::Uuid;

use crate::chunking::{word_count, ChunkingStrategy, Segment};
use crate::extract::parse_response;
use crate::llm_trait::ChatBackend;
use crate::prompts::{combine_prompt, PromptPlan, PromptStrategy};
use crate::types::{ChatMessage, ChatRequest};

/// Summarizer for arbitrary-length text using map-reduce over segments
pub struct Summarizer {
    backend: Arc<dyn ChatBackend>,
    model: String,
    chunking: ChunkingStrategy,
    prompts: PromptStrategy,
    combine_mode: CombineMode,
    max_concurrency: usize,
}

impl Summarizer {
    /// Create new summarizer with the default strategies
    pub fn new(backend: Arc<dyn ChatBackend>, model: impl Into<String>) -> Self {
        Self {
            backend,
            model: model.into(),
            chunking: ChunkingStrategy::default(),
            prompts: PromptStrategy::current(),
            combine_mode: CombineMode::Instructed,
            max_concurrency: 4,
        }
    }

    pub fn from_config(backend: Arc<dyn ChatBackend>, config: &AppConfig) -> Self {
        Self::new(backend, config.llm_model.clone())
            .with_chunking(ChunkingStrategy::from_config(config))
            .with_prompts(PromptStrategy::from_mode(config.pipeline_mode))
            .with_combine_mode(config.combine_mode)
            .with_max_concurrency(config.max_concurrency)
    }

    pub fn with_chunking(mut self, chunking: ChunkingStrategy) -> Self {
        self.chunking = chunking;
        self
    }

    pub fn with_prompts(mut self, prompts: PromptStrategy) -> Self {
        self.prompts = prompts;
        self
    }

    pub fn with_combine_mode(mut self, combine_mode: CombineMode) -> Self {
        self.combine_mode = combine_mode;
        self
    }

    pub fn with_max_concurrency(mut self, max_concurrency: usize) -> Self {
        self.max_concurrency = max_concurrency.max(1);
        self
    }

    pub fn model(&self) -> &str {
        &self.model
    }

    pub fn backend_name(&self) -> &str {
        self.backend.name()
    }

    /// Summarize `text`, reducing per-segment summaries when it does not fit one segment
    pub async fn extract_key_points(&self, text: &str, api_key: &str) -> Result<String> {
        let request_id = Uuid::new_v4();
        let span = info_span!("extract_key_points", %request_id);

        async move {
            if api_key.trim().is_empty() {
                return Err(GistError::authentication(
                    "Please enter your OpenAI API key",
                ));
            }

            let segments = self.chunking.chunk(text)?;
            info!(
                "Starting summarization - Words: {}, Segments: {}",
                word_count(text),
                segments.len()
            );

            if segments.len() == 1 {
                return self.summarize_text(&segments[0].text, api_key).await;
            }

            // Map phase: ordered, bounded fan-out; the first error drops the rest
            let total = segments.len();
            let summaries: Vec<String> = stream::iter(segments.iter().enumerate())
                .map(|(i, segment)| async move {
                    debug!(
                        "Summarizing segment {}/{} - Words {}..{}",
                        i + 1,
                        total,
                        segment.start,
                        segment.end
                    );
                    self.summarize_text(&segment.text, api_key).await
                })
                .buffered(self.max_concurrency)
                .try_collect()
                .await?;

            // Reduce phase
            let combined = match self.combine_mode {
                CombineMode::Instructed => combine_prompt(&summaries),
                CombineMode::Resummarize => summaries.join("\n\n"),
            };
            info!("Combining {} segment summaries - Length: {} chars", summaries.len(), combined.len());

            let summary = self.summarize_text(&combined, api_key).await?;
            info!("Summarization complete - Length: {} chars", summary.len());
            Ok(summary)
        }
        .instrument(span)
        .await
    }

    /// Summarize one piece of text with the plan chosen for its size
    pub async fn summarize_text(&self, text: &str, api_key: &str) -> Result<String> {
        let plan = self.prompts.build_prompt(word_count(text));
        self.summarize_with_plan(text, &plan, api_key).await
    }

    /// Summarize a segment with its plan
    pub async fn summarize_segment(
        &self,
        segment: &Segment,
        plan: &PromptPlan,
        api_key: &str,
    ) -> Result<String> {
        self.summarize_with_plan(&segment.text, plan, api_key).await
    }

    async fn summarize_with_plan(&self, text: &str, plan: &PromptPlan, api_key: &str) -> Result<String> {
        let request = ChatRequest {
            model: self.model.clone(),
            messages: vec![
                ChatMessage::system(plan.system_instruction.clone()),
                ChatMessage::user(plan.user_message(text)),
            ],
            temperature: plan.sampling.temperature,
            max_tokens: plan.max_tokens,
            presence_penalty: plan.sampling.presence_penalty,
            frequency_penalty: plan.sampling.frequency_penalty,
        };

        let content = self.backend.complete(&request, api_key).await?;
        parse_response(&content, plan.requires_marker)
    }
}
