//! Prompt templates for summarization
//!
//! Band thresholds, instruction text and response budgets are plain data on
//! [`PromptStrategy`], so the legacy fixed prompt and the size-adaptive
//! prompts run through the same pipeline.

use gist_common::PipelineMode;

/// Instruction prepended to the concatenated per-segment summaries
pub const COMBINE_PREFIX: &str = "Combine these summaries into one coherent summary:\n\n";

/// Guidelines appended to every banded instruction
pub const GUIDELINES: &str = "\n\nGUIDELINES:\n\
- Focus on actionable insights and key takeaways\n\
- Maintain original tone (formal/casual/technical)\n\
- Preserve important technical details and numbers\n\
- Use original terminology when domain-specific\n\
- Exclude redundant or obvious information\n\
- Never add information not present in original text\n\
- Be brief: shorter is better";

const SHORT_INSTRUCTION: &str = "You are an expert summarizer specializing in concise content. \
Distill the essence into a single clear sentence.\n\n\
OUTPUT FORMAT:\n\
```\n\
<summary>[single sentence summary]</summary>\n\
```";

const MEDIUM_INSTRUCTION: &str = "You are an expert summarizer specializing in medium-length content. \
Extract the 2-3 main points while maintaining the original tone and terminology.\n\n\
OUTPUT FORMAT:\n\
```\n\
<summary>\n\
• [key point 1]\n\
• [key point 2]\n\
</summary>\n\
```";

const LONG_INSTRUCTION: &str = "You are an expert summarizer specializing in long-form content analysis. \
Create a comprehensive yet concise summary with key points (never more than 4-5) \
and a 3-4 sentence overview.\n\n\
OUTPUT FORMAT:\n\
```\n\
KEY POINTS:\n\
• [key point 1]\n\
• [key point 2]\n\
...\n\
<summary>[3-4 sentence summary here]</summary>\n\
```";

const LEGACY_INSTRUCTION: &str = "You are a highly efficient summarizer. Your goal is to provide \
extremely concise summaries that scale with input length while preserving the original author's \
voice and tone when possible. For short texts (under 100 words), give a 1-sentence summary. \
For medium texts (100-500 words), give 2-3 key points. For longer texts, never exceed 4-5 key \
points. Always prioritize the most impactful information. Be ruthlessly brief - shorter is better.";

const BANDED_USER_PREFIX: &str = "Here's the text to analyze:\n\n";
const LEGACY_USER_PREFIX: &str =
    "Summarize this text as concisely as possible, scaling summary length to input length: \n\n";

/// Input size band
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BandKind {
    Short,
    Medium,
    Long,
}

/// One word-count range and the instruction used for it
#[derive(Debug, Clone)]
pub struct PromptBand {
    pub kind: BandKind,

    /// Inclusive lower bound
    pub min_words: usize,

    /// Inclusive upper bound, `None` for unbounded
    pub max_words: Option<usize>,

    pub instruction: String,
}

impl PromptBand {
    pub fn contains(&self, word_count: usize) -> bool {
        word_count >= self.min_words && self.max_words.map_or(true, |max| word_count <= max)
    }
}

/// Response-length budget as a function of input words
#[derive(Debug, Clone, Copy)]
pub struct TokenBudget {
    pub floor: u32,
    pub ceiling: u32,

    /// Inputs below this many words use `short_ratio`
    pub short_input_words: usize,
    pub short_ratio: f32,
    pub long_ratio: f32,
}

impl Default for TokenBudget {
    fn default() -> Self {
        Self {
            floor: 150,
            ceiling: 1000,
            short_input_words: 200,
            short_ratio: 0.75,
            long_ratio: 0.5,
        }
    }
}

impl TokenBudget {
    /// Maximum response tokens for an input of `word_count` words
    ///
    /// Non-decreasing in `word_count`: the short-ratio term stops growing at
    /// the threshold, so switching to the lower ratio never shrinks the budget.
    pub fn max_tokens(&self, word_count: usize) -> u32 {
        let capped = word_count.min(self.short_input_words.saturating_sub(1));
        let short_term = capped as f32 * self.short_ratio;
        let long_term = word_count as f32 * self.long_ratio;
        let raw = short_term.max(long_term).floor() as u32;
        raw.max(self.floor).min(self.ceiling)
    }
}

/// Sampling parameters sent with every request
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Sampling {
    pub temperature: f32,
    pub presence_penalty: Option<f32>,
    pub frequency_penalty: Option<f32>,
}

/// Everything needed to issue one summarization request
#[derive(Debug, Clone)]
pub struct PromptPlan {
    pub system_instruction: String,
    pub user_prefix: String,
    pub max_tokens: u32,
    pub sampling: Sampling,

    /// Response must contain a `<summary>` region
    pub requires_marker: bool,

    /// Band that produced this plan (`None` for the fixed prompt)
    pub band: Option<BandKind>,
}

impl PromptPlan {
    /// User message carrying the text to summarize
    pub fn user_message(&self, text: &str) -> String {
        format!("{}{}", self.user_prefix, text)
    }
}

/// Prompt selection strategy
#[derive(Debug, Clone)]
pub enum PromptStrategy {
    /// Size-adaptive instructions with a marker contract
    Banded {
        bands: Vec<PromptBand>,
        guidelines: String,
        budget: TokenBudget,
        sampling: Sampling,
    },
    /// One instruction for every input, raw response returned
    Fixed {
        instruction: String,
        user_prefix: String,
        max_tokens: u32,
        sampling: Sampling,
    },
}

impl Default for PromptStrategy {
    fn default() -> Self {
        Self::current()
    }
}

impl PromptStrategy {
    /// Short `< 100`, medium `100..=500`, long `> 500`
    pub fn current() -> Self {
        Self::Banded {
            bands: vec![
                PromptBand {
                    kind: BandKind::Short,
                    min_words: 0,
                    max_words: Some(99),
                    instruction: SHORT_INSTRUCTION.to_string(),
                },
                PromptBand {
                    kind: BandKind::Medium,
                    min_words: 100,
                    max_words: Some(500),
                    instruction: MEDIUM_INSTRUCTION.to_string(),
                },
                PromptBand {
                    kind: BandKind::Long,
                    min_words: 501,
                    max_words: None,
                    instruction: LONG_INSTRUCTION.to_string(),
                },
            ],
            guidelines: GUIDELINES.to_string(),
            budget: TokenBudget::default(),
            sampling: Sampling {
                temperature: 0.2,
                presence_penalty: Some(-0.2),
                frequency_penalty: Some(0.3),
            },
        }
    }

    pub fn legacy() -> Self {
        Self::Fixed {
            instruction: LEGACY_INSTRUCTION.to_string(),
            user_prefix: LEGACY_USER_PREFIX.to_string(),
            max_tokens: 250,
            sampling: Sampling {
                temperature: 0.5,
                presence_penalty: None,
                frequency_penalty: None,
            },
        }
    }

    pub fn from_mode(mode: PipelineMode) -> Self {
        match mode {
            PipelineMode::Current => Self::current(),
            PipelineMode::Legacy => Self::legacy(),
        }
    }

    /// Band matching `word_count`, if this strategy is banded
    pub fn band_for(&self, word_count: usize) -> Option<&PromptBand> {
        match self {
            Self::Banded { bands, .. } => bands.iter().find(|b| b.contains(word_count)),
            Self::Fixed { .. } => None,
        }
    }

    /// Build the instruction and response budget for a segment
    pub fn build_prompt(&self, word_count: usize) -> PromptPlan {
        match self {
            Self::Banded {
                bands,
                guidelines,
                budget,
                sampling,
            } => {
                // Bands cover 0.. contiguously; fall back to the last one regardless
                let band = bands
                    .iter()
                    .find(|b| b.contains(word_count))
                    .or_else(|| bands.last());

                let (instruction, kind) = match band {
                    Some(b) => (b.instruction.as_str(), Some(b.kind)),
                    None => ("", None),
                };

                PromptPlan {
                    system_instruction: format!("{}{}", instruction, guidelines),
                    user_prefix: BANDED_USER_PREFIX.to_string(),
                    max_tokens: budget.max_tokens(word_count),
                    sampling: *sampling,
                    requires_marker: true,
                    band: kind,
                }
            }
            Self::Fixed {
                instruction,
                user_prefix,
                max_tokens,
                sampling,
            } => PromptPlan {
                system_instruction: instruction.clone(),
                user_prefix: user_prefix.clone(),
                max_tokens: *max_tokens,
                sampling: *sampling,
                requires_marker: false,
                band: None,
            },
        }
    }
}

/// Prompt plan from the default size-banded strategy
pub fn build_prompt(word_count: usize) -> PromptPlan {
    PromptStrategy::current().build_prompt(word_count)
}

/// Input for the combine pass
pub fn combine_prompt(summaries: &[String]) -> String {
    format!("{}{}", COMBINE_PREFIX, summaries.join("\n\n"))
}
