use gist_common::{AppConfig, GistError, Result};

/// Word-bounded slice of the source text
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Segment {
    /// Words joined with single spaces
    pub text: String,

    /// Number of words in `text`
    pub word_count: usize,

    /// Index of the first word in the source
    pub start: usize,

    /// One past the index of the last word in the source
    pub end: usize,
}

/// Segment size and overlap, in words
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ChunkingStrategy {
    pub max_words: usize,
    pub overlap_words: usize,
}

impl Default for ChunkingStrategy {
    fn default() -> Self {
        // Conservative limit for a 128k-token context window
        Self {
            max_words: 12000,
            overlap_words: 500,
        }
    }
}

impl ChunkingStrategy {
    pub fn new(max_words: usize, overlap_words: usize) -> Self {
        Self {
            max_words,
            overlap_words,
        }
    }

    pub fn from_config(config: &AppConfig) -> Self {
        Self::new(config.max_chunk_words, config.chunk_overlap_words)
    }

    /// Split `text` using this strategy
    pub fn chunk(&self, text: &str) -> Result<Vec<Segment>> {
        chunk(text, self.max_words, self.overlap_words)
    }
}

/// Count whitespace-delimited words
pub fn word_count(text: &str) -> usize {
    text.split_whitespace().count()
}

/// Split text into overlapping word-bounded segments
///
/// Segments start every `max_words - overlap_words` words and span at most
/// `max_words` words. Text that already fits yields exactly one segment
/// with its whitespace collapsed.
pub fn chunk(text: &str, max_words: usize, overlap_words: usize) -> Result<Vec<Segment>> {
    if max_words == 0 {
        return Err(GistError::invalid_input("Segment size must be at least one word"));
    }
    if overlap_words >= max_words {
        return Err(GistError::invalid_input(format!(
            "Overlap ({} words) must be smaller than segment size ({} words)",
            overlap_words, max_words
        )));
    }

    let words: Vec<&str> = text.split_whitespace().collect();
    if words.is_empty() {
        return Err(GistError::invalid_input("Text to summarize is empty"));
    }

    let total = words.len();
    if total <= max_words {
        return Ok(vec![Segment {
            text: words.join(" "),
            word_count: total,
            start: 0,
            end: total,
        }]);
    }

    let step = max_words - overlap_words;
    let segments = (0..total)
        .step_by(step)
        .map(|start| {
            let end = (start + max_words).min(total);
            Segment {
                text: words[start..end].join(" "),
                word_count: end - start,
                start,
                end,
            }
        })
        .collect();

    Ok(segments)
}
