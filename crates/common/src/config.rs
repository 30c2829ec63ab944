use crate::error::GistError;
use serde::{Deserialize, Serialize};
use std::path::PathBuf;
use std::str::FromStr;

/// Which prompt contract the pipeline follows
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PipelineMode {
    /// Size-banded prompts with a `<summary>` marker contract
    Current,
    /// One fixed prompt, raw response returned verbatim
    Legacy,
}

impl PipelineMode {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Current => "current",
            Self::Legacy => "legacy",
        }
    }
}

impl FromStr for PipelineMode {
    type Err = GistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "current" => Ok(Self::Current),
            "legacy" => Ok(Self::Legacy),
            other => Err(GistError::config(format!(
                "Unknown pipeline mode '{}', expected 'current' or 'legacy'",
                other
            ))),
        }
    }
}

/// How per-segment summaries are merged in the combine pass
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum CombineMode {
    /// Prefix the concatenation with an explicit "combine" instruction
    Instructed,
    /// Send the bare concatenation through the banded prompt path
    Resummarize,
}

impl FromStr for CombineMode {
    type Err = GistError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "instructed" => Ok(Self::Instructed),
            "resummarize" => Ok(Self::Resummarize),
            other => Err(GistError::config(format!(
                "Unknown combine mode '{}', expected 'instructed' or 'resummarize'",
                other
            ))),
        }
    }
}

/// Gist application configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Chat-completion API base URL (without `/chat/completions`)
    pub api_base_url: String,

    /// Default API key, used when a caller does not supply one
    #[serde(skip_serializing)]
    pub api_key: Option<String>,

    /// Summarization model name
    pub llm_model: String,

    /// Prompt contract
    pub pipeline_mode: PipelineMode,

    /// Combine pass behaviour
    pub combine_mode: CombineMode,

    /// Maximum words per segment
    pub max_chunk_words: usize,

    /// Words shared by consecutive segments
    pub chunk_overlap_words: usize,

    /// Upper bound on concurrent per-segment requests
    pub max_concurrency: usize,

    /// HTTP client timeout in seconds
    pub request_timeout_secs: u64,

    /// Server bind address
    pub server_host: String,

    /// Server port
    pub server_port: u16,

    /// Log directory
    pub log_dir: PathBuf,

    /// Log level
    pub log_level: String,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: "https://api.openai.com/v1".to_string(),
            api_key: None,
            llm_model: "gpt-4o-mini".to_string(),
            pipeline_mode: PipelineMode::Current,
            combine_mode: CombineMode::Instructed,
            max_chunk_words: 12000,
            chunk_overlap_words: 500,
            max_concurrency: 4,
            request_timeout_secs: 120,
            server_host: "127.0.0.1".to_string(),
            server_port: 8080,
            log_dir: PathBuf::from("./log"),
            log_level: "info".to_string(),
        }
    }
}

impl AppConfig {
    /// Load configuration from environment variables and .env file
    pub fn from_env() -> Result<Self, GistError> {
        // Load .env file (ignore if not exists)
        let _ = dotenv::dotenv();

        let defaults = Self::default();

        let config = Self {
            api_base_url: std::env::var("OPENAI_BASE_URL")
                .unwrap_or(defaults.api_base_url),
            api_key: std::env::var("OPENAI_API_KEY")
                .ok()
                .filter(|k| !k.trim().is_empty()),
            llm_model: std::env::var("LLM_MODEL").unwrap_or(defaults.llm_model),
            pipeline_mode: match std::env::var("PIPELINE_MODE") {
                Ok(mode) => mode.parse()?,
                Err(_) => defaults.pipeline_mode,
            },
            combine_mode: match std::env::var("COMBINE_MODE") {
                Ok(mode) => mode.parse()?,
                Err(_) => defaults.combine_mode,
            },
            max_chunk_words: Self::get_env_parsed("MAX_CHUNK_WORDS")
                .unwrap_or(defaults.max_chunk_words),
            chunk_overlap_words: Self::get_env_parsed("CHUNK_OVERLAP_WORDS")
                .unwrap_or(defaults.chunk_overlap_words),
            max_concurrency: Self::get_env_parsed("MAX_CONCURRENCY")
                .unwrap_or(defaults.max_concurrency),
            request_timeout_secs: Self::get_env_parsed("REQUEST_TIMEOUT_SECS")
                .unwrap_or(defaults.request_timeout_secs),
            server_host: std::env::var("SERVER_HOST").unwrap_or(defaults.server_host),
            server_port: Self::get_env_parsed("SERVER_PORT").unwrap_or(defaults.server_port),
            log_dir: std::env::var("LOG_DIR")
                .ok()
                .map(PathBuf::from)
                .unwrap_or(defaults.log_dir),
            log_level: std::env::var("LOG_LEVEL").unwrap_or(defaults.log_level),
        };

        config.validate()?;

        Ok(config)
    }

    /// Parse an environment variable, ignoring unset or unparsable values
    fn get_env_parsed<T: FromStr>(key: &str) -> Option<T> {
        std::env::var(key).ok().and_then(|s| s.trim().parse().ok())
    }

    /// Get server bind address (host:port)
    pub fn server_bind_address(&self) -> String {
        format!("{}:{}", self.server_host, self.server_port)
    }

    /// Endpoint the model client posts to
    pub fn chat_completions_url(&self) -> String {
        format!("{}/chat/completions", self.api_base_url.trim_end_matches('/'))
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), GistError> {
        if self.llm_model.trim().is_empty() {
            return Err(GistError::config("LLM model name cannot be empty"));
        }

        if !self.api_base_url.starts_with("http://") && !self.api_base_url.starts_with("https://") {
            return Err(GistError::config(
                "API base URL must start with http:// or https://",
            ));
        }

        if self.max_chunk_words == 0 {
            return Err(GistError::config("MAX_CHUNK_WORDS must be greater than 0"));
        }

        if self.chunk_overlap_words >= self.max_chunk_words {
            return Err(GistError::config(format!(
                "CHUNK_OVERLAP_WORDS ({}) must be smaller than MAX_CHUNK_WORDS ({})",
                self.chunk_overlap_words, self.max_chunk_words
            )));
        }

        if self.max_concurrency == 0 {
            return Err(GistError::config("MAX_CONCURRENCY must be at least 1"));
        }

        if self.server_port == 0 {
            return Err(GistError::config("Server port cannot be 0"));
        }

        Ok(())
    }
}
