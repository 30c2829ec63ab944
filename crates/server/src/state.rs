use gist_common::{AppConfig, Result};
use gist_llm::{ChatBackend, OpenAiClient, Summarizer};
use std::sync::Arc;

/// Shared application state
///
/// Read-only after startup; every request runs its own pipeline invocation.
pub struct AppState {
    /// Application configuration
    pub config: AppConfig,

    /// Summarization pipeline
    pub summarizer: Arc<Summarizer>,
}

impl AppState {
    /// Create new application state backed by the configured endpoint
    pub fn new(config: AppConfig) -> Result<Self> {
        let client = OpenAiClient::from_config(&config)?;
        Ok(Self::with_backend(config, Arc::new(client)))
    }

    /// Create application state with an explicit chat backend
    pub fn with_backend(config: AppConfig, backend: Arc<dyn ChatBackend>) -> Self {
        let summarizer = Summarizer::from_config(backend, &config);
        Self {
            config,
            summarizer: Arc::new(summarizer),
        }
    }

    /// Caller-supplied key, falling back to the configured default
    pub fn resolve_api_key(&self, supplied: Option<&str>) -> String {
        supplied
            .map(str::trim)
            .filter(|k| !k.is_empty())
            .map(str::to_string)
            .or_else(|| self.config.api_key.clone())
            .unwrap_or_default()
    }
}
