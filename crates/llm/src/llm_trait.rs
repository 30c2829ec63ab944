use async_trait::async_trait;
use gist_common::Result;

use crate::types::ChatRequest;

/// Common trait for chat-completion backends
#[async_trait]
pub trait ChatBackend: Send + Sync {
    /// Send one request and return the raw text of the first choice
    ///
    /// Implementations fail with `Authentication` for a rejected key,
    /// `Transport` for network/HTTP failures and `MalformedResponse` when
    /// the reply has no usable content. They must not retry.
    async fn complete(&self, request: &ChatRequest, api_key: &str) -> Result<String>;

    /// Backend name for logs and health reports
    fn name(&self) -> &str;
}
