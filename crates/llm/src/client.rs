use async_trait::async_trait;
use gist_common::{AppConfig, GistError, Result};
use reqwest::{Client, StatusCode};
use std::time::Duration;
use tracing::{debug, info, warn};

use crate::llm_trait::ChatBackend;
use crate::types::{ApiErrorBody, ChatRequest, ChatResponse};

/// OpenAI-compatible chat-completion client
#[derive(Debug, Clone)]
pub struct OpenAiClient {
    url: String,
    client: Client,
}

impl OpenAiClient {
    /// Create new client posting to `url`
    pub fn new(url: impl Into<String>, timeout: Duration) -> Result<Self> {
        let url = url.into();
        let client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| GistError::internal(format!("Failed to create HTTP client: {}", e)))?;

        info!("Chat completion client initialized: {}", url);
        Ok(Self { url, client })
    }

    pub fn from_config(config: &AppConfig) -> Result<Self> {
        Self::new(
            config.chat_completions_url(),
            Duration::from_secs(config.request_timeout_secs),
        )
    }

    /// Endpoint URL
    pub fn url(&self) -> &str {
        &self.url
    }

    /// Single attempt, no retry
    async fn try_complete(&self, request: &ChatRequest, api_key: &str) -> Result<String> {
        let response = self
            .client
            .post(&self.url)
            .bearer_auth(api_key)
            .json(request)
            .send()
            .await
            .map_err(|e| GistError::transport(format!("Failed to send request: {}", e)))?;

        let status = response.status();
        let body = response
            .text()
            .await
            .map_err(|e| GistError::transport(format!("Failed to read response body: {}", e)))?;

        if !status.is_success() {
            return Err(upstream_error(status, &body));
        }

        parse_content(&body)
    }
}

#[async_trait]
impl ChatBackend for OpenAiClient {
    async fn complete(&self, request: &ChatRequest, api_key: &str) -> Result<String> {
        if api_key.trim().is_empty() {
            return Err(GistError::authentication(
                "Please enter your OpenAI API key",
            ));
        }

        debug!(
            "Sending chat completion request - Model: {}, Max tokens: {}, Prompt length: {}",
            request.model,
            request.max_tokens,
            request.user_content().map_or(0, str::len)
        );

        let result = self.try_complete(request, api_key).await;
        match &result {
            Ok(content) => debug!("Received completion - Length: {}", content.len()),
            Err(e) => warn!("Chat completion request failed: {}", e),
        }
        result
    }

    fn name(&self) -> &str {
        "openai"
    }
}

/// Map a non-success reply to an error carrying the upstream message
fn upstream_error(status: StatusCode, body: &str) -> GistError {
    let detail = serde_json::from_str::<ApiErrorBody>(body)
        .ok()
        .and_then(|b| b.error)
        .and_then(|e| e.message)
        .filter(|m| !m.trim().is_empty())
        .unwrap_or_else(|| "API request failed".to_string());

    match status {
        StatusCode::UNAUTHORIZED | StatusCode::FORBIDDEN => GistError::authentication(detail),
        _ => GistError::transport(format!("{} (HTTP {})", detail, status.as_u16())),
    }
}

/// Extract `choices[0].message.content` from a success body
fn parse_content(body: &str) -> Result<String> {
    let parsed: ChatResponse = serde_json::from_str(body)
        .map_err(|e| GistError::malformed_response(format!("Failed to parse response: {}", e)))?;

    parsed
        .first_content()
        .map(str::to_string)
        .ok_or_else(|| GistError::malformed_response("Invalid API response format"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::ChatMessage;
    use tokio::io::{AsyncReadExt, AsyncWriteExt};
    use tokio::net::TcpListener;
    use tokio::task::JoinHandle;

    fn request() -> ChatRequest {
        ChatRequest {
            model: "gpt-4o-mini".to_string(),
            messages: vec![ChatMessage::system("sys"), ChatMessage::user("text")],
            temperature: 0.2,
            max_tokens: 100,
            presence_penalty: None,
            frequency_penalty: None,
        }
    }

    #[test]
    fn test_client_creation() {
        let client = OpenAiClient::from_config(&AppConfig::default()).unwrap();
        assert_eq!(client.url(), "https://api.openai.com/v1/chat/completions");
        assert_eq!(client.name(), "openai");
    }

    #[tokio::test]
    async fn test_empty_key_fails_before_network() {
        // Port 9 (discard) would fail with a transport error if contacted
        let client = OpenAiClient::new("http://127.0.0.1:9/chat/completions", Duration::from_secs(1))
            .unwrap();
        let err = client.complete(&request(), "  ").await.unwrap_err();
        assert!(matches!(err, GistError::Authentication(_)));
    }

    #[test]
    fn test_upstream_error_carries_message() {
        let body = r#"{"error":{"message":"Rate limit reached","type":"requests"}}"#;
        let err = upstream_error(StatusCode::TOO_MANY_REQUESTS, body);
        assert!(matches!(err, GistError::Transport(_)));
        assert!(err.to_string().contains("Rate limit reached"));
        assert!(err.to_string().contains("429"));
    }

    #[test]
    fn test_upstream_auth_error() {
        let body = r#"{"error":{"message":"Incorrect API key provided"}}"#;
        let err = upstream_error(StatusCode::UNAUTHORIZED, body);
        assert!(matches!(err, GistError::Authentication(ref m) if m == "Incorrect API key provided"));
    }

    #[test]
    fn test_upstream_error_without_body() {
        let err = upstream_error(StatusCode::BAD_GATEWAY, "<html>bad gateway</html>");
        assert!(err.to_string().contains("API request failed"));
    }

    #[test]
    fn test_parse_content() {
        let ok = r#"{"choices":[{"message":{"content":"<summary>X</summary>"}}]}"#;
        assert_eq!(parse_content(ok).unwrap(), "<summary>X</summary>");

        let missing = r#"{"choices":[]}"#;
        assert!(matches!(
            parse_content(missing),
            Err(GistError::MalformedResponse(_))
        ));

        assert!(matches!(
            parse_content("not json"),
            Err(GistError::MalformedResponse(_))
        ));
    }

    /// Accept one connection, answer with a canned reply and return the raw request
    async fn serve_once(status: &'static str, body: &'static str) -> (String, JoinHandle<String>) {
        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let url = format!("http://{}/v1/chat/completions", listener.local_addr().unwrap());

        let handle = tokio::spawn(async move {
            let (mut socket, _) = listener.accept().await.unwrap();
            let mut received = Vec::new();
            let mut buf = [0u8; 4096];
            loop {
                let n = socket.read(&mut buf).await.unwrap();
                if n == 0 {
                    break;
                }
                received.extend_from_slice(&buf[..n]);
                if let Some(head_end) = received.windows(4).position(|w| w == b"\r\n\r\n") {
                    let head = String::from_utf8_lossy(&received[..head_end]).to_lowercase();
                    let length = head
                        .lines()
                        .find_map(|line| line.strip_prefix("content-length:"))
                        .and_then(|v| v.trim().parse::<usize>().ok())
                        .unwrap_or(0);
                    if received.len() >= head_end + 4 + length {
                        break;
                    }
                }
            }

            let reply = format!(
                "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
                status,
                body.len(),
                body
            );
            socket.write_all(reply.as_bytes()).await.unwrap();
            socket.shutdown().await.ok();
            String::from_utf8(received).unwrap()
        });

        (url, handle)
    }

    fn split_request(raw: &str) -> (String, serde_json::Value) {
        let (head, body) = raw.split_once("\r\n\r\n").unwrap();
        (head.to_lowercase(), serde_json::from_str(body).unwrap())
    }

    fn close_to(value: &serde_json::Value, expected: f64) -> bool {
        value.as_f64().map_or(false, |v| (v - expected).abs() < 1e-6)
    }

    #[tokio::test]
    async fn test_complete_sends_bearer_key_and_body() {
        let (url, server) = serve_once(
            "200 OK",
            r#"{"choices":[{"message":{"role":"assistant","content":"<summary>done</summary>"}}]}"#,
        )
        .await;
        let client = OpenAiClient::new(url, Duration::from_secs(5)).unwrap();

        let mut req = request();
        req.model = "m".to_string();
        req.presence_penalty = Some(-0.2);
        req.frequency_penalty = Some(0.3);

        let content = client.complete(&req, "sk-abc").await.unwrap();
        assert_eq!(content, "<summary>done</summary>");

        let (head, body) = split_request(&server.await.unwrap());
        assert!(head.starts_with("post /v1/chat/completions "));
        assert!(head.contains("authorization: bearer sk-abc\r\n"));
        assert!(head.contains("content-type: application/json"));

        assert_eq!(body["model"], "m");
        assert_eq!(body["messages"][0]["role"], "system");
        assert_eq!(body["messages"][0]["content"], "sys");
        assert_eq!(body["messages"][1]["role"], "user");
        assert_eq!(body["messages"][1]["content"], "text");
        assert_eq!(body["max_tokens"], 100);
        assert!(close_to(&body["temperature"], 0.2));
        assert!(close_to(&body["presence_penalty"], -0.2));
        assert!(close_to(&body["frequency_penalty"], 0.3));
    }

    #[tokio::test]
    async fn test_complete_maps_unauthorized() {
        let (url, server) = serve_once(
            "401 Unauthorized",
            r#"{"error":{"message":"Incorrect API key provided","type":"invalid_request_error"}}"#,
        )
        .await;
        let client = OpenAiClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client.complete(&request(), "sk-wrong").await.unwrap_err();
        assert!(matches!(err, GistError::Authentication(ref m) if m == "Incorrect API key provided"));

        let (head, body) = split_request(&server.await.unwrap());
        assert!(head.contains("authorization: bearer sk-wrong\r\n"));
        assert!(body.get("presence_penalty").is_none());
    }

    #[tokio::test]
    async fn test_complete_maps_server_error() {
        let (url, server) = serve_once(
            "503 Service Unavailable",
            r#"{"error":{"message":"The engine is currently overloaded"}}"#,
        )
        .await;
        let client = OpenAiClient::new(url, Duration::from_secs(5)).unwrap();

        let err = client.complete(&request(), "sk-abc").await.unwrap_err();
        assert!(matches!(err, GistError::Transport(_)));
        assert!(err.to_string().contains("The engine is currently overloaded"));
        assert!(err.to_string().contains("503"));

        server.await.unwrap();
    }
}
