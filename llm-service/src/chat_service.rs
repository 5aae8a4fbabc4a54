//! Chat-completions service for review text generation.
//!
//! Minimal, non-streaming client around an OpenAI-compatible REST API:
//! - POST {endpoint}/chat/completions — chat completion
//!
//! Constructor validation:
//! - `cfg.api_key` must be present
//! - `cfg.endpoint` must start with http:// or https://
//!
//! Errors are normalized via the unified types in `error_handler`.

use std::time::{Duration, Instant};

use reqwest::header;
use serde::{Deserialize, Serialize};
use tracing::{debug, error, info};

use crate::{
    config::ChatModelConfig,
    error_handler::{LlmServiceError, make_snippet},
};

/// Thin client for an OpenAI-compatible chat API.
///
/// Constructed from a complete [`ChatModelConfig`]. Internally keeps a
/// preconfigured `reqwest::Client` (with timeout and default headers).
#[derive(Debug)]
pub struct ChatService {
    client: reqwest::Client,
    cfg: ChatModelConfig,
    url_chat: String,
}

impl ChatService {
    /// Creates a new [`ChatService`] from the given config.
    ///
    /// Validates the API key and endpoint scheme, then builds an HTTP client
    /// with default headers and a configurable timeout.
    ///
    /// # Errors
    /// - [`LlmServiceError::MissingApiKey`] if `cfg.api_key` is `None`
    /// - [`LlmServiceError::InvalidEndpoint`] if `cfg.endpoint` is invalid
    /// - [`LlmServiceError::HttpTransport`] if the HTTP client cannot be built
    pub fn new(cfg: ChatModelConfig) -> Result<Self, LlmServiceError> {
        let api_key = cfg.api_key.clone().ok_or(LlmServiceError::MissingApiKey)?;

        let endpoint = cfg.endpoint.trim();
        if endpoint.is_empty()
            || !(endpoint.starts_with("http://") || endpoint.starts_with("https://"))
        {
            return Err(LlmServiceError::InvalidEndpoint(cfg.endpoint.clone()));
        }

        let timeout = cfg
            .timeout_secs
            .map(Duration::from_secs)
            .unwrap_or_else(|| Duration::from_secs(60));

        let mut headers = header::HeaderMap::new();
        headers.insert(
            header::AUTHORIZATION,
            header::HeaderValue::from_str(&format!("Bearer {}", api_key))
                .map_err(|e| LlmServiceError::Decode(format!("invalid API key header: {e}")))?,
        );
        headers.insert(
            header::CONTENT_TYPE,
            header::HeaderValue::from_static("application/json"),
        );

        let client = reqwest::Client::builder()
            .timeout(timeout)
            .default_headers(headers)
            .build()?;

        let base = endpoint.trim_end_matches('/').to_string();
        let url_chat = format!("{}/chat/completions", base);

        info!(
            model = %cfg.model,
            endpoint = %cfg.endpoint,
            timeout_secs = cfg.timeout_secs.unwrap_or(60),
            "ChatService initialized"
        );

        Ok(Self {
            client,
            cfg,
            url_chat,
        })
    }

    /// Performs a **non-streaming** chat completion request.
    ///
    /// Minimal `messages` array:
    /// - optional system message (if provided)
    /// - user message with `prompt`.
    ///
    /// Mapped options from config: `model`, `temperature`, `top_p`,
    /// `max_tokens`.
    ///
    /// # Errors
    /// - [`LlmServiceError::HttpStatus`] for non-2xx responses
    /// - [`LlmServiceError::HttpTransport`] for client/network failures
    /// - [`LlmServiceError::Decode`] if the JSON cannot be parsed
    /// - [`LlmServiceError::EmptyChoices`] if no choices are returned
    pub async fn generate(
        &self,
        prompt: &str,
        system: Option<&str>,
    ) -> Result<String, LlmServiceError> {
        let started = Instant::now();
        let body = ChatCompletionRequest::from_cfg(&self.cfg, prompt, system);

        debug!(
            model = %self.cfg.model,
            endpoint = %self.cfg.endpoint,
            prompt_len = prompt.len(),
            has_system = system.is_some(),
            "POST {}", self.url_chat
        );

        let resp = self.client.post(&self.url_chat).json(&body).send().await?;

        if !resp.status().is_success() {
            let status = resp.status();
            let url = self.url_chat.clone();
            let text = resp.text().await.unwrap_or_default();
            let snippet = make_snippet(&text);

            error!(
                %status,
                %url,
                %snippet,
                model = %self.cfg.model,
                latency_ms = started.elapsed().as_millis() as u64,
                "chat completions endpoint returned non-success status"
            );

            return Err(LlmServiceError::HttpStatus {
                status,
                url,
                snippet,
            });
        }

        let out: ChatCompletionResponse = match resp.json().await {
            Ok(v) => v,
            Err(e) => {
                error!(
                    error = %e,
                    model = %self.cfg.model,
                    latency_ms = started.elapsed().as_millis() as u64,
                    "failed to decode chat completions response"
                );
                return Err(LlmServiceError::Decode(format!(
                    "serde error: {e}; expected `choices[0].message.content`"
                )));
            }
        };

        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .ok_or(LlmServiceError::EmptyChoices)?;

        info!(
            model = %self.cfg.model,
            latency_ms = started.elapsed().as_millis() as u64,
            "chat completion completed"
        );

        Ok(content)
    }
}

/* ===========================================================================
HTTP payloads
======================================================================== */

/// Minimal request body for `/chat/completions` (non-streaming).
#[derive(Debug, Serialize)]
struct ChatCompletionRequest<'a> {
    model: &'a str,
    messages: Vec<ChatMessage<'a>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    temperature: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    top_p: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    max_tokens: Option<u32>,
}

impl<'a> ChatCompletionRequest<'a> {
    /// Builds a minimal chat request from config, `prompt`, and an optional
    /// system message.
    fn from_cfg(cfg: &'a ChatModelConfig, prompt: &'a str, system: Option<&'a str>) -> Self {
        let mut messages = Vec::with_capacity(2);
        if let Some(sys) = system {
            messages.push(ChatMessage {
                role: "system",
                content: sys,
            });
        }
        messages.push(ChatMessage {
            role: "user",
            content: prompt,
        });

        Self {
            model: &cfg.model,
            messages,
            temperature: cfg.temperature,
            top_p: cfg.top_p,
            max_tokens: cfg.max_tokens,
        }
    }
}

/// Chat message for the API.
#[derive(Debug, Serialize)]
struct ChatMessage<'a> {
    /// One of: "system" | "user" | "assistant".
    role: &'a str,
    content: &'a str,
}

/// Minimal response for `/chat/completions`.
#[derive(Debug, Deserialize)]
struct ChatCompletionResponse {
    choices: Vec<ChatChoice>,
}

#[derive(Debug, Deserialize)]
struct ChatChoice {
    message: ChatMessageOut,
}

#[derive(Debug, Deserialize)]
struct ChatMessageOut {
    content: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cfg() -> ChatModelConfig {
        ChatModelConfig {
            model: "test-model".into(),
            endpoint: "https://example.test/v1".into(),
            api_key: Some("k".into()),
            max_tokens: Some(4000),
            temperature: Some(0.3),
            top_p: None,
            timeout_secs: Some(60),
        }
    }

    #[test]
    fn request_puts_system_message_first() {
        let c = cfg();
        let req = ChatCompletionRequest::from_cfg(&c, "review this", Some("you are a reviewer"));
        assert_eq!(req.messages.len(), 2);
        assert_eq!(req.messages[0].role, "system");
        assert_eq!(req.messages[1].role, "user");
    }

    #[test]
    fn request_skips_unset_sampling_fields() {
        let c = cfg();
        let req = ChatCompletionRequest::from_cfg(&c, "hi", None);
        let v = serde_json::to_value(&req).unwrap();
        assert!(v.get("top_p").is_none());
        assert_eq!(v["temperature"], serde_json::json!(0.3));
        assert_eq!(v["max_tokens"], serde_json::json!(4000));
    }

    #[test]
    fn response_content_is_extracted() {
        let json = r#"{"choices":[{"message":{"role":"assistant","content":"{\"summary\":\"ok\"}"}}]}"#;
        let out: ChatCompletionResponse = serde_json::from_str(json).unwrap();
        let content = out
            .choices
            .into_iter()
            .find_map(|c| c.message.content)
            .unwrap();
        assert!(content.contains("summary"));
    }

    #[test]
    fn rejects_missing_api_key() {
        let mut c = cfg();
        c.api_key = None;
        assert!(matches!(
            ChatService::new(c),
            Err(LlmServiceError::MissingApiKey)
        ));
    }

    #[test]
    fn rejects_non_http_endpoint() {
        let mut c = cfg();
        c.endpoint = "ftp://example.test".into();
        assert!(matches!(
            ChatService::new(c),
            Err(LlmServiceError::InvalidEndpoint(_))
        ));
    }
}
