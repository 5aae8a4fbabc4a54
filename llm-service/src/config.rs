//! Configuration for the chat-completion client.

use crate::error_handler::{Result, env_opt_u32, must_env};

/// Configuration for a chat model invocation.
///
/// `endpoint` is the API base including any version path; the client appends
/// only `/chat/completions` to it.
#[derive(Debug, Clone)]
pub struct ChatModelConfig {
    /// Model identifier string (e.g., `"gpt-4o"`).
    pub model: String,

    /// API base URL (e.g., `"https://api.openai.com/v1"`).
    pub endpoint: String,

    /// Optional API key sent as a `Bearer` token.
    pub api_key: Option<String>,

    /// Maximum number of tokens to generate.
    pub max_tokens: Option<u32>,

    /// Sampling temperature (low values keep review output stable).
    pub temperature: Option<f32>,

    /// Nucleus sampling parameter.
    pub top_p: Option<f32>,

    /// Optional request timeout (in seconds).
    pub timeout_secs: Option<u64>,
}

impl ChatModelConfig {
    /// Loads the review-model configuration from environment variables.
    ///
    /// * `AI_BASE_URL`   – optional, defaults to `https://api.openai.com/v1`
    /// * `AI_API_KEY`    – required
    /// * `AI_MODEL`      – required
    /// * `AI_MAX_TOKENS` – optional, defaults to 4000
    ///
    /// Temperature is pinned at 0.3 so review output stays stable.
    ///
    /// # Errors
    /// Returns [`crate::error_handler::ConfigError`] wrapped in the crate
    /// error when a required variable is missing or a number fails to parse.
    pub fn from_env() -> Result<Self> {
        let endpoint = std::env::var("AI_BASE_URL")
            .unwrap_or_else(|_| "https://api.openai.com/v1".to_string());
        let api_key = must_env("AI_API_KEY")?;
        let model = must_env("AI_MODEL")?;
        let max_tokens = env_opt_u32("AI_MAX_TOKENS")?.or(Some(4000));

        Ok(Self {
            model,
            endpoint,
            api_key: Some(api_key),
            max_tokens,
            temperature: Some(0.3),
            top_p: None,
            timeout_secs: Some(60),
        })
    }
}
