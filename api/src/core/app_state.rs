use std::sync::Arc;

use gitlab_context::GitLabClient;
use llm_service::{ChatModelConfig, ChatService};
use review_pipeline::{ReviewPipeline, notify::SlackWebhookClient};

use crate::error_handler::{AppError, AppResult};

/// Shared state for all HTTP handlers.
#[derive(Clone)]
pub struct AppState {
    /// Wired-up review pipeline (clients + record store).
    pub pipeline: Arc<ReviewPipeline>,
}

impl AppState {
    /// Load shared state from environment variables.
    ///
    /// * `GITLAB_API_BASE`   – optional, defaults to `https://gitlab.com/api/v4`
    /// * `GITLAB_TOKEN`      – required ("PRIVATE-TOKEN" PAT or project token)
    /// * `SLACK_WEBHOOK_URL` – required
    /// * `AI_*`              – see [`ChatModelConfig::from_env`]
    pub fn from_env() -> AppResult<Self> {
        let gitlab_api_base = std::env::var("GITLAB_API_BASE")
            .unwrap_or_else(|_| "https://gitlab.com/api/v4".into());
        let gitlab_token =
            std::env::var("GITLAB_TOKEN").map_err(|_| AppError::MissingEnv("GITLAB_TOKEN"))?;
        let slack_webhook_url = std::env::var("SLACK_WEBHOOK_URL")
            .map_err(|_| AppError::MissingEnv("SLACK_WEBHOOK_URL"))?;

        let gitlab = GitLabClient::new(gitlab_api_base, gitlab_token)?;
        let llm = ChatService::new(ChatModelConfig::from_env()?)?;
        let slack = SlackWebhookClient::new(slack_webhook_url)?;

        Ok(Self {
            pipeline: Arc::new(ReviewPipeline::new(gitlab, llm, slack)),
        })
    }
}
