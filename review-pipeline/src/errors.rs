//! Crate-wide error hierarchy for the review pipeline.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type PipelineResult<T> = Result<T, PipelineError>;

/// Root error type for the review-pipeline crate.
#[derive(Debug, Error)]
pub enum PipelineError {
    /// GitLab fetch layer failure.
    #[error(transparent)]
    GitLab(#[from] gitlab_context::GitLabContextError),

    /// Chat-completion layer failure.
    #[error(transparent)]
    Llm(#[from] llm_service::LlmServiceError),

    /// Slack webhook failure.
    #[error(transparent)]
    Notify(#[from] crate::notify::NotifyError),

    /// A stage was asked to continue a review the store does not know.
    #[error("review record not found: {0}")]
    RecordNotFound(String),

    /// The record exists but carries no fetched MR data yet.
    #[error("no merge request data stored for review {0}")]
    MissingMrData(String),

    /// The record exists but carries no review result yet.
    #[error("no review result stored for review {0}")]
    MissingReview(String),
}
