//! Crate-wide error hierarchy for gitlab-context.

use thiserror::Error;

/// Convenient alias for crate-wide results.
pub type GitLabContextResult<T> = Result<T, GitLabContextError>;

/// Root error type for the gitlab-context crate.
#[derive(Debug, Error)]
pub enum GitLabContextError {
    /// GitLab API related failure.
    #[error(transparent)]
    Api(#[from] GitLabApiError),

    /// Merge-request URL could not be understood.
    #[error(transparent)]
    Url(#[from] MrUrlError),
}

/// API-level error used inside the client layer.
#[derive(Debug, Error)]
pub enum GitLabApiError {
    /// Unauthorized (HTTP 401).
    #[error("unauthorized")]
    Unauthorized,

    /// Forbidden (HTTP 403).
    #[error("forbidden")]
    Forbidden,

    /// Not found (HTTP 404).
    #[error("not found")]
    NotFound,

    /// Rate limited (HTTP 429).
    #[error("rate limited")]
    RateLimited {
        /// Optional `Retry-After` hint in seconds when available.
        retry_after_secs: Option<u64>,
    },

    /// Gateway / server error (HTTP 5xx).
    #[error("server error: status {0}")]
    Server(u16),

    /// Other HTTP status (non-2xx) not covered by specific variants.
    #[error("http status error: status {0}")]
    HttpStatus(u16),

    /// Timeout at transport level.
    #[error("timeout")]
    Timeout,

    /// Network/transport failure without HTTP status (DNS/connect/reset).
    #[error("network error: {0}")]
    Network(String),

    /// Unexpected/invalid shape of an API response.
    #[error("invalid api response: {0}")]
    InvalidResponse(String),
}

/// Merge-request URL parsing errors.
#[derive(Debug, Error)]
pub enum MrUrlError {
    /// The URL does not point at a GitLab merge request at all.
    #[error("not a GitLab merge request URL: {0}")]
    NotMergeRequestUrl(String),

    /// The URL looks GitLab-ish but project path / iid could not be extracted.
    #[error("could not extract project path and iid from URL: {0}")]
    Unrecognized(String),
}

// ===== Conversions for `?` ergonomics at the crate root =====

impl From<reqwest::Error> for GitLabContextError {
    fn from(e: reqwest::Error) -> Self {
        GitLabContextError::Api(GitLabApiError::from(e))
    }
}

// ===== Mapping from reqwest::Error into GitLabApiError =====

impl From<reqwest::Error> for GitLabApiError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_timeout() {
            return GitLabApiError::Timeout;
        }

        if let Some(status) = e.status() {
            let code = status.as_u16();
            return match code {
                401 => GitLabApiError::Unauthorized,
                403 => GitLabApiError::Forbidden,
                404 => GitLabApiError::NotFound,
                429 => GitLabApiError::RateLimited {
                    retry_after_secs: None,
                },
                500..=599 => GitLabApiError::Server(code),
                _ => GitLabApiError::HttpStatus(code),
            };
        }

        GitLabApiError::Network(e.to_string())
    }
}
