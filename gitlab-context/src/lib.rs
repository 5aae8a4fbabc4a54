//! GitLab-facing layer of the review pipeline.
//!
//! Responsibilities:
//!   * parsing merge-request web URLs into `(project path, iid)`
//!   * fetching MR metadata and file changes over the REST v4 API
//!   * exposing normalized types consumed by the pipeline stages.

pub mod client;
pub mod errors;
pub mod types;
pub mod url;

pub use client::GitLabClient;
pub use errors::{GitLabContextError, GitLabContextResult};
pub use types::{FileDiff, MergeRequestRef, MrAuthor, MrDetails};
pub use url::parse_mr_url;
