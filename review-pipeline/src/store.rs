//! In-memory store for review records.
//!
//! One flat record per review id, last writer wins. Records are created when
//! a review is triggered and are never deleted; everything is lost on
//! restart, which is the intended lifecycle for this pipeline.

use std::collections::HashMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tokio::sync::RwLock;
use uuid::Uuid;

use gitlab_context::{FileDiff, MrDetails};

use crate::model::ReviewResult;

/// Generates a fresh review id for an incoming trigger request.
pub fn new_review_id() -> String {
    format!("review-{}", Uuid::new_v4())
}

/// Where a review currently is in its lifecycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ReviewStatus {
    /// Record created, pipeline not yet past the fetch stage.
    Pending,
    /// MR metadata and changes are stored.
    DiffFetched,
    /// AI review result is stored.
    Completed,
    /// Slack notification was delivered.
    Notified,
    /// Fetching MR data from GitLab failed.
    Failed,
    /// The AI review stage failed.
    ReviewFailed,
    /// The review completed but the Slack notification failed.
    NotifyFailed,
}

impl ReviewStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            ReviewStatus::Pending => "pending",
            ReviewStatus::DiffFetched => "diff-fetched",
            ReviewStatus::Completed => "completed",
            ReviewStatus::Notified => "notified",
            ReviewStatus::Failed => "failed",
            ReviewStatus::ReviewFailed => "review-failed",
            ReviewStatus::NotifyFailed => "notify-failed",
        }
    }
}

impl std::fmt::Display for ReviewStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// The flat record correlating all pipeline stages of one review.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReviewRecord {
    pub review_id: String,
    pub mr_url: String,
    pub project_path: String,
    pub mr_iid: u64,
    pub details: Option<MrDetails>,
    pub changes: Option<Vec<FileDiff>>,
    pub review: Option<ReviewResult>,
    pub status: ReviewStatus,
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl ReviewRecord {
    /// A fresh `pending` record for a just-triggered review.
    pub fn new(review_id: String, mr_url: String, project_path: String, mr_iid: u64) -> Self {
        let now = Utc::now();
        Self {
            review_id,
            mr_url,
            project_path,
            mr_iid,
            details: None,
            changes: None,
            review: None,
            status: ReviewStatus::Pending,
            error: None,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Shared in-memory review store.
///
/// A `HashMap` protected by a `RwLock`; cheap to clone and share across
/// handlers and background tasks.
#[derive(Debug, Clone, Default)]
pub struct ReviewStore {
    inner: Arc<RwLock<HashMap<String, ReviewRecord>>>,
}

impl ReviewStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Inserts (or replaces) a record under its review id.
    pub async fn insert(&self, record: ReviewRecord) {
        let mut map = self.inner.write().await;
        map.insert(record.review_id.clone(), record);
    }

    /// Returns a clone of the record, if present.
    pub async fn get(&self, review_id: &str) -> Option<ReviewRecord> {
        let map = self.inner.read().await;
        map.get(review_id).cloned()
    }

    /// Applies `f` to the record in place and bumps `updated_at`.
    ///
    /// Returns `false` when the id is unknown.
    pub async fn update<F>(&self, review_id: &str, f: F) -> bool
    where
        F: FnOnce(&mut ReviewRecord),
    {
        let mut map = self.inner.write().await;
        match map.get_mut(review_id) {
            Some(record) => {
                f(record);
                record.updated_at = Utc::now();
                true
            }
            None => false,
        }
    }

    /// Marks a record as failed with the given status and error text.
    pub async fn mark_failed(&self, review_id: &str, status: ReviewStatus, error: &str) -> bool {
        self.update(review_id, |record| {
            record.status = status;
            record.error = Some(error.to_string());
        })
        .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn review_ids_are_unique_and_prefixed() {
        let a = new_review_id();
        let b = new_review_id();
        assert!(a.starts_with("review-"));
        assert_ne!(a, b);
    }

    #[test]
    fn status_serializes_kebab_case() {
        let s = serde_json::to_string(&ReviewStatus::ReviewFailed).unwrap();
        assert_eq!(s, "\"review-failed\"");
        let s = serde_json::to_string(&ReviewStatus::DiffFetched).unwrap();
        assert_eq!(s, "\"diff-fetched\"");
    }

    #[tokio::test]
    async fn update_bumps_timestamp_and_reports_missing_ids() {
        let store = ReviewStore::new();
        let record = ReviewRecord::new(
            "review-1".into(),
            "https://gitlab.com/a/b/-/merge_requests/1".into(),
            "a/b".into(),
            1,
        );
        let created = record.created_at;
        store.insert(record).await;

        let found = store
            .update("review-1", |r| r.status = ReviewStatus::DiffFetched)
            .await;
        assert!(found);

        let record = store.get("review-1").await.unwrap();
        assert_eq!(record.status, ReviewStatus::DiffFetched);
        assert!(record.updated_at >= created);

        let found = store.update("review-2", |_| {}).await;
        assert!(!found);
        assert!(store.get("review-2").await.is_none());
    }

    #[tokio::test]
    async fn last_writer_wins_on_reinsert() {
        let store = ReviewStore::new();
        let first = ReviewRecord::new("review-1".into(), "u1".into(), "a/b".into(), 1);
        let mut second = ReviewRecord::new("review-1".into(), "u2".into(), "a/b".into(), 1);
        second.status = ReviewStatus::Completed;

        store.insert(first).await;
        store.insert(second).await;

        let record = store.get("review-1").await.unwrap();
        assert_eq!(record.mr_url, "u2");
        assert_eq!(record.status, ReviewStatus::Completed);
    }
}
