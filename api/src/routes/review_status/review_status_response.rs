use chrono::{DateTime, Utc};
use review_pipeline::{ReviewRecord, ReviewResult, ReviewStatus};
use serde::Serialize;

/// Status view of one review record.
///
/// Deliberately omits the stored diff text; records can carry large diffs
/// and the status endpoint only reports progress and outcome.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ReviewStatusResponse {
    pub review_id: String,
    pub mr_url: String,
    pub status: ReviewStatus,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mr_title: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub review: Option<ReviewResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl From<ReviewRecord> for ReviewStatusResponse {
    fn from(record: ReviewRecord) -> Self {
        Self {
            review_id: record.review_id,
            mr_url: record.mr_url,
            status: record.status,
            mr_title: record.details.map(|d| d.title),
            review: record.review,
            error: record.error,
            created_at: record.created_at,
            updated_at: record.updated_at,
        }
    }
}
