use serde::Serialize;

/// Response body returned after scheduling a merge-request review.
#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReviewResponse {
    /// Human-readable message describing what happened.
    pub message: String,
    /// Identifier correlating the asynchronous pipeline stages.
    pub review_id: String,
    /// Echo of the triggered merge-request URL.
    pub mr_url: String,
}
