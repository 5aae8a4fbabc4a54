use serde::Deserialize;

/// Request body for triggering a merge-request review.
///
/// Sent by a chat-ops bot or a manual curl call.
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TriggerReviewRequest {
    /// Web URL of the GitLab merge request to review.
    pub mr_url: String,
}
