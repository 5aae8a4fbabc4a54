//! Slack webhook publishing for finished reviews.
//!
//! Formats the structured review into one text block and posts it as
//! `{ "reviewContent": ... }`, the shape a Slack workflow webhook consumes.

use reqwest::Client;
use serde::Serialize;
use thiserror::Error;
use tracing::debug;

use crate::model::ReviewResult;

/// How many issues / recommendations make it into the Slack message.
const MAX_ISSUES_SHOWN: usize = 5;
const MAX_RECOMMENDATIONS_SHOWN: usize = 3;

const SECTION_RULE: &str = "━━━━━━━━━━━━━━━━━━━━";

/// Errors raised while delivering the Slack notification.
#[derive(Debug, Error)]
pub enum NotifyError {
    /// Webhook endpoint answered with a non-2xx status.
    #[error("slack webhook returned HTTP {status}: {snippet}")]
    HttpStatus { status: u16, snippet: String },

    /// Network/transport failure.
    #[error("transport error: {0}")]
    Transport(#[from] reqwest::Error),
}

/// Thin client around the Slack incoming-webhook URL.
#[derive(Debug, Clone)]
pub struct SlackWebhookClient {
    http: Client,
    webhook_url: String,
}

impl SlackWebhookClient {
    pub fn new(webhook_url: impl Into<String>) -> Result<Self, NotifyError> {
        let http = Client::builder().user_agent("mr-notify/0.1").build()?;
        Ok(Self {
            http,
            webhook_url: webhook_url.into(),
        })
    }

    /// Posts one preformatted review summary to the webhook.
    pub async fn send(&self, review_content: &str) -> Result<(), NotifyError> {
        debug!(
            len = review_content.len(),
            "posting review summary to Slack webhook"
        );

        let payload = SlackPayload { review_content };
        let resp = self
            .http
            .post(&self.webhook_url)
            .json(&payload)
            .send()
            .await?;

        if !resp.status().is_success() {
            let status = resp.status().as_u16();
            let text = resp.text().await.unwrap_or_default();
            let snippet: String = text.chars().take(240).collect();
            return Err(NotifyError::HttpStatus { status, snippet });
        }

        Ok(())
    }
}

/// Slack workflow-webhook payload.
#[derive(Debug, Serialize)]
struct SlackPayload<'a> {
    #[serde(rename = "reviewContent")]
    review_content: &'a str,
}

/// Builds the notification text for a completed review.
pub fn build_review_message(
    review_id: &str,
    mr_url: &str,
    mr_title: &str,
    result: &ReviewResult,
) -> String {
    let mut msg = String::new();

    msg.push_str("🤖 *AI Code Review finished*\n\n");
    msg.push_str(&format!("📋 *MR title:* {mr_title}\n"));
    msg.push_str(&format!("🔗 *MR link:* {mr_url}\n"));
    msg.push_str(&format!("🆔 *Review ID:* {review_id}\n\n"));
    msg.push_str(SECTION_RULE);
    msg.push_str("\n\n");
    msg.push_str(&format!("📊 *Summary:*\n{}\n\n", result.summary));

    if result.issues.is_empty() {
        msg.push_str("✅ *No obvious issues found*\n\n");
    } else {
        msg.push_str(&format!(
            "⚠️ *{} issue(s) found:*\n\n",
            result.issues.len()
        ));

        for (idx, issue) in result.issues.iter().take(MAX_ISSUES_SHOWN).enumerate() {
            msg.push_str(&format!(
                "{}. {} *{}*\n",
                idx + 1,
                issue.severity.marker(),
                issue.kind
            ));
            msg.push_str(&format!("   📁 File: {}\n", issue.file));
            msg.push_str(&format!("   💬 {}\n", issue.message));
            if let Some(suggestion) = &issue.suggestion {
                msg.push_str(&format!("   💡 Suggestion: {suggestion}\n"));
            }
            msg.push('\n');
        }

        if result.issues.len() > MAX_ISSUES_SHOWN {
            msg.push_str(&format!(
                "_... {} more issues_\n\n",
                result.issues.len() - MAX_ISSUES_SHOWN
            ));
        }
    }

    if !result.recommendations.is_empty() {
        msg.push_str(SECTION_RULE);
        msg.push_str("\n\n💡 *Recommendations:*\n");
        for (idx, rec) in result
            .recommendations
            .iter()
            .take(MAX_RECOMMENDATIONS_SHOWN)
            .enumerate()
        {
            msg.push_str(&format!("{}. {rec}\n", idx + 1));
        }
    }

    msg
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{ReviewIssue, Severity};

    fn issue(n: usize, severity: Severity) -> ReviewIssue {
        ReviewIssue {
            kind: "logic".to_string(),
            severity,
            file: format!("src/file{n}.rs"),
            message: format!("problem {n}"),
            suggestion: (n % 2 == 0).then(|| format!("fix {n}")),
        }
    }

    #[test]
    fn message_carries_header_and_summary() {
        let result = ReviewResult {
            summary: "solid change".into(),
            issues: vec![],
            recommendations: vec![],
        };
        let msg = build_review_message("review-1", "https://gitlab.com/x", "Fix crash", &result);

        assert!(msg.contains("*MR title:* Fix crash"));
        assert!(msg.contains("*Review ID:* review-1"));
        assert!(msg.contains("solid change"));
        assert!(msg.contains("No obvious issues found"));
    }

    #[test]
    fn message_caps_issues_at_five() {
        let result = ReviewResult {
            summary: "s".into(),
            issues: (0..8).map(|n| issue(n, Severity::Medium)).collect(),
            recommendations: vec![],
        };
        let msg = build_review_message("review-1", "u", "t", &result);

        assert!(msg.contains("8 issue(s) found"));
        assert!(msg.contains("src/file4.rs"));
        assert!(!msg.contains("src/file5.rs"));
        assert!(msg.contains("_... 3 more issues_"));
    }

    #[test]
    fn severity_markers_differ() {
        let result = ReviewResult {
            summary: "s".into(),
            issues: vec![issue(0, Severity::High), issue(1, Severity::Low)],
            recommendations: vec![],
        };
        let msg = build_review_message("review-1", "u", "t", &result);

        assert!(msg.contains("🔴"));
        assert!(msg.contains("🟢"));
    }

    #[test]
    fn recommendations_capped_at_three() {
        let result = ReviewResult {
            summary: "s".into(),
            issues: vec![],
            recommendations: (0..5).map(|n| format!("rec {n}")).collect(),
        };
        let msg = build_review_message("review-1", "u", "t", &result);

        assert!(msg.contains("rec 2"));
        assert!(!msg.contains("rec 3"));
    }

    #[test]
    fn payload_uses_review_content_key() {
        let payload = SlackPayload {
            review_content: "hello",
        };
        let v = serde_json::to_value(&payload).unwrap();
        assert_eq!(v["reviewContent"], serde_json::json!("hello"));
    }
}
