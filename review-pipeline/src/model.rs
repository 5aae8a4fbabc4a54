//! Structured review result and parsing of raw model output.
//!
//! The model is asked for a JSON object but may wrap it in code fences or
//! surrounding prose; parsing is tolerant and never fails the pipeline —
//! unparseable output degrades to a summary-only result.

use serde::{Deserialize, Serialize};
use tracing::warn;

/// Structured outcome of an AI review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewResult {
    pub summary: String,
    #[serde(default)]
    pub issues: Vec<ReviewIssue>,
    #[serde(default)]
    pub recommendations: Vec<String>,
}

impl ReviewResult {
    /// Result used when the model response carries no parseable JSON:
    /// the raw text becomes the summary.
    fn from_raw(raw: &str) -> Self {
        Self {
            summary: raw.trim().to_string(),
            issues: Vec::new(),
            recommendations: Vec::new(),
        }
    }
}

/// A single finding reported by the review.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReviewIssue {
    /// Category label, e.g. "style", "logic", "best-practice".
    #[serde(rename = "type")]
    pub kind: String,
    pub severity: Severity,
    pub file: String,
    pub message: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub suggestion: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Severity {
    High,
    Medium,
    Low,
}

impl Severity {
    /// Colored marker used in the Slack summary.
    pub fn marker(&self) -> &'static str {
        match self {
            Severity::High => "🔴",
            Severity::Medium => "🟡",
            Severity::Low => "🟢",
        }
    }
}

/// Parses raw chat-completion text into a [`ReviewResult`].
///
/// Strips code fences, extracts the outermost `{...}` block and deserializes
/// it. Any failure falls back to a summary-only result built from the raw
/// text, so a misbehaving model never aborts the review.
pub fn parse_review_output(raw: &str) -> ReviewResult {
    let clean = cleanup_json_like(raw);

    let Some(json) = extract_json_object(&clean) else {
        warn!("review output carries no JSON object, keeping raw text as summary");
        return ReviewResult::from_raw(raw);
    };

    match serde_json::from_str::<ReviewResult>(json) {
        Ok(result) => result,
        Err(e) => {
            warn!(error = %e, "failed to parse review output JSON, falling back to raw text");
            ReviewResult::from_raw(raw)
        }
    }
}

/// Trim common code-fence wrappers around JSON.
fn cleanup_json_like(s: &str) -> String {
    let mut t = s.trim().to_string();
    if t.starts_with("```") {
        t = t
            .trim_start_matches("```json")
            .trim_start_matches("```")
            .to_string();
        if let Some(pos) = t.rfind("```") {
            t.truncate(pos);
        }
    }
    t.trim().to_string()
}

/// Slice from the first `{` to the last `}`, if both exist in order.
fn extract_json_object(s: &str) -> Option<&str> {
    let start = s.find('{')?;
    let end = s.rfind('}')?;
    if end < start {
        return None;
    }
    Some(&s[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_plain_json() {
        let raw = r#"{
            "summary": "looks fine",
            "issues": [
                {
                    "type": "logic",
                    "severity": "high",
                    "file": "src/auth.rs",
                    "message": "token is never checked",
                    "suggestion": "validate before use"
                }
            ],
            "recommendations": ["add tests"]
        }"#;

        let result = parse_review_output(raw);
        assert_eq!(result.summary, "looks fine");
        assert_eq!(result.issues.len(), 1);
        assert_eq!(result.issues[0].severity, Severity::High);
        assert_eq!(result.issues[0].kind, "logic");
        assert_eq!(result.recommendations, vec!["add tests".to_string()]);
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"summary\": \"ok\", \"issues\": [], \"recommendations\": []}\n```";
        let result = parse_review_output(raw);
        assert_eq!(result.summary, "ok");
        assert!(result.issues.is_empty());
    }

    #[test]
    fn parses_json_embedded_in_prose() {
        let raw = "Here is the review you asked for:\n{\"summary\": \"ok\"}\nHope this helps!";
        let result = parse_review_output(raw);
        assert_eq!(result.summary, "ok");
    }

    #[test]
    fn missing_lists_default_to_empty() {
        let result = parse_review_output(r#"{"summary": "ok"}"#);
        assert!(result.issues.is_empty());
        assert!(result.recommendations.is_empty());
    }

    #[test]
    fn falls_back_to_raw_text_without_json() {
        let raw = "The change looks reasonable overall.";
        let result = parse_review_output(raw);
        assert_eq!(result.summary, raw);
        assert!(result.issues.is_empty());
    }

    #[test]
    fn falls_back_on_malformed_json() {
        let raw = "{\"summary\": \"ok\", \"issues\": [{\"severity\": \"catastrophic\"}]}";
        let result = parse_review_output(raw);
        // Unknown severity makes the strict parse fail; the raw text survives.
        assert_eq!(result.summary, raw);
    }
}
