//! Normalized merge-request data shared with the pipeline stages.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A merge request addressed by project path and IID.
///
/// * `project` – "group/project"; nested subgroups are allowed.
/// * `iid`     – MR IID, unique within the project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct MergeRequestRef {
    pub project: String,
    pub iid: u64,
}

/// Minimal author info about the human who created the MR.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrAuthor {
    pub id: u64,
    pub username: String,
    pub name: String,
    pub web_url: Option<String>,
    pub avatar_url: Option<String>,
}

/// High-level metadata for a merge request (title, state, URLs).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct MrDetails {
    pub id: u64,
    pub iid: u64,
    pub title: String,
    /// Empty string when the MR has no description.
    pub description: String,
    pub state: String,
    pub source_branch: String,
    pub target_branch: String,
    pub author: MrAuthor,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub web_url: String,
}

/// One changed file in the MR, as reported by the `/changes` endpoint.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileDiff {
    pub old_path: String,
    pub new_path: String,
    pub new_file: bool,
    pub renamed_file: bool,
    pub deleted_file: bool,
    /// Unified diff text; empty for binary or suppressed diffs.
    pub diff: String,
}
