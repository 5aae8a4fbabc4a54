//! GitLab REST v4 client for merge-request metadata and changes.
//!
//! Endpoints used:
//!   * GET /projects/:id/merge_requests/:iid
//!   * GET /projects/:id/merge_requests/:iid/changes

use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;
use tracing::debug;

use crate::errors::GitLabContextResult;
use crate::types::{FileDiff, MergeRequestRef, MrAuthor, MrDetails};

/// GitLab HTTP client wrapper.
#[derive(Debug, Clone)]
pub struct GitLabClient {
    http: Client,
    base_api: String, // e.g. "https://gitlab.com/api/v4"
    token: String,    // "PRIVATE-TOKEN"
}

impl GitLabClient {
    /// Constructs a GitLab client with its own HTTP instance and auth token.
    pub fn new(base_api: impl Into<String>, token: impl Into<String>) -> GitLabContextResult<Self> {
        let base_api = base_api.into();
        debug!("Creating GitLabClient with base_api={}", base_api);

        let http = Client::builder().user_agent("mr-notify/0.1").build()?;

        Ok(Self {
            http,
            base_api,
            token: token.into(),
        })
    }

    /// Fetches merge request metadata (title, description, branches, author).
    pub async fn get_merge_request(&self, mr: &MergeRequestRef) -> GitLabContextResult<MrDetails> {
        let url = format!(
            "{}/projects/{}/merge_requests/{}",
            self.base_api,
            urlencoding::encode(&mr.project),
            mr.iid
        );
        debug!("GitLab get_merge_request: {}", url);

        let resp: GitLabMr = self
            .http
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let author = MrAuthor {
            id: resp.author.id,
            username: resp.author.username,
            name: resp.author.name,
            web_url: resp.author.web_url,
            avatar_url: resp.author.avatar_url,
        };

        Ok(MrDetails {
            id: resp.id,
            iid: resp.iid,
            title: resp.title,
            description: resp.description.unwrap_or_default(),
            state: resp.state,
            source_branch: resp.source_branch,
            target_branch: resp.target_branch,
            author,
            created_at: resp.created_at,
            updated_at: resp.updated_at,
            web_url: resp.web_url,
        })
    }

    /// Fetches the per-file changes of a merge request.
    ///
    /// Files without diff text (binary or suppressed by the server) come back
    /// with an empty `diff` string.
    pub async fn get_changes(&self, mr: &MergeRequestRef) -> GitLabContextResult<Vec<FileDiff>> {
        let url = format!(
            "{}/projects/{}/merge_requests/{}/changes",
            self.base_api,
            urlencoding::encode(&mr.project),
            mr.iid
        );
        debug!("GitLab get_changes: {}", url);

        let resp: GitLabMrChanges = self
            .http
            .get(url)
            .header("PRIVATE-TOKEN", &self.token)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        let changes = resp
            .changes
            .into_iter()
            .map(|c| FileDiff {
                old_path: c.old_path,
                new_path: c.new_path,
                new_file: c.new_file,
                renamed_file: c.renamed_file,
                deleted_file: c.deleted_file,
                diff: c.diff.unwrap_or_default(),
            })
            .collect();

        Ok(changes)
    }
}

/// GitLab MR response (subset).
#[derive(Debug, Deserialize)]
struct GitLabMr {
    id: u64,
    iid: u64,
    title: String,
    description: Option<String>,
    state: String,
    source_branch: String,
    target_branch: String,
    created_at: DateTime<Utc>,
    updated_at: DateTime<Utc>,
    web_url: String,
    author: GitLabUser,
}

#[derive(Debug, Deserialize)]
struct GitLabUser {
    id: u64,
    username: String,
    name: String,
    web_url: Option<String>,
    avatar_url: Option<String>,
}

#[derive(Debug, Deserialize)]
struct GitLabMrChanges {
    #[serde(default)]
    changes: Vec<GitLabMrChange>,
}

#[derive(Debug, Deserialize)]
struct GitLabMrChange {
    old_path: String,
    new_path: String,
    new_file: bool,
    renamed_file: bool,
    deleted_file: bool,
    #[serde(default)]
    diff: Option<String>, // unified diff; None for binary/too large
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn changes_payload_tolerates_missing_diff() {
        let json = r#"{
            "changes": [
                {
                    "old_path": "assets/logo.png",
                    "new_path": "assets/logo.png",
                    "new_file": false,
                    "renamed_file": false,
                    "deleted_file": false
                },
                {
                    "old_path": "src/main.rs",
                    "new_path": "src/main.rs",
                    "new_file": false,
                    "renamed_file": false,
                    "deleted_file": false,
                    "diff": "@@ -1 +1 @@\n-old\n+new\n"
                }
            ]
        }"#;

        let parsed: GitLabMrChanges = serde_json::from_str(json).unwrap();
        assert_eq!(parsed.changes.len(), 2);
        assert!(parsed.changes[0].diff.is_none());
        assert!(parsed.changes[1].diff.as_deref().unwrap().contains("+new"));
    }

    #[test]
    fn changes_payload_tolerates_missing_list() {
        let parsed: GitLabMrChanges = serde_json::from_str("{}").unwrap();
        assert!(parsed.changes.is_empty());
    }
}
