//! Public entry for the merge-request review pipeline.
//!
//! Single high-level type to run the whole pipeline for a triggered review:
//!
//! 1) **Fetch stage — GitLab I/O**
//!    - Fetch MR metadata (title, description, author, branches)
//!    - Fetch per-file changes
//!    - Store both on the review record
//!
//! 2) **Review stage — chat completion**
//!    - Detect the project type from the project path
//!    - Assemble system/user prompts within the diff budget
//!    - Call the chat endpoint and parse the structured result
//!
//! 3) **Notify stage — Slack webhook**
//!    - Format the review summary
//!    - Post it to the configured webhook
//!
//! Stages communicate only through the shared [`store::ReviewStore`]; each
//! one loads the record, does its I/O and writes back data plus a status.
//! A failed stage records its error on the record and stops the run. The
//! pipeline uses `tracing` for stage logging and avoids `async-trait` and
//! heap trait objects; clients are plain structs called directly.

pub mod errors;
pub mod model;
pub mod notify;
pub mod project_type;
pub mod prompt;
pub mod store;

use std::time::Instant;

use tracing::{debug, info};

use gitlab_context::{GitLabClient, MergeRequestRef};
use llm_service::ChatService;

use errors::{PipelineError, PipelineResult};
use notify::SlackWebhookClient;
use project_type::ProjectType;
use store::new_review_id;

pub use model::{ReviewIssue, ReviewResult, Severity};
pub use store::{ReviewRecord, ReviewStatus, ReviewStore};

/// The wired-up pipeline: clients plus the shared record store.
///
/// Built once at startup and shared behind an `Arc`; `run` is safe to call
/// from spawned background tasks.
#[derive(Debug)]
pub struct ReviewPipeline {
    store: ReviewStore,
    gitlab: GitLabClient,
    llm: ChatService,
    slack: SlackWebhookClient,
}

impl ReviewPipeline {
    pub fn new(gitlab: GitLabClient, llm: ChatService, slack: SlackWebhookClient) -> Self {
        Self {
            store: ReviewStore::new(),
            gitlab,
            llm,
            slack,
        }
    }

    /// The shared record store (for status lookups from the HTTP layer).
    pub fn store(&self) -> &ReviewStore {
        &self.store
    }

    /// Seeds a `pending` record for a triggered review and returns its id.
    pub async fn create_review(&self, mr_url: &str, mr: &MergeRequestRef) -> String {
        let review_id = new_review_id();
        let record = ReviewRecord::new(
            review_id.clone(),
            mr_url.to_string(),
            mr.project.clone(),
            mr.iid,
        );
        self.store.insert(record).await;

        info!(
            review_id = %review_id,
            project = %mr.project,
            iid = mr.iid,
            "review record created"
        );

        review_id
    }

    /// Runs fetch → review → notify for an already-created review record.
    ///
    /// Every stage failure is written back to the record (status + error
    /// text) before the error is returned, so the record always reflects how
    /// far the review got.
    pub async fn run(&self, review_id: &str) -> PipelineResult<()> {
        let t0 = Instant::now();
        debug!(review_id, "fetch stage: requesting MR metadata and changes");
        if let Err(err) = self.fetch_stage(review_id).await {
            self.store
                .mark_failed(review_id, ReviewStatus::Failed, &err.to_string())
                .await;
            return Err(err);
        }
        debug!(
            review_id,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "fetch stage done"
        );

        let t1 = Instant::now();
        debug!(review_id, "review stage: prompt assembly and chat completion");
        if let Err(err) = self.review_stage(review_id).await {
            self.store
                .mark_failed(review_id, ReviewStatus::ReviewFailed, &err.to_string())
                .await;
            return Err(err);
        }
        debug!(
            review_id,
            elapsed_ms = t1.elapsed().as_millis() as u64,
            "review stage done"
        );

        let t2 = Instant::now();
        debug!(review_id, "notify stage: posting summary to Slack");
        if let Err(err) = self.notify_stage(review_id).await {
            // The review result stays on the record; only the status flips.
            self.store
                .mark_failed(review_id, ReviewStatus::NotifyFailed, &err.to_string())
                .await;
            return Err(err);
        }
        debug!(
            review_id,
            elapsed_ms = t2.elapsed().as_millis() as u64,
            "notify stage done"
        );

        info!(
            review_id,
            elapsed_ms = t0.elapsed().as_millis() as u64,
            "review pipeline finished"
        );

        Ok(())
    }

    /// Fetch MR metadata and changes, store them on the record.
    async fn fetch_stage(&self, review_id: &str) -> PipelineResult<()> {
        let record = self
            .store
            .get(review_id)
            .await
            .ok_or_else(|| PipelineError::RecordNotFound(review_id.to_string()))?;

        let mr = MergeRequestRef {
            project: record.project_path.clone(),
            iid: record.mr_iid,
        };

        let details = self.gitlab.get_merge_request(&mr).await?;
        let changes = self.gitlab.get_changes(&mr).await?;

        info!(
            review_id,
            files = changes.len(),
            title = %details.title,
            "merge request data fetched"
        );

        self.store
            .update(review_id, |r| {
                r.details = Some(details);
                r.changes = Some(changes);
                r.status = ReviewStatus::DiffFetched;
            })
            .await;

        Ok(())
    }

    /// Build prompts from the stored data, call the model, store the result.
    async fn review_stage(&self, review_id: &str) -> PipelineResult<()> {
        let record = self
            .store
            .get(review_id)
            .await
            .ok_or_else(|| PipelineError::RecordNotFound(review_id.to_string()))?;

        let (details, changes) = match (record.details, record.changes) {
            (Some(d), Some(c)) => (d, c),
            _ => return Err(PipelineError::MissingMrData(review_id.to_string())),
        };

        let project_type = ProjectType::detect(&record.project_path);
        debug!(
            review_id,
            project_type = %project_type,
            standard = project_type.coding_standard(),
            "project type detected"
        );

        let system = prompt::build_system_prompt(project_type.coding_standard());
        let user =
            prompt::build_user_message(&details.title, &details.description, project_type, &changes);

        let raw = self.llm.generate(&user, Some(&system)).await?;
        let review = model::parse_review_output(&raw);

        info!(
            review_id,
            issues = review.issues.len(),
            "AI review completed"
        );

        self.store
            .update(review_id, |r| {
                r.review = Some(review);
                r.status = ReviewStatus::Completed;
            })
            .await;

        Ok(())
    }

    /// Format the stored review and deliver it to the Slack webhook.
    async fn notify_stage(&self, review_id: &str) -> PipelineResult<()> {
        let record = self
            .store
            .get(review_id)
            .await
            .ok_or_else(|| PipelineError::RecordNotFound(review_id.to_string()))?;

        let details = record
            .details
            .as_ref()
            .ok_or_else(|| PipelineError::MissingMrData(review_id.to_string()))?;
        let review = record
            .review
            .as_ref()
            .ok_or_else(|| PipelineError::MissingReview(review_id.to_string()))?;

        let message =
            notify::build_review_message(&record.review_id, &record.mr_url, &details.title, review);
        self.slack.send(&message).await?;

        self.store
            .update(review_id, |r| r.status = ReviewStatus::Notified)
            .await;

        info!(review_id, "slack notification delivered");

        Ok(())
    }
}
