use std::sync::Arc;

use axum::{
    extract::{Json, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use gitlab_context::parse_mr_url;
use tracing::{error, info};

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::trigger_review::{
        trigger_review_request::TriggerReviewRequest,
        trigger_review_response::TriggerReviewResponse,
    },
};

/// POST /gitlab/reviewmr
///
/// Accepts a merge-request web URL, seeds a review record and spawns the
/// fetch → review → notify pipeline in the background. Responds immediately
/// with the review id; progress is visible under `/gitlab/reviews/{id}`.
pub async fn trigger_review(
    State(state): State<Arc<AppState>>,
    Json(body): Json<TriggerReviewRequest>,
) -> Response {
    info!(mr_url = %body.mr_url, "merge request review requested");

    let mr = match parse_mr_url(&body.mr_url) {
        Ok(mr) => mr,
        Err(err) => return AppError::BadRequest(err.to_string()).into_response(),
    };

    let review_id = state.pipeline.create_review(&body.mr_url, &mr).await;

    let pipeline = state.pipeline.clone();
    let spawned_id = review_id.clone();
    tokio::spawn(async move {
        if let Err(err) = pipeline.run(&spawned_id).await {
            error!(review_id = %spawned_id, error = %err, "review pipeline failed");
        }
    });

    ApiResponse::success(TriggerReviewResponse {
        message: "MR review triggered, processing".to_string(),
        review_id,
        mr_url: body.mr_url,
    })
    .into_response_with_status(StatusCode::OK)
}
