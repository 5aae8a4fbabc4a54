use std::sync::Arc;

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
};
use tracing::debug;

use crate::{
    core::{app_state::AppState, http::response_envelope::ApiResponse},
    error_handler::AppError,
    routes::review_status::review_status_response::ReviewStatusResponse,
};

/// GET /gitlab/reviews/{id}
///
/// Reads the stored record for a review id and reports its progress,
/// result and error, if any.
pub async fn review_status(
    State(state): State<Arc<AppState>>,
    Path(review_id): Path<String>,
) -> Response {
    debug!(review_id = %review_id, "review status requested");

    match state.pipeline.store().get(&review_id).await {
        Some(record) => ApiResponse::success(ReviewStatusResponse::from(record))
            .into_response_with_status(StatusCode::OK),
        None => AppError::NotFound.into_response(),
    }
}
