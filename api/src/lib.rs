use std::{env, error::Error, sync::Arc};

mod core;
mod error_handler;
mod middleware_layer;
mod routes;

use axum::{
    Router, middleware,
    routing::{get, post},
};
use tokio::signal;

use crate::core::app_state::AppState;
use crate::middleware_layer::json_extractor::json_error_mapper;
use crate::routes::{
    health::health_route::health, review_status::review_status_route::review_status,
    trigger_review::trigger_review_route::trigger_review,
};

pub async fn start() -> Result<(), Box<dyn Error>> {
    let state = Arc::new(AppState::from_env()?);

    let host_url = env::var("API_ADDRESS").unwrap_or_else(|_| "0.0.0.0:3000".into());

    let app = Router::new()
        .route("/health", get(health))
        .route("/gitlab/reviewmr", post(trigger_review))
        .route("/gitlab/reviews/{id}", get(review_status))
        .layer(middleware::from_fn(json_error_mapper))
        .with_state(state);

    tracing::info!(address = %host_url, "starting HTTP server");

    let listener = tokio::net::TcpListener::bind(&host_url).await?;

    // Start server with graceful shutdown on Ctrl+C
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

/// Returns a future that resolves when Ctrl+C is pressed
async fn shutdown_signal() {
    signal::ctrl_c()
        .await
        .expect("Failed to listen for shutdown signal");
}
