//! HTTP server: router construction and serving.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::routing::{get, post};
use axum::Router;
use tokio_util::sync::CancellationToken;
use tracing::info;

use crate::{AppError, Result};

use super::{tasks, uploads, AppState};

/// Handler for `GET /health` — returns 200 OK with a plain-text body.
async fn health() -> &'static str {
    "ok"
}

/// Build the API router over the shared state.
#[must_use]
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/health", get(health))
        .route("/api/tasks", get(tasks::list_tasks).post(tasks::create_task))
        .route(
            "/api/tasks/{id}",
            axum::routing::patch(tasks::update_task).delete(tasks::delete_task),
        )
        .route("/api/tasks/status", post(tasks::bulk_update_status))
        .route("/api/uploads", post(uploads::upload_attachment))
        .route("/api/uploads/{name}", get(uploads::fetch_attachment))
        .with_state(state)
}

/// Serve the API on `config.http_port` until the token is cancelled.
///
/// # Errors
///
/// Returns `AppError::Config` if the server fails to bind, or
/// `AppError::Io` if serving fails.
pub async fn serve(state: Arc<AppState>, ct: CancellationToken) -> Result<()> {
    let port = state.config.http_port;
    let bind = SocketAddr::from(([127, 0, 0, 1], port));

    let router = build_router(state);

    let listener = tokio::net::TcpListener::bind(bind)
        .await
        .map_err(|err| AppError::Config(format!("failed to bind API on {bind}: {err}")))?;

    info!(%bind, "starting HTTP API");

    axum::serve(listener, router)
        .with_graceful_shutdown(async move {
            ct.cancelled().await;
        })
        .await
        .map_err(|err| AppError::Io(format!("API server error: {err}")))?;

    info!("HTTP API shut down");
    Ok(())
}
