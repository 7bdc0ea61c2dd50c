//! HTTP API surface.
//!
//! Thin axum handlers over the task store facade and the upload store.
//! The view layer never touches the underlying database directly; this
//! module is the only caller of the facade.

pub mod server;
pub mod tasks;
pub mod uploads;

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;

use crate::config::GlobalConfig;
use crate::errors::AppError;
use crate::store::TaskStore;
use crate::uploads::UploadStore;

/// Shared application state handed to every handler.
pub struct AppState {
    /// Validated global configuration.
    pub config: Arc<GlobalConfig>,
    /// Task store facade.
    pub store: TaskStore,
    /// Attachment upload store.
    pub uploads: UploadStore,
}

/// Error body returned for every failed request.
#[derive(Debug, serde::Serialize)]
struct ErrorBody {
    error: String,
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        let status = match self {
            Self::NotFound(_) => StatusCode::NOT_FOUND,
            Self::Validation(_) | Self::Upload(_) => StatusCode::BAD_REQUEST,
            Self::Unauthorized(_) => StatusCode::UNAUTHORIZED,
            Self::Config(_) | Self::Db(_) | Self::Io(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };
        let body = ErrorBody {
            error: self.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
