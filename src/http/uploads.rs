//! Attachment upload and retrieval handlers.

use std::sync::Arc;

use axum::extract::{Path, State};
use axum::http::{header, HeaderMap, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::Json;
use bytes::Bytes;
use serde::Serialize;

use crate::{AppError, Result};

use super::AppState;

/// Response body for a stored upload.
#[derive(Debug, Serialize)]
pub struct UploadResponse {
    /// Public URL callers store in a task's `attachment` field.
    pub url: String,
}

/// `POST /api/uploads` — store raw image bytes and return the public URL.
///
/// The body is the image itself; the `content-type` header selects the
/// stored extension.
///
/// # Errors
///
/// Returns `AppError::Upload` for a missing or unsupported content type
/// or an oversized payload, and `AppError::Io` if the file cannot be
/// written.
pub async fn upload_attachment(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<UploadResponse>)> {
    let content_type = headers
        .get(header::CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .ok_or_else(|| AppError::Upload("missing content-type header".into()))?;

    let url = state.uploads.save(&body, content_type).await?;
    Ok((StatusCode::CREATED, Json(UploadResponse { url })))
}

/// `GET /api/uploads/{name}` — serve a stored attachment with its
/// content type.
///
/// # Errors
///
/// Returns `AppError::Upload` for names that escape the upload
/// directory, or `AppError::NotFound` if no such file exists.
pub async fn fetch_attachment(
    State(state): State<Arc<AppState>>,
    Path(name): Path<String>,
) -> Result<Response> {
    let (bytes, content_type) = state.uploads.read(&name).await?;
    Ok(([(header::CONTENT_TYPE, content_type)], bytes).into_response())
}
