//! Task CRUD, filtering, and bulk status handlers.

use std::sync::Arc;

use axum::extract::{Path, Query, State};
use axum::http::{HeaderMap, StatusCode};
use axum::Json;
use chrono::Utc;
use serde::Deserialize;

use crate::filter::{filter_tasks, partition_by_status, StatusLanes, TaskFilter};
use crate::models::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::store::BulkOutcome;
use crate::{AppError, Result};

use super::AppState;

/// Longest accepted description, matching the editing surface.
const MAX_DESCRIPTION_CHARS: usize = 300;

/// Resolve the caller's user identity from the `x-user-id` header.
///
/// The identity provider is an external collaborator; the value is an
/// opaque scoping key.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` if the header is missing, unreadable,
/// or not in the configured allowlist.
fn require_user(state: &AppState, headers: &HeaderMap) -> Result<String> {
    let user_id = headers
        .get("x-user-id")
        .and_then(|value| value.to_str().ok())
        .filter(|value| !value.is_empty())
        .ok_or_else(|| AppError::Unauthorized("missing x-user-id header".into()))?;

    state.config.ensure_authorized(user_id)?;
    Ok(user_id.to_owned())
}

/// Caller-side validation the facade itself does not perform.
fn validate_title_and_description(title: &str, description: &str) -> Result<()> {
    if title.trim().is_empty() {
        return Err(AppError::Validation("title is required".into()));
    }
    if description.chars().count() > MAX_DESCRIPTION_CHARS {
        return Err(AppError::Validation(format!(
            "description exceeds {MAX_DESCRIPTION_CHARS} characters"
        )));
    }
    Ok(())
}

/// `GET /api/tasks` — the caller's tasks, filtered and partitioned into
/// status lanes.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` without a usable identity, or
/// `AppError::Db` if the listing fails.
pub async fn list_tasks(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Query(filter): Query<TaskFilter>,
) -> Result<Json<StatusLanes>> {
    let user_id = require_user(&state, &headers)?;
    let tasks = state.store.get_user_tasks(&user_id).await?;

    let today = Utc::now().date_naive();
    let filtered = filter_tasks(&tasks, &filter, today);
    Ok(Json(partition_by_status(filtered)))
}

/// `POST /api/tasks` — create a task owned by the caller.
///
/// The owner id always comes from the session identity; any `user_id`
/// in the body is overwritten.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` without a usable identity,
/// `AppError::Validation` for a blank title or oversized description,
/// or `AppError::Db` if the insert fails.
pub async fn create_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(mut input): Json<NewTask>,
) -> Result<(StatusCode, Json<Task>)> {
    let user_id = require_user(&state, &headers)?;
    validate_title_and_description(&input.title, &input.description)?;

    input.user_id = user_id;
    let task = state.store.create_task(input).await?;
    Ok((StatusCode::CREATED, Json(task)))
}

/// `PATCH /api/tasks/{id}` — apply a partial update. Callers that need
/// the new state re-fetch the list.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` without a usable identity,
/// `AppError::Validation` for a blank title or oversized description,
/// `AppError::NotFound` if the id does not resolve, or `AppError::Db`
/// if persistence fails.
pub async fn update_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(patch): Json<TaskPatch>,
) -> Result<StatusCode> {
    require_user(&state, &headers)?;
    if let Some(ref title) = patch.title {
        if title.trim().is_empty() {
            return Err(AppError::Validation("title is required".into()));
        }
    }
    if let Some(ref description) = patch.description {
        if description.chars().count() > MAX_DESCRIPTION_CHARS {
            return Err(AppError::Validation(format!(
                "description exceeds {MAX_DESCRIPTION_CHARS} characters"
            )));
        }
    }

    state.store.update_task(&id, &patch).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// `DELETE /api/tasks/{id}` — unconditional hard delete.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` without a usable identity, or
/// `AppError::Db` if the delete fails.
pub async fn delete_task(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode> {
    require_user(&state, &headers)?;
    state.store.delete_task(&id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// Request body for a bulk status update.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct BulkStatusRequest {
    /// IDs of the tasks to move.
    pub ids: Vec<String>,
    /// Target status for every listed task.
    pub status: TaskStatus,
}

/// `POST /api/tasks/status` — best-effort bulk status update with a
/// per-id outcome report.
///
/// # Errors
///
/// Returns `AppError::Unauthorized` without a usable identity.
/// Per-task failures are reported in the outcome, not as an error.
pub async fn bulk_update_status(
    State(state): State<Arc<AppState>>,
    headers: HeaderMap,
    Json(request): Json<BulkStatusRequest>,
) -> Result<Json<BulkOutcome>> {
    require_user(&state, &headers)?;
    let outcome = state
        .store
        .bulk_update_status(&request.ids, request.status)
        .await;
    Ok(Json(outcome))
}
