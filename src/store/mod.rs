//! Task store facade — the single read/write path for task records.
//!
//! Every mutation flows through here so that the per-task activity log
//! stays consistent: creation seeds exactly one CREATED entry, and each
//! update appends exactly one derived entry. Updates are serialized
//! through a writer lock so two in-flight updates can never read the
//! same prior activity list and drop one another's entry.

use std::sync::Arc;

use chrono::{DateTime, Utc};
use futures_util::future::join_all;
use tokio::sync::Mutex;
use tracing::{error, info};

use crate::models::activity::{Activity, ActivityAction};
use crate::models::task::{NewTask, Task, TaskPatch, TaskStatus};
use crate::persistence::db::Database;
use crate::persistence::task_repo::TaskRepo;
use crate::{AppError, Result};

/// Per-id outcome of a bulk status update.
#[derive(Debug, Clone, Default, serde::Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct BulkOutcome {
    /// IDs whose status update succeeded.
    pub updated: Vec<String>,
    /// IDs whose status update failed.
    pub failed: Vec<String>,
}

/// Facade over the task collection.
pub struct TaskStore {
    repo: TaskRepo,
    update_lock: Mutex<()>,
}

impl TaskStore {
    /// Create a facade over the given database.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self {
            repo: TaskRepo::new(db),
            update_lock: Mutex::new(()),
        }
    }

    /// Store a new task record.
    ///
    /// Any activities carried by `input` are discarded; the stored record
    /// starts with a single CREATED entry stamped at call time. Returns
    /// the stored record including its assigned id.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the insert fails.
    pub async fn create_task(&self, input: NewTask) -> Result<Task> {
        let task = Task::new(input, Utc::now());
        let stored = self.repo.insert(&task).await?;
        info!(task_id = %stored.id, user_id = %stored.user_id, "task created");
        Ok(stored)
    }

    /// Apply a partial update to an existing task.
    ///
    /// Appends exactly one activity: STATUS_CHANGED when the patch moves
    /// the status to a different lane, UPDATED otherwise, with details
    /// derived from the patch's present field names. `updated_at` is
    /// refreshed to call time. Callers that need the new state re-fetch.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if the id does not resolve, or
    /// `AppError::Db` if persistence fails.
    pub async fn update_task(&self, id: &str, patch: &TaskPatch) -> Result<()> {
        let _guard = self.update_lock.lock().await;

        let mut task = self
            .repo
            .get_by_id(id)
            .await?
            .ok_or_else(|| AppError::NotFound("task not found".into()))?;

        let now = Utc::now();
        let activity = derive_activity(&task, patch, now);

        patch.apply(&mut task);
        task.updated_at = now;
        task.activities.push(activity);

        self.repo.update(&task).await
    }

    /// Hard-delete a task. Deleting a missing id follows the underlying
    /// store's behavior and is not an error.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete_task(&self, id: &str) -> Result<()> {
        self.repo.delete(id).await?;
        info!(task_id = %id, "task deleted");
        Ok(())
    }

    /// All tasks owned by `user_id`, in store-native order. Returns an
    /// empty vec, never an error, for a user with no tasks.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get_user_tasks(&self, user_id: &str) -> Result<Vec<Task>> {
        self.repo.list_for_user(user_id).await
    }

    /// Move every task in `ids` to `status`, one update call per id,
    /// dispatched concurrently. Best-effort: a partial failure leaves
    /// the rest updated, and each failure is logged and reported in the
    /// outcome rather than rolled back.
    pub async fn bulk_update_status(&self, ids: &[String], status: TaskStatus) -> BulkOutcome {
        let patch = TaskPatch {
            status: Some(status),
            ..TaskPatch::default()
        };

        let results = join_all(ids.iter().map(|id| self.update_task(id, &patch))).await;

        let mut outcome = BulkOutcome::default();
        for (id, result) in ids.iter().zip(results) {
            match result {
                Ok(()) => outcome.updated.push(id.clone()),
                Err(err) => {
                    error!(task_id = %id, %err, "bulk status update failed for task");
                    outcome.failed.push(id.clone());
                }
            }
        }
        outcome
    }
}

/// Derive the single activity entry recorded for an update.
///
/// A patch that moves the status to a different lane wins over every
/// other change in the same call.
fn derive_activity(current: &Task, patch: &TaskPatch, now: DateTime<Utc>) -> Activity {
    if let Some(next) = patch.status {
        if next != current.status {
            let old = current.status;
            return Activity::new(
                ActivityAction::StatusChanged,
                now,
                format!("Status changed from {old} to {next}"),
            );
        }
    }

    Activity::new(ActivityAction::Updated, now, update_details(patch))
}

/// Summarize an UPDATED activity from the patch's present field names.
fn update_details(patch: &TaskPatch) -> String {
    let fields = patch.changed_fields();
    match fields.as_slice() {
        [] => "Task updated".into(),
        [field] => format!("Updated {field}"),
        many => format!("Updated {}", many.join(", ")),
    }
}
