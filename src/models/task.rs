//! Task model and the caller-side input types for the store facade.

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::activity::Activity;

/// Task category.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TaskCategory {
    /// Work task.
    Work,
    /// Personal task.
    Personal,
}

impl TaskCategory {
    /// Wire label, identical to the persisted form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Work => "WORK",
            Self::Personal => "PERSONAL",
        }
    }
}

impl std::fmt::Display for TaskCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task status; doubles as the board column identifier.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum TaskStatus {
    /// Not started.
    #[serde(rename = "TO-DO")]
    Todo,
    /// Being worked on.
    #[serde(rename = "IN-PROGRESS")]
    InProgress,
    /// Done.
    #[serde(rename = "COMPLETED")]
    Completed,
}

impl TaskStatus {
    /// Wire label, identical to the persisted form.
    #[must_use]
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Todo => "TO-DO",
            Self::InProgress => "IN-PROGRESS",
            Self::Completed => "COMPLETED",
        }
    }
}

impl std::fmt::Display for TaskStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Task domain entity persisted in the task collection.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Task {
    /// Unique record identifier; assigned by the store, immutable.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Free text; the editing surface bounds it to 300 characters.
    pub description: String,
    /// Calendar due date, compared only at day granularity.
    pub due_date: NaiveDate,
    /// Task category.
    pub category: TaskCategory,
    /// Current status / board column.
    pub status: TaskStatus,
    /// Owning user identifier; immutable after creation.
    pub user_id: String,
    /// Creation timestamp, set by the store facade.
    pub created_at: DateTime<Utc>,
    /// Last mutation timestamp, set by the store facade.
    pub updated_at: DateTime<Utc>,
    /// Append-only activity log, oldest first.
    pub activities: Vec<Activity>,
    /// Public URL of an uploaded attachment, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

/// Input for creating a task. The store facade assigns `id`,
/// `created_at`, and `updated_at`, and replaces any supplied
/// `activities` with the single seeded CREATED entry.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct NewTask {
    /// Non-empty display title.
    pub title: String,
    /// Free text description.
    #[serde(default)]
    pub description: String,
    /// Calendar due date.
    pub due_date: NaiveDate,
    /// Task category.
    pub category: TaskCategory,
    /// Initial status.
    pub status: TaskStatus,
    /// Owning user identifier.
    #[serde(default)]
    pub user_id: String,
    /// Caller-supplied activity entries; always discarded by the facade.
    #[serde(default)]
    pub activities: Vec<Activity>,
    /// Public URL of an uploaded attachment, if any.
    #[serde(default)]
    pub attachment: Option<String>,
}

impl Task {
    /// Build a task record from creation input at the given instant.
    ///
    /// Seeds the activity log with exactly one CREATED entry regardless
    /// of what the input carried.
    #[must_use]
    pub fn new(input: NewTask, now: DateTime<Utc>) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: input.title,
            description: input.description,
            due_date: input.due_date,
            category: input.category,
            status: input.status,
            user_id: input.user_id,
            created_at: now,
            updated_at: now,
            activities: vec![Activity::created(now)],
            attachment: input.attachment,
        }
    }
}

/// Partial update to a task. Absent fields are left untouched.
///
/// Field declaration order fixes the join order of the derived activity
/// details ("Updated title, status").
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct TaskPatch {
    /// New title.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub title: Option<String>,
    /// New description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// New due date.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<NaiveDate>,
    /// New category.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category: Option<TaskCategory>,
    /// New status.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub status: Option<TaskStatus>,
    /// New attachment URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub attachment: Option<String>,
}

impl TaskPatch {
    /// Wire names of the fields present in this patch, in declaration
    /// order. Used verbatim in derived activity details.
    #[must_use]
    pub fn changed_fields(&self) -> Vec<&'static str> {
        let mut fields = Vec::new();
        if self.title.is_some() {
            fields.push("title");
        }
        if self.description.is_some() {
            fields.push("description");
        }
        if self.due_date.is_some() {
            fields.push("due_date");
        }
        if self.category.is_some() {
            fields.push("category");
        }
        if self.status.is_some() {
            fields.push("status");
        }
        if self.attachment.is_some() {
            fields.push("attachment");
        }
        fields
    }

    /// Whether the patch carries no fields at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.changed_fields().is_empty()
    }

    /// Merge the present fields into `task`. Timestamps and activities
    /// are the store facade's responsibility, not the patch's.
    pub fn apply(&self, task: &mut Task) {
        if let Some(ref title) = self.title {
            task.title = title.clone();
        }
        if let Some(ref description) = self.description {
            task.description = description.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(category) = self.category {
            task.category = category;
        }
        if let Some(status) = self.status {
            task.status = status;
        }
        if let Some(ref attachment) = self.attachment {
            task.attachment = Some(attachment.clone());
        }
    }
}
