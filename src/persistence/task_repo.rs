//! Task repository for `SQLite` persistence.

use std::sync::Arc;

use chrono::{DateTime, NaiveDate, Utc};

use crate::models::activity::Activity;
use crate::models::task::{Task, TaskCategory, TaskStatus};
use crate::{AppError, Result};

use super::db::Database;

/// Repository wrapper around `SQLite` for task records.
#[derive(Clone)]
pub struct TaskRepo {
    db: Arc<Database>,
}

/// Internal row struct for `SQLite` deserialization.
#[derive(sqlx::FromRow)]
struct TaskRow {
    id: String,
    title: String,
    description: String,
    due_date: String,
    category: String,
    status: String,
    user_id: String,
    created_at: String,
    updated_at: String,
    activities: String,
    attachment: Option<String>,
}

impl TaskRow {
    /// Convert a database row into the domain model.
    fn into_task(self) -> Result<Task> {
        let category = parse_category(&self.category)?;
        let status = parse_status(&self.status)?;
        let due_date = NaiveDate::parse_from_str(&self.due_date, "%Y-%m-%d")
            .map_err(|e| AppError::Db(format!("invalid due_date: {e}")))?;
        let created_at = parse_timestamp(&self.created_at, "created_at")?;
        let updated_at = parse_timestamp(&self.updated_at, "updated_at")?;
        let activities: Vec<Activity> = serde_json::from_str(&self.activities)?;

        Ok(Task {
            id: self.id,
            title: self.title,
            description: self.description,
            due_date,
            category,
            status,
            user_id: self.user_id,
            created_at,
            updated_at,
            activities,
            attachment: self.attachment,
        })
    }
}

fn parse_timestamp(s: &str, field: &str) -> Result<DateTime<Utc>> {
    DateTime::parse_from_rfc3339(s)
        .map(|ts| ts.with_timezone(&Utc))
        .map_err(|e| AppError::Db(format!("invalid {field}: {e}")))
}

fn parse_category(s: &str) -> Result<TaskCategory> {
    match s {
        "WORK" => Ok(TaskCategory::Work),
        "PERSONAL" => Ok(TaskCategory::Personal),
        other => Err(AppError::Db(format!("invalid category: {other}"))),
    }
}

fn parse_status(s: &str) -> Result<TaskStatus> {
    match s {
        "TO-DO" => Ok(TaskStatus::Todo),
        "IN-PROGRESS" => Ok(TaskStatus::InProgress),
        "COMPLETED" => Ok(TaskStatus::Completed),
        other => Err(AppError::Db(format!("invalid status: {other}"))),
    }
}

impl TaskRepo {
    /// Create a new repository instance.
    #[must_use]
    pub fn new(db: Arc<Database>) -> Self {
        Self { db }
    }

    /// Insert a new task record.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the database insert fails.
    pub async fn insert(&self, task: &Task) -> Result<Task> {
        let activities = serde_json::to_string(&task.activities)?;

        sqlx::query(
            "INSERT INTO task (id, title, description, due_date, category, status,
             user_id, created_at, updated_at, activities, attachment)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11)",
        )
        .bind(&task.id)
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date.format("%Y-%m-%d").to_string())
        .bind(task.category.as_str())
        .bind(task.status.as_str())
        .bind(&task.user_id)
        .bind(task.created_at.to_rfc3339())
        .bind(task.updated_at.to_rfc3339())
        .bind(&activities)
        .bind(&task.attachment)
        .execute(self.db.as_ref())
        .await?;

        Ok(task.clone())
    }

    /// Retrieve a task by identifier.
    ///
    /// Returns `Ok(None)` if the task does not exist.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn get_by_id(&self, id: &str) -> Result<Option<Task>> {
        let row: Option<TaskRow> = sqlx::query_as("SELECT * FROM task WHERE id = ?1")
            .bind(id)
            .fetch_optional(self.db.as_ref())
            .await?;

        row.map(TaskRow::into_task).transpose()
    }

    /// Overwrite the full row for an existing task.
    ///
    /// # Errors
    ///
    /// Returns `AppError::NotFound` if no row matched, or `AppError::Db`
    /// if the update fails.
    pub async fn update(&self, task: &Task) -> Result<()> {
        let activities = serde_json::to_string(&task.activities)?;

        let result = sqlx::query(
            "UPDATE task SET title = ?1, description = ?2, due_date = ?3,
             category = ?4, status = ?5, updated_at = ?6, activities = ?7,
             attachment = ?8
             WHERE id = ?9",
        )
        .bind(&task.title)
        .bind(&task.description)
        .bind(task.due_date.format("%Y-%m-%d").to_string())
        .bind(task.category.as_str())
        .bind(task.status.as_str())
        .bind(task.updated_at.to_rfc3339())
        .bind(&activities)
        .bind(&task.attachment)
        .bind(&task.id)
        .execute(self.db.as_ref())
        .await?;

        if result.rows_affected() == 0 {
            return Err(AppError::NotFound("task not found".into()));
        }
        Ok(())
    }

    /// Delete a task by identifier.
    ///
    /// Deleting a missing id is a no-op, matching the underlying store.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the delete fails.
    pub async fn delete(&self, id: &str) -> Result<()> {
        sqlx::query("DELETE FROM task WHERE id = ?1")
            .bind(id)
            .execute(self.db.as_ref())
            .await?;
        Ok(())
    }

    /// List all tasks owned by `user_id`, in store-native order.
    ///
    /// # Errors
    ///
    /// Returns `AppError::Db` if the query fails.
    pub async fn list_for_user(&self, user_id: &str) -> Result<Vec<Task>> {
        let rows: Vec<TaskRow> = sqlx::query_as("SELECT * FROM task WHERE user_id = ?1")
            .bind(user_id)
            .fetch_all(self.db.as_ref())
            .await?;

        rows.into_iter().map(TaskRow::into_task).collect()
    }
}
