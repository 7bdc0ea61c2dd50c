//! Unit tests for `TaskRepo` CRUD operations.

use std::sync::Arc;

use chrono::{NaiveDate, Utc};

use taskbuddy::models::task::{NewTask, Task, TaskCategory, TaskStatus};
use taskbuddy::persistence::{db, task_repo::TaskRepo};
use taskbuddy::AppError;

fn sample_task(user_id: &str) -> Task {
    Task::new(
        NewTask {
            title: "Write report".into(),
            description: "Quarterly summary".into(),
            due_date: NaiveDate::from_ymd_opt(2026, 8, 10).expect("valid date"),
            category: TaskCategory::Work,
            status: TaskStatus::Todo,
            user_id: user_id.into(),
            activities: Vec::new(),
            attachment: None,
        },
        Utc::now(),
    )
}

async fn test_repo() -> TaskRepo {
    let database = db::connect_memory().await.expect("db");
    TaskRepo::new(Arc::new(database))
}

#[tokio::test]
async fn insert_and_get_round_trip() {
    let repo = test_repo().await;
    let task = sample_task("u1");

    let created = repo.insert(&task).await.expect("insert");
    assert_eq!(created, task);

    let fetched = repo
        .get_by_id(&task.id)
        .await
        .expect("query")
        .expect("exists");
    assert_eq!(fetched, task);
    assert_eq!(fetched.activities.len(), 1);
}

#[tokio::test]
async fn attachment_round_trips() {
    let repo = test_repo().await;
    let mut task = sample_task("u1");
    task.attachment = Some("http://localhost:8080/api/uploads/a.png".into());

    repo.insert(&task).await.expect("insert");

    let fetched = repo
        .get_by_id(&task.id)
        .await
        .expect("query")
        .expect("exists");
    assert_eq!(
        fetched.attachment.as_deref(),
        Some("http://localhost:8080/api/uploads/a.png")
    );
}

#[tokio::test]
async fn get_by_id_returns_none_for_missing() {
    let repo = test_repo().await;
    let result = repo.get_by_id("nonexistent").await.expect("query");
    assert!(result.is_none());
}

#[tokio::test]
async fn update_overwrites_the_row() {
    let repo = test_repo().await;
    let mut task = sample_task("u1");
    repo.insert(&task).await.expect("insert");

    task.title = "Ship report".into();
    task.status = TaskStatus::Completed;
    task.updated_at = Utc::now();
    repo.update(&task).await.expect("update");

    let fetched = repo
        .get_by_id(&task.id)
        .await
        .expect("query")
        .expect("exists");
    assert_eq!(fetched.title, "Ship report");
    assert_eq!(fetched.status, TaskStatus::Completed);
}

#[tokio::test]
async fn update_missing_row_is_not_found() {
    let repo = test_repo().await;
    let task = sample_task("u1");

    let err = repo.update(&task).await.expect_err("missing row");
    assert!(matches!(err, AppError::NotFound(_)));
}

#[tokio::test]
async fn delete_removes_the_row() {
    let repo = test_repo().await;
    let task = sample_task("u1");
    repo.insert(&task).await.expect("insert");

    repo.delete(&task.id).await.expect("delete");

    let result = repo.get_by_id(&task.id).await.expect("query");
    assert!(result.is_none());
}

#[tokio::test]
async fn delete_missing_row_is_a_noop() {
    let repo = test_repo().await;
    repo.delete("nonexistent").await.expect("delete");
}

#[tokio::test]
async fn list_for_user_scopes_by_owner() {
    let repo = test_repo().await;
    let t1 = sample_task("u1");
    let t2 = sample_task("u1");
    let t3 = sample_task("u2");
    repo.insert(&t1).await.expect("insert");
    repo.insert(&t2).await.expect("insert");
    repo.insert(&t3).await.expect("insert");

    let tasks = repo.list_for_user("u1").await.expect("list");
    assert_eq!(tasks.len(), 2);
    assert!(tasks.iter().all(|t| t.user_id == "u1"));
}

#[tokio::test]
async fn list_for_unknown_user_is_empty() {
    let repo = test_repo().await;
    let tasks = repo.list_for_user("nobody").await.expect("list");
    assert!(tasks.is_empty());
}
