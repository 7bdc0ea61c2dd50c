//! Integration tests for best-effort bulk status updates.

use taskbuddy::models::activity::ActivityAction;
use taskbuddy::models::task::TaskStatus;

use super::test_helpers::{sample_input, test_store};

#[tokio::test]
async fn bulk_update_moves_every_listed_task() {
    let store = test_store().await;
    let mut ids = Vec::new();
    for title in ["a", "b", "c"] {
        let created = store
            .create_task(sample_input("u1", title))
            .await
            .expect("create");
        ids.push(created.id);
    }

    let outcome = store.bulk_update_status(&ids, TaskStatus::Completed).await;

    assert_eq!(outcome.updated.len(), 3);
    assert!(outcome.failed.is_empty());

    let tasks = store.get_user_tasks("u1").await.expect("list");
    assert!(tasks.iter().all(|t| t.status == TaskStatus::Completed));
    for task in &tasks {
        let last = task.activities.last().expect("activity");
        assert_eq!(last.action, ActivityAction::StatusChanged);
        assert_eq!(last.details, "Status changed from TO-DO to COMPLETED");
    }
}

#[tokio::test]
async fn partial_failure_updates_the_rest() {
    let store = test_store().await;
    let created = store
        .create_task(sample_input("u1", "Write report"))
        .await
        .expect("create");

    let ids = vec![created.id.clone(), "nonexistent".to_owned()];
    let outcome = store.bulk_update_status(&ids, TaskStatus::InProgress).await;

    assert_eq!(outcome.updated, vec![created.id]);
    assert_eq!(outcome.failed, vec!["nonexistent".to_owned()]);

    let tasks = store.get_user_tasks("u1").await.expect("list");
    assert_eq!(tasks[0].status, TaskStatus::InProgress);
}

#[tokio::test]
async fn tasks_already_in_the_target_lane_record_a_plain_update() {
    let store = test_store().await;
    let created = store
        .create_task(sample_input("u1", "Write report"))
        .await
        .expect("create");

    let ids = vec![created.id];
    let outcome = store.bulk_update_status(&ids, TaskStatus::Todo).await;
    assert_eq!(outcome.updated.len(), 1);

    let tasks = store.get_user_tasks("u1").await.expect("list");
    let last = tasks[0].activities.last().expect("activity");
    assert_eq!(last.action, ActivityAction::Updated);
    assert_eq!(last.details, "Updated status");
}

#[tokio::test]
async fn empty_id_list_is_an_empty_outcome() {
    let store = test_store().await;
    let outcome = store.bulk_update_status(&[], TaskStatus::Completed).await;
    assert!(outcome.updated.is_empty());
    assert!(outcome.failed.is_empty());
}

#[tokio::test]
async fn concurrent_updates_never_drop_an_activity() {
    let store = test_store().await;
    let created = store
        .create_task(sample_input("u1", "Write report"))
        .await
        .expect("create");

    // Same task listed several times: each pass through the update path
    // must append its own entry even though the calls are in flight
    // together.
    let ids = vec![created.id.clone(), created.id.clone(), created.id];
    let outcome = store.bulk_update_status(&ids, TaskStatus::Completed).await;
    assert_eq!(outcome.updated.len(), 3);

    let tasks = store.get_user_tasks("u1").await.expect("list");
    // CREATED plus one entry per update call.
    assert_eq!(tasks[0].activities.len(), 4);
}
