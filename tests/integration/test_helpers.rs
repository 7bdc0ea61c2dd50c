//! Shared test helpers for store-level integration tests.
//!
//! Provides reusable construction of an in-memory-backed `TaskStore`
//! and sample creation inputs so individual test modules can focus on
//! behaviour rather than boilerplate.

use std::sync::Arc;

use chrono::NaiveDate;

use taskbuddy::models::task::{NewTask, TaskCategory, TaskStatus};
use taskbuddy::persistence::db;
use taskbuddy::store::TaskStore;

/// Build a `TaskStore` over a fresh in-memory database.
pub async fn test_store() -> TaskStore {
    let database = db::connect_memory().await.expect("db connect");
    TaskStore::new(Arc::new(database))
}

/// A plausible creation input owned by `user_id`.
pub fn sample_input(user_id: &str, title: &str) -> NewTask {
    NewTask {
        title: title.into(),
        description: "Quarterly summary".into(),
        due_date: NaiveDate::from_ymd_opt(2026, 8, 10).expect("valid date"),
        category: TaskCategory::Work,
        status: TaskStatus::Todo,
        user_id: user_id.into(),
        activities: Vec::new(),
        attachment: None,
    }
}
