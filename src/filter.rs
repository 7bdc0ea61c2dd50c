//! Task filtering: search term, category, and relative due-date buckets.
//!
//! Pure functions over in-memory task collections. The current date is
//! always an explicit parameter so bucket boundaries are deterministic
//! under test; nothing here reads the system clock.

use chrono::{Days, Months, NaiveDate};
use serde::{Deserialize, Serialize};

use crate::models::task::{Task, TaskStatus};

/// Filter specification. Empty strings mean "no filter" for that
/// criterion; a task passes only if it passes all three.
#[derive(Debug, Clone, Default, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case", default)]
pub struct TaskFilter {
    /// Case-insensitive substring matched against title and description.
    pub search_term: String,
    /// Case-insensitive exact category match.
    pub category: String,
    /// Relative due-date bucket name (Today, Last Day, Last Week,
    /// Last Month), matched case-insensitively. Unrecognized values
    /// pass unconditionally.
    pub due_date: String,
}

/// Named relative due-date window.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum DueDateBucket {
    Today,
    LastDay,
    LastWeek,
    LastMonth,
}

fn parse_bucket(s: &str) -> Option<DueDateBucket> {
    match s.to_uppercase().as_str() {
        "TODAY" => Some(DueDateBucket::Today),
        "LAST DAY" => Some(DueDateBucket::LastDay),
        "LAST WEEK" => Some(DueDateBucket::LastWeek),
        "LAST MONTH" => Some(DueDateBucket::LastMonth),
        _ => None,
    }
}

/// Whether `due_date` falls in `bucket` relative to `today`, at day
/// granularity. Week and month windows are closed intervals.
fn bucket_matches(bucket: DueDateBucket, due_date: NaiveDate, today: NaiveDate) -> bool {
    match bucket {
        DueDateBucket::Today => due_date == today,
        DueDateBucket::LastDay => today.pred_opt().is_some_and(|y| due_date == y),
        DueDateBucket::LastWeek => today
            .checked_sub_days(Days::new(7))
            .is_none_or(|lo| lo <= due_date)
            && due_date <= today,
        DueDateBucket::LastMonth => today
            .checked_sub_months(Months::new(1))
            .is_none_or(|lo| lo <= due_date)
            && due_date <= today,
    }
}

impl TaskFilter {
    /// Whether `task` passes every criterion of this filter.
    #[must_use]
    pub fn matches(&self, task: &Task, today: NaiveDate) -> bool {
        let search_match = self.search_term.is_empty() || {
            let term = self.search_term.to_lowercase();
            task.title.to_lowercase().contains(&term)
                || task.description.to_lowercase().contains(&term)
        };

        let category_match = self.category.is_empty()
            || task.category.as_str().eq_ignore_ascii_case(&self.category);

        let due_date_match = self.due_date.is_empty()
            || parse_bucket(&self.due_date)
                .is_none_or(|bucket| bucket_matches(bucket, task.due_date, today));

        search_match && category_match && due_date_match
    }
}

/// Narrow `tasks` to those passing `filter` as of `today`.
#[must_use]
pub fn filter_tasks(tasks: &[Task], filter: &TaskFilter, today: NaiveDate) -> Vec<Task> {
    tasks
        .iter()
        .filter(|task| filter.matches(task, today))
        .cloned()
        .collect()
}

/// Tasks partitioned into the three status lanes. Filtering composes
/// with, and is independent from, this partition.
#[derive(Debug, Clone, Default, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct StatusLanes {
    /// TO-DO lane.
    pub todo: Vec<Task>,
    /// IN-PROGRESS lane.
    pub in_progress: Vec<Task>,
    /// COMPLETED lane.
    pub completed: Vec<Task>,
}

/// Partition `tasks` by status, preserving input order within each lane.
#[must_use]
pub fn partition_by_status(tasks: Vec<Task>) -> StatusLanes {
    let mut lanes = StatusLanes::default();
    for task in tasks {
        match task.status {
            TaskStatus::Todo => lanes.todo.push(task),
            TaskStatus::InProgress => lanes.in_progress.push(task),
            TaskStatus::Completed => lanes.completed.push(task),
        }
    }
    lanes
}
