//! Activity model — one immutable audit entry per task mutation.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Kind of mutation an activity records.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ActivityAction {
    /// Task record was created.
    Created,
    /// One or more fields changed, status unchanged.
    Updated,
    /// Status moved from one lane to another.
    StatusChanged,
}

/// An immutable entry in a task's append-only activity log.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct Activity {
    /// Kind of mutation recorded.
    pub action: ActivityAction,
    /// When the mutation occurred.
    pub timestamp: DateTime<Utc>,
    /// Human-readable summary of what changed.
    pub details: String,
}

impl Activity {
    /// Construct an activity entry.
    #[must_use]
    pub fn new(action: ActivityAction, timestamp: DateTime<Utc>, details: impl Into<String>) -> Self {
        Self {
            action,
            timestamp,
            details: details.into(),
        }
    }

    /// The single entry seeded as the first element of every task's log.
    #[must_use]
    pub fn created(timestamp: DateTime<Utc>) -> Self {
        Self::new(ActivityAction::Created, timestamp, "Task created")
    }
}
