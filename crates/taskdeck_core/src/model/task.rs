//! Task record, lifecycle enums and query/patch payloads.
//!
//! # Invariants
//! - `updated_at >= created_at`; storage refreshes `updated_at` on every
//!   mutation and never trusts a caller-provided value on update.
//! - Status transitions are unrestricted; only `toggled` is constrained.

use super::{now_epoch_ms, RecordId};
use serde::{Deserialize, Serialize};

/// Task lifecycle state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskStatus {
    /// Created, not done yet.
    #[default]
    Incomplete,
    InProgress,
    Completed,
    /// Hidden from active lists but kept.
    Archived,
}

string_enum!(TaskStatus, "Invalid task status", {
    Incomplete => "incomplete",
    InProgress => "in_progress",
    Completed => "completed",
    Archived => "archived",
});

impl TaskStatus {
    /// Flips `incomplete <-> completed`; other states are returned as-is.
    pub fn toggled(self) -> Self {
        match self {
            Self::Incomplete => Self::Completed,
            Self::Completed => Self::Incomplete,
            other => other,
        }
    }
}

/// Task priority, shared with user preferences.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TaskPriority {
    High,
    Medium,
    Low,
    #[default]
    None,
}

string_enum!(TaskPriority, "Invalid task priority", {
    High => "high",
    Medium => "medium",
    Low => "low",
    None => "none",
});

/// A user-created to-do item.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Task {
    pub id: RecordId,
    /// 1..=200 characters after trimming.
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub status: TaskStatus,
    #[serde(default)]
    pub priority: TaskPriority,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub due_date: Option<i64>,
    /// Cleared by storage when the referenced category is deleted.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub category_id: Option<RecordId>,
    /// Display order key, ascending.
    #[serde(default)]
    pub order: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

impl Task {
    /// Creates a task with default status/priority, stamped with the
    /// current time.
    pub fn new(id: impl Into<RecordId>, title: impl Into<String>) -> Self {
        let now = now_epoch_ms();
        Self {
            id: id.into(),
            title: title.into(),
            description: None,
            status: TaskStatus::default(),
            priority: TaskPriority::default(),
            due_date: None,
            category_id: None,
            order: 0,
            created_at: now,
            updated_at: now,
        }
    }
}

/// Partial update for a task.
///
/// Nullable columns use `Option<Option<T>>`: `None` leaves the column
/// untouched, `Some(None)` clears it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub description: Option<Option<String>>,
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub due_date: Option<Option<i64>>,
    pub category_id: Option<Option<RecordId>>,
    pub order: Option<i64>,
}

impl TaskPatch {
    /// Patch that only changes status.
    pub fn status(status: TaskStatus) -> Self {
        Self {
            status: Some(status),
            ..Self::default()
        }
    }

    /// Returns `true` when no field is set.
    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.description.is_none()
            && self.status.is_none()
            && self.priority.is_none()
            && self.due_date.is_none()
            && self.category_id.is_none()
            && self.order.is_none()
    }
}

/// Conjunctive task filter. Unset fields do not constrain the result.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskFilter {
    pub status: Option<TaskStatus>,
    pub priority: Option<TaskPriority>,
    pub category_id: Option<RecordId>,
    /// Inclusive lower bound on `due_date`.
    pub due_date_from: Option<i64>,
    /// Inclusive upper bound on `due_date`.
    pub due_date_to: Option<i64>,
    /// Case-insensitive substring over title or description.
    pub search_query: Option<String>,
}
