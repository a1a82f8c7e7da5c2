//! Subtask record, owned by a parent task.

use super::RecordId;
use serde::{Deserialize, Serialize};

/// Checklist item under a task. Deleted together with its parent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Subtask {
    pub id: RecordId,
    pub task_id: RecordId,
    pub title: String,
    #[serde(default)]
    pub completed: bool,
    /// Position within the parent task, ascending.
    #[serde(default)]
    pub task_order: i64,
}

impl Subtask {
    pub fn new(
        id: impl Into<RecordId>,
        task_id: impl Into<RecordId>,
        title: impl Into<String>,
        task_order: i64,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            title: title.into(),
            completed: false,
            task_order,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SubtaskPatch {
    pub title: Option<String>,
    pub completed: Option<bool>,
    pub task_order: Option<i64>,
}

impl SubtaskPatch {
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.completed.is_none() && self.task_order.is_none()
    }
}
