//! Category record.

use super::{now_epoch_ms, RecordId};
use serde::{Deserialize, Serialize};

/// User-defined grouping for tasks.
///
/// Deleting a category detaches its tasks instead of deleting them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    pub id: RecordId,
    /// Unique, 1..=50 characters.
    pub name: String,
    /// `#RRGGBB` hex color.
    pub color: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    pub created_at: i64,
}

impl Category {
    pub fn new(id: impl Into<RecordId>, name: impl Into<String>, color: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            color: color.into(),
            icon: None,
            created_at: now_epoch_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryPatch {
    pub name: Option<String>,
    pub color: Option<String>,
    pub icon: Option<Option<String>>,
}

impl CategoryPatch {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.color.is_none() && self.icon.is_none()
    }
}
