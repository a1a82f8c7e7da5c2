//! File attachment metadata.
//!
//! Only metadata is stored; file bytes live at `file_path`, outside core.

use super::{now_epoch_ms, RecordId};
use serde::{Deserialize, Serialize};

/// Upper bound for `file_size`, in bytes.
pub const MAX_ATTACHMENT_SIZE_BYTES: i64 = 100 * 1024 * 1024;

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    pub id: RecordId,
    pub task_id: RecordId,
    pub file_name: String,
    /// Bytes, `1..=MAX_ATTACHMENT_SIZE_BYTES`.
    pub file_size: i64,
    /// MIME type or extension, as reported by the picker.
    pub file_type: String,
    pub file_path: String,
    pub created_at: i64,
}

impl Attachment {
    pub fn new(
        id: impl Into<RecordId>,
        task_id: impl Into<RecordId>,
        file_name: impl Into<String>,
        file_size: i64,
        file_type: impl Into<String>,
        file_path: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            file_name: file_name.into(),
            file_size,
            file_type: file_type.into(),
            file_path: file_path.into(),
            created_at: now_epoch_ms(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AttachmentPatch {
    pub file_name: Option<String>,
    pub file_size: Option<i64>,
    pub file_type: Option<String>,
    pub file_path: Option<String>,
}

impl AttachmentPatch {
    pub fn is_empty(&self) -> bool {
        self.file_name.is_none()
            && self.file_size.is_none()
            && self.file_type.is_none()
            && self.file_path.is_none()
    }
}
