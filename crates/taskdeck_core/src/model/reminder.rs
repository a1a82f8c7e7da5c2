//! Reminder intent records.
//!
//! A reminder describes when the user wants to be notified about a task.
//! Delivery belongs to an external scheduler, see
//! `service::reminder_service`.

use super::RecordId;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RecurringRule {
    Daily,
    Weekly,
    Monthly,
    Yearly,
    None,
}

string_enum!(
    RecurringRule,
    "Invalid recurring rule. Must be one of: daily, weekly, monthly, yearly, none",
    {
        Daily => "daily",
        Weekly => "weekly",
        Monthly => "monthly",
        Yearly => "yearly",
        None => "none",
    }
);

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Reminder {
    pub id: RecordId,
    pub task_id: RecordId,
    /// Fire time, epoch milliseconds, strictly positive.
    pub reminder_time: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recurring_rule: Option<RecurringRule>,
    #[serde(default = "default_active")]
    pub is_active: bool,
}

fn default_active() -> bool {
    true
}

impl Reminder {
    pub fn new(id: impl Into<RecordId>, task_id: impl Into<RecordId>, reminder_time: i64) -> Self {
        Self {
            id: id.into(),
            task_id: task_id.into(),
            reminder_time,
            recurring_rule: None,
            is_active: true,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ReminderPatch {
    pub reminder_time: Option<i64>,
    pub recurring_rule: Option<Option<RecurringRule>>,
    pub is_active: Option<bool>,
}

impl ReminderPatch {
    pub fn is_empty(&self) -> bool {
        self.reminder_time.is_none() && self.recurring_rule.is_none() && self.is_active.is_none()
    }
}
