//! User preferences singleton.
//!
//! # Invariants
//! - Exactly one preferences record exists per store (lazily created).
//! - Updates merge present fields into the current record.

use super::task::TaskPriority;
use serde::{Deserialize, Serialize};

pub const MIN_FONT_SIZE: i64 = 12;
pub const MAX_FONT_SIZE: i64 = 24;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Theme {
    #[default]
    Light,
    Dark,
}

string_enum!(Theme, "Theme must be either \"light\" or \"dark\"", {
    Light => "light",
    Dark => "dark",
});

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DefaultView {
    #[default]
    List,
    Kanban,
}

string_enum!(DefaultView, "Default view must be either \"list\" or \"kanban\"", {
    List => "list",
    Kanban => "kanban",
});

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UserPreferences {
    pub theme: Theme,
    /// `MIN_FONT_SIZE..=MAX_FONT_SIZE`.
    pub font_size: i64,
    pub default_view: DefaultView,
    pub enable_notifications: bool,
    pub default_priority: TaskPriority,
}

impl Default for UserPreferences {
    fn default() -> Self {
        Self {
            theme: Theme::Light,
            font_size: 16,
            default_view: DefaultView::List,
            enable_notifications: true,
            default_priority: TaskPriority::None,
        }
    }
}

impl UserPreferences {
    /// Returns a copy with every present patch field applied.
    pub fn merged(&self, patch: &PreferencesPatch) -> Self {
        Self {
            theme: patch.theme.unwrap_or(self.theme),
            font_size: patch.font_size.unwrap_or(self.font_size),
            default_view: patch.default_view.unwrap_or(self.default_view),
            enable_notifications: patch
                .enable_notifications
                .unwrap_or(self.enable_notifications),
            default_priority: patch.default_priority.unwrap_or(self.default_priority),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PreferencesPatch {
    pub theme: Option<Theme>,
    pub font_size: Option<i64>,
    pub default_view: Option<DefaultView>,
    pub enable_notifications: Option<bool>,
    pub default_priority: Option<TaskPriority>,
}
