//! Core persistence and domain rules for taskdeck.
//! Every write from a host goes through the repositories defined here.

pub mod config;
pub mod db;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod validation;

pub use config::CoreConfig;
pub use db::{DbError, DbResult, Store};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::attachment::{Attachment, AttachmentPatch};
pub use model::category::{Category, CategoryPatch};
pub use model::preferences::{DefaultView, PreferencesPatch, Theme, UserPreferences};
pub use model::reminder::{RecurringRule, Reminder, ReminderPatch};
pub use model::subtask::{Subtask, SubtaskPatch};
pub use model::task::{Task, TaskFilter, TaskPatch, TaskPriority, TaskStatus};
pub use model::{new_id, now_epoch_ms, ParseEnumError, RecordId};
pub use repo::attachment_repo::AttachmentRepository;
pub use repo::category_repo::CategoryRepository;
pub use repo::preferences_repo::PreferencesRepository;
pub use repo::reminder_repo::ReminderRepository;
pub use repo::subtask_repo::SubtaskRepository;
pub use repo::task_repo::{TaskChanges, TaskRepository};
pub use repo::{
    ChildRepository, ErrorCode, RepoError, RepoResult, Repository, RepositoryException,
};
pub use service::reminder_service::{
    NotificationScheduler, ReminderService, ScheduleHandle, ScheduledReminder, SchedulerError,
    ServiceError,
};
pub use validation::{ValidationErrors, ValidationReport};

/// Liveness probe for host integration.
pub fn ping() -> &'static str {
    "pong"
}

pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_matches_package() {
        assert_eq!(core_version(), "0.1.0");
    }
}
