//! Reminder scheduling use-cases.
//!
//! # Responsibility
//! - Turn stored reminders into requests against a host-provided
//!   [`NotificationScheduler`].
//!
//! # Invariants
//! - Only active reminders strictly after `now_ms` are scheduled.
//! - The notification title is the owning task's title.
//! - The core never delivers notifications itself.

use crate::db::Store;
use crate::model::reminder::Reminder;
use crate::model::RecordId;
use crate::repo::reminder_repo::ReminderRepository;
use crate::repo::task_repo::TaskRepository;
use crate::repo::{ChildRepository, RepoError, Repository};
use log::{info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Opaque token identifying one scheduled notification on the host.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ScheduleHandle(pub String);

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchedulerError(pub String);

impl Display for SchedulerError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "notification scheduler failed: {}", self.0)
    }
}

impl Error for SchedulerError {}

/// Host capability for local notifications.
pub trait NotificationScheduler {
    fn schedule(
        &self,
        task_id: &str,
        title: &str,
        fire_at_ms: i64,
    ) -> Result<ScheduleHandle, SchedulerError>;

    fn cancel(&self, handle: &ScheduleHandle) -> Result<(), SchedulerError>;
}

/// A reminder paired with the host handle it was scheduled under.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScheduledReminder {
    pub reminder_id: RecordId,
    pub handle: ScheduleHandle,
}

#[derive(Debug)]
pub enum ServiceError {
    Repo(RepoError),
    Scheduler(SchedulerError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Repo(err) => write!(f, "{err}"),
            Self::Scheduler(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Repo(err) => Some(err),
            Self::Scheduler(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        Self::Repo(value)
    }
}

impl From<SchedulerError> for ServiceError {
    fn from(value: SchedulerError) -> Self {
        Self::Scheduler(value)
    }
}

pub type ServiceResult<T> = Result<T, ServiceError>;

pub struct ReminderService<'store, S: NotificationScheduler> {
    tasks: TaskRepository<'store>,
    reminders: ReminderRepository<'store>,
    scheduler: S,
}

impl<'store, S: NotificationScheduler> ReminderService<'store, S> {
    pub fn new(store: &'store Store, scheduler: S) -> Self {
        Self {
            tasks: TaskRepository::new(store),
            reminders: ReminderRepository::new(store),
            scheduler,
        }
    }

    /// Schedules every pending reminder of `task_id`.
    ///
    /// # Errors
    /// - `RepoError::NotFound` when the task does not exist.
    /// - The first scheduler failure; reminders scheduled before it keep
    ///   their host registration.
    pub fn schedule_task(
        &self,
        task_id: &str,
        now_ms: i64,
    ) -> ServiceResult<Vec<ScheduledReminder>> {
        let task = self
            .tasks
            .get_by_id(task_id)?
            .ok_or_else(|| RepoError::NotFound {
                entity: "task",
                id: task_id.to_string(),
            })?;
        let pending = self
            .reminders
            .get_by_task_id(task_id)?
            .into_iter()
            .filter(|reminder| is_pending(reminder, now_ms));

        let mut scheduled = Vec::new();
        for reminder in pending {
            scheduled.push(self.schedule_one(&reminder, &task.title)?);
        }
        info!(
            "event=reminders_schedule module=service status=ok scheduled={}",
            scheduled.len()
        );
        Ok(scheduled)
    }

    /// Schedules every pending reminder across all tasks, soonest first.
    pub fn schedule_all_active(&self, now_ms: i64) -> ServiceResult<Vec<ScheduledReminder>> {
        let mut scheduled = Vec::new();
        for reminder in self.reminders.get_active()? {
            if !is_pending(&reminder, now_ms) {
                continue;
            }
            let Some(task) = self.tasks.get_by_id(&reminder.task_id)? else {
                continue;
            };
            scheduled.push(self.schedule_one(&reminder, &task.title)?);
        }
        Ok(scheduled)
    }

    /// Cancels each handle, stopping at the first scheduler failure.
    pub fn cancel(&self, handles: &[ScheduleHandle]) -> ServiceResult<()> {
        for handle in handles {
            if let Err(err) = self.scheduler.cancel(handle) {
                warn!("event=reminder_cancel module=service status=error error={err}");
                return Err(err.into());
            }
        }
        Ok(())
    }

    fn schedule_one(&self, reminder: &Reminder, title: &str) -> ServiceResult<ScheduledReminder> {
        let handle = self
            .scheduler
            .schedule(&reminder.task_id, title, reminder.reminder_time)
            .map_err(|err| {
                warn!("event=reminder_schedule module=service status=error error={err}");
                err
            })?;
        Ok(ScheduledReminder {
            reminder_id: reminder.id.clone(),
            handle,
        })
    }
}

fn is_pending(reminder: &Reminder, now_ms: i64) -> bool {
    reminder.is_active && reminder.reminder_time > now_ms
}
