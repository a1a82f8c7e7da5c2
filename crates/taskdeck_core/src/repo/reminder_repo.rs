//! Reminder repository.
//!
//! Reminders are data only; delivery is delegated to a
//! `NotificationScheduler` by the reminder service.

use super::error::{Fault, InRepo, RepoError, RepoResult};
use super::{ChildRepository, Repository, NO_UPDATES_PROVIDED};
use crate::db::Store;
use crate::model::reminder::{Reminder, ReminderPatch};
use crate::validation::{validate_new_reminder, validate_reminder, ValidationReport};

pub struct ReminderRepository<'store> {
    store: &'store Store,
}

impl<'store> ReminderRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    /// Active reminders across all tasks, soonest first.
    pub fn get_active(&self) -> RepoResult<Vec<Reminder>> {
        self.store
            .list_active_reminders()
            .in_repo("ReminderRepository.getActive")
    }

    fn create_inner(&self, reminder: Reminder) -> Result<Reminder, Fault> {
        validate_new_reminder(&reminder).into_result()?;
        self.store.create_reminder(&reminder)?;
        Ok(reminder)
    }

    fn update_inner(&self, id: &str, patch: &ReminderPatch) -> Result<(), Fault> {
        if patch.is_empty() {
            return Err(Fault::Rejected(NO_UPDATES_PROVIDED));
        }
        if !self.store.update_reminder(id, patch)? {
            return Err(RepoError::not_found("reminder", id).into());
        }
        Ok(())
    }
}

impl Repository for ReminderRepository<'_> {
    type Record = Reminder;
    type Patch = ReminderPatch;

    fn get_all(&self) -> RepoResult<Vec<Reminder>> {
        self.store
            .list_reminders()
            .in_repo("ReminderRepository.getAll")
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<Reminder>> {
        self.store
            .get_reminder(id)
            .in_repo("ReminderRepository.getById")
    }

    fn create(&self, reminder: Reminder) -> RepoResult<Reminder> {
        self.create_inner(reminder)
            .in_repo("ReminderRepository.create")
    }

    fn update(&self, id: &str, patch: &ReminderPatch) -> RepoResult<()> {
        self.update_inner(id, patch)
            .in_repo("ReminderRepository.update")
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .delete_reminder(id)
            .in_repo("ReminderRepository.delete")
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.store
            .clear_all()
            .in_repo("ReminderRepository.deleteAll")
    }

    fn validate(&self, patch: &ReminderPatch) -> ValidationReport {
        validate_reminder(patch)
    }
}

impl ChildRepository for ReminderRepository<'_> {
    /// Ordered by `reminder_time`.
    fn get_by_task_id(&self, task_id: &str) -> RepoResult<Vec<Reminder>> {
        self.store
            .list_reminders_by_task(task_id)
            .in_repo("ReminderRepository.getByTaskId")
    }

    fn delete_by_task_id(&self, task_id: &str) -> RepoResult<()> {
        self.store
            .delete_reminders_by_task(task_id)
            .in_repo("ReminderRepository.deleteByTaskId")
    }
}
