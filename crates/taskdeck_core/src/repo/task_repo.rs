//! Task repository over the shared [`Store`].
//!
//! # Responsibility
//! - Provide validated CRUD, search and filter for tasks.
//! - Offer status shortcuts and sequential batch operations.
//!
//! # Invariants
//! - Batches run item by item with no enclosing transaction. The first
//!   failure stops the batch; earlier items stay committed.
//! - `toggle_status` flips only between incomplete and completed.

use super::error::{Fault, InRepo, RepoError, RepoResult};
use super::{Repository, NO_UPDATES_PROVIDED};
use crate::db::Store;
use crate::model::task::{Task, TaskFilter, TaskPatch, TaskStatus};
use crate::model::RecordId;
use crate::validation::{validate_new_task, validate_task, ValidationReport};

/// One item of [`TaskRepository::batch_update`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskChanges {
    pub id: RecordId,
    pub changes: TaskPatch,
}

impl TaskChanges {
    pub fn new(id: impl Into<RecordId>, changes: TaskPatch) -> Self {
        Self {
            id: id.into(),
            changes,
        }
    }
}

pub struct TaskRepository<'store> {
    store: &'store Store,
}

impl<'store> TaskRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    /// Case-insensitive substring search over title and description.
    pub fn search(&self, query: &str) -> RepoResult<Vec<Task>> {
        self.store
            .search_tasks(query)
            .in_repo("TaskRepository.search")
    }

    /// Tasks matching every set criterion, in display order.
    pub fn filter(&self, filter: &TaskFilter) -> RepoResult<Vec<Task>> {
        self.store
            .filter_tasks(filter)
            .in_repo("TaskRepository.filter")
    }

    pub fn get_by_category(&self, category_id: &str) -> RepoResult<Vec<Task>> {
        let filter = TaskFilter {
            category_id: Some(category_id.to_string()),
            ..TaskFilter::default()
        };
        self.store
            .filter_tasks(&filter)
            .in_repo("TaskRepository.getByCategory")
    }

    /// Applies each item in order, stopping at the first failure.
    pub fn batch_update(&self, items: &[TaskChanges]) -> RepoResult<()> {
        self.batch_update_inner(items)
            .in_repo("TaskRepository.batchUpdate")
    }

    /// Deletes each id in order, stopping at the first failure.
    pub fn batch_delete<S: AsRef<str>>(&self, ids: &[S]) -> RepoResult<()> {
        self.batch_delete_inner(ids)
            .in_repo("TaskRepository.batchDelete")
    }

    /// Moves a task to `status` and returns the stored record.
    pub fn set_status(&self, id: &str, status: TaskStatus) -> RepoResult<Task> {
        self.apply_status(id, |_| status)
            .in_repo("TaskRepository.setStatus")
    }

    /// Flips incomplete and completed; other statuses are returned unchanged.
    pub fn toggle_status(&self, id: &str) -> RepoResult<Task> {
        self.apply_status(id, TaskStatus::toggled)
            .in_repo("TaskRepository.toggleStatus")
    }

    fn apply_status(
        &self,
        id: &str,
        next: impl FnOnce(TaskStatus) -> TaskStatus,
    ) -> Result<Task, Fault> {
        let current = self
            .store
            .get_task(id)?
            .ok_or_else(|| RepoError::not_found("task", id))?;
        let status = next(current.status);
        if status == current.status {
            return Ok(current);
        }
        if !self.store.update_task(id, &TaskPatch::status(status))? {
            return Err(RepoError::not_found("task", id).into());
        }
        let updated = self
            .store
            .get_task(id)?
            .ok_or_else(|| RepoError::not_found("task", id))?;
        Ok(updated)
    }

    fn batch_update_inner(&self, items: &[TaskChanges]) -> Result<(), Fault> {
        for item in items {
            self.update(&item.id, &item.changes)?;
        }
        Ok(())
    }

    fn batch_delete_inner<S: AsRef<str>>(&self, ids: &[S]) -> Result<(), Fault> {
        for id in ids {
            self.delete(id.as_ref())?;
        }
        Ok(())
    }

    /// Raises a stale `updated_at` to `created_at` before insert.
    fn create_inner(&self, mut task: Task) -> Result<Task, Fault> {
        validate_new_task(&task).into_result()?;
        task.updated_at = task.updated_at.max(task.created_at);
        self.store.create_task(&task)?;
        Ok(task)
    }

    fn update_inner(&self, id: &str, patch: &TaskPatch) -> Result<(), Fault> {
        if patch.is_empty() {
            return Err(Fault::Rejected(NO_UPDATES_PROVIDED));
        }
        if !self.store.update_task(id, patch)? {
            return Err(RepoError::not_found("task", id).into());
        }
        Ok(())
    }
}

impl Repository for TaskRepository<'_> {
    type Record = Task;
    type Patch = TaskPatch;

    fn get_all(&self) -> RepoResult<Vec<Task>> {
        self.store.list_tasks().in_repo("TaskRepository.getAll")
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<Task>> {
        self.store.get_task(id).in_repo("TaskRepository.getById")
    }

    fn create(&self, task: Task) -> RepoResult<Task> {
        self.create_inner(task).in_repo("TaskRepository.create")
    }

    fn update(&self, id: &str, patch: &TaskPatch) -> RepoResult<()> {
        self.update_inner(id, patch)
            .in_repo("TaskRepository.update")
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.store.delete_task(id).in_repo("TaskRepository.delete")
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.store.clear_all().in_repo("TaskRepository.deleteAll")
    }

    fn validate(&self, patch: &TaskPatch) -> ValidationReport {
        validate_task(patch)
    }
}
