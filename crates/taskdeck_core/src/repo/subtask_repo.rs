//! Subtask repository. Subtasks are owned by a task and cascade with it.

use super::error::{Fault, InRepo, RepoError, RepoResult};
use super::{ChildRepository, Repository, NO_UPDATES_PROVIDED};
use crate::db::Store;
use crate::model::subtask::{Subtask, SubtaskPatch};
use crate::validation::{validate_new_subtask, validate_subtask, ValidationReport};

pub struct SubtaskRepository<'store> {
    store: &'store Store,
}

impl<'store> SubtaskRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    /// Flips `completed` in place and returns the stored record.
    pub fn toggle_complete(&self, id: &str) -> RepoResult<Subtask> {
        self.toggle_complete_inner(id)
            .in_repo("SubtaskRepository.toggleComplete")
    }

    fn toggle_complete_inner(&self, id: &str) -> Result<Subtask, Fault> {
        if !self.store.toggle_subtask(id)? {
            return Err(RepoError::not_found("subtask", id).into());
        }
        let subtask = self
            .store
            .get_subtask(id)?
            .ok_or_else(|| RepoError::not_found("subtask", id))?;
        Ok(subtask)
    }

    fn create_inner(&self, subtask: Subtask) -> Result<Subtask, Fault> {
        validate_new_subtask(&subtask).into_result()?;
        self.store.create_subtask(&subtask)?;
        Ok(subtask)
    }

    fn update_inner(&self, id: &str, patch: &SubtaskPatch) -> Result<(), Fault> {
        if patch.is_empty() {
            return Err(Fault::Rejected(NO_UPDATES_PROVIDED));
        }
        if !self.store.update_subtask(id, patch)? {
            return Err(RepoError::not_found("subtask", id).into());
        }
        Ok(())
    }
}

impl Repository for SubtaskRepository<'_> {
    type Record = Subtask;
    type Patch = SubtaskPatch;

    fn get_all(&self) -> RepoResult<Vec<Subtask>> {
        self.store
            .list_subtasks()
            .in_repo("SubtaskRepository.getAll")
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<Subtask>> {
        self.store
            .get_subtask(id)
            .in_repo("SubtaskRepository.getById")
    }

    fn create(&self, subtask: Subtask) -> RepoResult<Subtask> {
        self.create_inner(subtask)
            .in_repo("SubtaskRepository.create")
    }

    fn update(&self, id: &str, patch: &SubtaskPatch) -> RepoResult<()> {
        self.update_inner(id, patch)
            .in_repo("SubtaskRepository.update")
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .delete_subtask(id)
            .in_repo("SubtaskRepository.delete")
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.store
            .clear_all()
            .in_repo("SubtaskRepository.deleteAll")
    }

    fn validate(&self, patch: &SubtaskPatch) -> ValidationReport {
        validate_subtask(patch)
    }
}

impl ChildRepository for SubtaskRepository<'_> {
    /// Ordered by `task_order`.
    fn get_by_task_id(&self, task_id: &str) -> RepoResult<Vec<Subtask>> {
        self.store
            .list_subtasks_by_task(task_id)
            .in_repo("SubtaskRepository.getByTaskId")
    }

    fn delete_by_task_id(&self, task_id: &str) -> RepoResult<()> {
        self.store
            .delete_subtasks_by_task(task_id)
            .in_repo("SubtaskRepository.deleteByTaskId")
    }
}
