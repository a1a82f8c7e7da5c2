//! Attachment repository. Only file metadata is stored; the bytes live at
//! `file_path` and are never touched by the core.

use super::error::{Fault, InRepo, RepoError, RepoResult};
use super::{ChildRepository, Repository, NO_UPDATES_PROVIDED};
use crate::db::Store;
use crate::model::attachment::{Attachment, AttachmentPatch};
use crate::validation::{validate_attachment, validate_new_attachment, ValidationReport};

pub struct AttachmentRepository<'store> {
    store: &'store Store,
}

impl<'store> AttachmentRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    fn create_inner(&self, attachment: Attachment) -> Result<Attachment, Fault> {
        validate_new_attachment(&attachment).into_result()?;
        self.store.create_attachment(&attachment)?;
        Ok(attachment)
    }

    fn update_inner(&self, id: &str, patch: &AttachmentPatch) -> Result<(), Fault> {
        if patch.is_empty() {
            return Err(Fault::Rejected(NO_UPDATES_PROVIDED));
        }
        if !self.store.update_attachment(id, patch)? {
            return Err(RepoError::not_found("attachment", id).into());
        }
        Ok(())
    }
}

impl Repository for AttachmentRepository<'_> {
    type Record = Attachment;
    type Patch = AttachmentPatch;

    fn get_all(&self) -> RepoResult<Vec<Attachment>> {
        self.store
            .list_attachments()
            .in_repo("AttachmentRepository.getAll")
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<Attachment>> {
        self.store
            .get_attachment(id)
            .in_repo("AttachmentRepository.getById")
    }

    fn create(&self, attachment: Attachment) -> RepoResult<Attachment> {
        self.create_inner(attachment)
            .in_repo("AttachmentRepository.create")
    }

    fn update(&self, id: &str, patch: &AttachmentPatch) -> RepoResult<()> {
        self.update_inner(id, patch)
            .in_repo("AttachmentRepository.update")
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .delete_attachment(id)
            .in_repo("AttachmentRepository.delete")
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.store
            .clear_all()
            .in_repo("AttachmentRepository.deleteAll")
    }

    fn validate(&self, patch: &AttachmentPatch) -> ValidationReport {
        validate_attachment(patch)
    }
}

impl ChildRepository for AttachmentRepository<'_> {
    fn get_by_task_id(&self, task_id: &str) -> RepoResult<Vec<Attachment>> {
        self.store
            .list_attachments_by_task(task_id)
            .in_repo("AttachmentRepository.getByTaskId")
    }

    fn delete_by_task_id(&self, task_id: &str) -> RepoResult<()> {
        self.store
            .delete_attachments_by_task(task_id)
            .in_repo("AttachmentRepository.deleteByTaskId")
    }
}
