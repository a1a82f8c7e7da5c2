//! Repository layer: validated, logged data access per entity.
//!
//! # Responsibility
//! - Define the uniform repository contract shared by every entity.
//! - Run create paths through validation before any SQL is issued.
//! - Normalize every failure through the shared error shim.
//!
//! # Invariants
//! - `create` never touches storage when validation fails.
//! - `update` rejects an empty patch before touching storage; present
//!   fields are not re-validated as a whole record.
//! - `update` on an unknown id yields `RepoError::NotFound`; `delete` is
//!   idempotent.
//! - `delete_all` wipes the whole store, every entity, whichever
//!   repository it is called on.
//!
//! # See also
//! - error.rs for the error taxonomy and logging contract.

pub mod attachment_repo;
pub mod category_repo;
pub mod error;
pub mod preferences_repo;
pub mod reminder_repo;
pub mod subtask_repo;
pub mod task_repo;

use crate::validation::ValidationReport;
pub use error::{ErrorCode, RepoError, RepoResult, RepositoryException};

pub(crate) const NO_UPDATES_PROVIDED: &str = "No updates provided";

/// Uniform CRUD contract over one entity table.
pub trait Repository {
    type Record;
    type Patch;

    /// Returns every record in storage order for the entity.
    fn get_all(&self) -> RepoResult<Vec<Self::Record>>;

    /// Looks up one record; an unknown id is `Ok(None)`.
    fn get_by_id(&self, id: &str) -> RepoResult<Option<Self::Record>>;

    /// Validates and inserts `record`, returning it as stored.
    fn create(&self, record: Self::Record) -> RepoResult<Self::Record>;

    /// Applies the present fields of `patch` to the record `id`.
    fn update(&self, id: &str, patch: &Self::Patch) -> RepoResult<()>;

    fn delete(&self, id: &str) -> RepoResult<()>;

    /// Deletes every row of every entity, preferences included.
    fn delete_all(&self) -> RepoResult<()>;

    /// Runs the entity's field rules on a partial payload.
    fn validate(&self, patch: &Self::Patch) -> ValidationReport;
}

/// Extra lookups for records owned by a task.
pub trait ChildRepository: Repository {
    /// Records belonging to `task_id`, in per-entity display order.
    fn get_by_task_id(&self, task_id: &str) -> RepoResult<Vec<Self::Record>>;

    fn delete_by_task_id(&self, task_id: &str) -> RepoResult<()>;
}
