//! Category repository.
//!
//! Deleting a category detaches its tasks (`categoryId` becomes NULL); the
//! tasks themselves survive.
//!
//! Names are stored trimmed, so uniqueness holds on the trimmed value.

use super::error::{Fault, InRepo, RepoError, RepoResult};
use super::{Repository, NO_UPDATES_PROVIDED};
use crate::db::Store;
use crate::model::category::{Category, CategoryPatch};
use crate::validation::{validate_category, validate_new_category, ValidationReport};

pub struct CategoryRepository<'store> {
    store: &'store Store,
}

impl<'store> CategoryRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    /// Exact, case-sensitive lookup of the trimmed name.
    pub fn get_by_name(&self, name: &str) -> RepoResult<Option<Category>> {
        self.store
            .get_category_by_name(name.trim())
            .in_repo("CategoryRepository.getByName")
    }

    fn create_inner(&self, mut category: Category) -> Result<Category, Fault> {
        validate_new_category(&category).into_result()?;
        category.name = category.name.trim().to_string();
        self.store.create_category(&category)?;
        Ok(category)
    }

    fn update_inner(&self, id: &str, patch: &CategoryPatch) -> Result<(), Fault> {
        if patch.is_empty() {
            return Err(Fault::Rejected(NO_UPDATES_PROVIDED));
        }
        let patch = CategoryPatch {
            name: patch.name.as_deref().map(|name| name.trim().to_string()),
            ..patch.clone()
        };
        if !self.store.update_category(id, &patch)? {
            return Err(RepoError::not_found("category", id).into());
        }
        Ok(())
    }
}

impl Repository for CategoryRepository<'_> {
    type Record = Category;
    type Patch = CategoryPatch;

    fn get_all(&self) -> RepoResult<Vec<Category>> {
        self.store
            .list_categories()
            .in_repo("CategoryRepository.getAll")
    }

    fn get_by_id(&self, id: &str) -> RepoResult<Option<Category>> {
        self.store
            .get_category(id)
            .in_repo("CategoryRepository.getById")
    }

    fn create(&self, category: Category) -> RepoResult<Category> {
        self.create_inner(category)
            .in_repo("CategoryRepository.create")
    }

    fn update(&self, id: &str, patch: &CategoryPatch) -> RepoResult<()> {
        self.update_inner(id, patch)
            .in_repo("CategoryRepository.update")
    }

    fn delete(&self, id: &str) -> RepoResult<()> {
        self.store
            .delete_category(id)
            .in_repo("CategoryRepository.delete")
    }

    fn delete_all(&self) -> RepoResult<()> {
        self.store
            .clear_all()
            .in_repo("CategoryRepository.deleteAll")
    }

    fn validate(&self, patch: &CategoryPatch) -> ValidationReport {
        validate_category(patch)
    }
}
