//! Singleton user preferences.
//!
//! # Invariants
//! - Reads never fail for a missing row; defaults are returned instead.
//! - `update` validates the patch, merges it over the current value and
//!   persists the full record.
//! - There is no delete; `reset` writes the defaults back.

use super::error::{Fault, InRepo, RepoResult};
use crate::db::Store;
use crate::model::preferences::{PreferencesPatch, UserPreferences};
use crate::validation::validate_preferences;

pub struct PreferencesRepository<'store> {
    store: &'store Store,
}

impl<'store> PreferencesRepository<'store> {
    pub fn new(store: &'store Store) -> Self {
        Self { store }
    }

    pub fn get(&self) -> RepoResult<UserPreferences> {
        self.store
            .load_preferences()
            .in_repo("PreferencesRepository.get")
    }

    /// Merges `patch` over the stored preferences and returns the result.
    ///
    /// An empty patch is accepted and persists the current values.
    pub fn update(&self, patch: &PreferencesPatch) -> RepoResult<UserPreferences> {
        self.update_inner(patch)
            .in_repo("PreferencesRepository.update")
    }

    /// Overwrites the stored preferences with defaults.
    pub fn reset(&self) -> RepoResult<UserPreferences> {
        let defaults = UserPreferences::default();
        self.store
            .save_preferences(&defaults)
            .map(|()| defaults)
            .in_repo("PreferencesRepository.reset")
    }

    fn update_inner(&self, patch: &PreferencesPatch) -> Result<UserPreferences, Fault> {
        validate_preferences(patch).into_result()?;
        let merged = self.store.load_preferences()?.merged(patch);
        self.store.save_preferences(&merged)?;
        Ok(merged)
    }
}
