//! Read-only retrieval over an [`AchievementStore`], the only surface the
//! listing, profile and certificate renderers consume.

use crate::error::RegistryError;
use crate::state::AchievementRecord;
use crate::storage::AchievementStore;

/// Single-record lookup; the one read that distinguishes `NotFound`.
pub fn get_achievement(
    store: &dyn AchievementStore,
    token_id: &str,
) -> Result<AchievementRecord, RegistryError> {
    store.get_by_token_id(token_id)
}

/// All records in insertion order; an empty or missing store reads empty.
pub fn list_achievements(
    store: &dyn AchievementStore,
) -> Result<Vec<AchievementRecord>, RegistryError> {
    store.get_all()
}

/// Records owned by `owner` (case-insensitive), in insertion order.
pub fn list_by_owner(
    store: &dyn AchievementStore,
    owner: &str,
) -> Result<Vec<AchievementRecord>, RegistryError> {
    store.get_by_owner(owner)
}

pub fn count(store: &dyn AchievementStore) -> Result<usize, RegistryError> {
    store.count()
}
