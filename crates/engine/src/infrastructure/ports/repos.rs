//! Repository port traits for the remote location store.

use async_trait::async_trait;
use mishwar_domain::{LocationId, SavedLocation, SavedLocationDraft, UserId};

use super::error::RepoError;
use super::types::LocationPatch;

/// Access to the persisted `user_locations` collection.
///
/// All operations are remote calls. None retry automatically - failure is
/// surfaced to the caller, not masked. Invariant enforcement (capacity,
/// single default) lives in the use-case layer, not here.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait LocationRepo: Send + Sync {
    /// Fetch all locations for an owner, ordered by creation time.
    async fn fetch_all(&self, owner: UserId) -> Result<Vec<SavedLocation>, RepoError>;

    /// Persist a new location and return its store-assigned ID.
    async fn create(&self, draft: &SavedLocationDraft) -> Result<LocationId, RepoError>;

    /// Apply a partial update to a single location.
    async fn update(&self, id: LocationId, patch: LocationPatch) -> Result<(), RepoError>;

    /// Delete a single location.
    async fn delete(&self, id: LocationId) -> Result<(), RepoError>;
}
