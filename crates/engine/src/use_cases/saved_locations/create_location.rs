//! Create location use case.
//!
//! Persists a new saved location while honoring the per-owner capacity and
//! the first-record-is-default rule.

use std::sync::Arc;

use mishwar_domain::{
    Coordinates, DomainError, LocationName, SavedLocation, SavedLocationDraft, UserId,
};

use crate::infrastructure::ports::{ClockPort, LocationRepo, RepoError};

/// Errors from creating a saved location.
#[derive(Debug, thiserror::Error)]
pub enum CreateLocationError {
    /// The owner already has the maximum number of saved locations.
    #[error("Saved location limit reached ({max} locations)")]
    CapacityExceeded { max: usize },

    /// The name failed local validation; no repository call was made.
    #[error(transparent)]
    Validation(#[from] DomainError),

    #[error(transparent)]
    Repo(#[from] RepoError),
}

/// Create a saved location for an owner.
///
/// Capacity is checked against the caller's last known list, not refetched;
/// callers are expected to hold a fresh list. The first location an owner
/// ever saves is created as the default.
pub struct CreateLocation {
    repo: Arc<dyn LocationRepo>,
    clock: Arc<dyn ClockPort>,
}

impl CreateLocation {
    pub fn new(repo: Arc<dyn LocationRepo>, clock: Arc<dyn ClockPort>) -> Self {
        Self { repo, clock }
    }

    /// # Arguments
    /// * `owner` - Owner of the new location
    /// * `name` - User-supplied name, validated (non-empty after trimming)
    /// * `coordinates` - Validated position the location pins
    /// * `current` - The owner's last known list
    pub async fn execute(
        &self,
        owner: UserId,
        name: &str,
        coordinates: Coordinates,
        current: &[SavedLocation],
    ) -> Result<SavedLocation, CreateLocationError> {
        if SavedLocation::at_capacity(current) {
            return Err(CreateLocationError::CapacityExceeded {
                max: SavedLocation::CAPACITY,
            });
        }

        // Local validation happens before any network call.
        let name = LocationName::new(name)?;
        let is_default = current.is_empty();

        let draft = SavedLocationDraft::new(owner, name, coordinates, is_default, self.clock.now());
        let id = self.repo.create(&draft).await?;

        tracing::info!(
            location_id = %id,
            owner = %owner,
            is_default,
            "Saved new location"
        );
        Ok(draft.into_location(id))
    }
}
