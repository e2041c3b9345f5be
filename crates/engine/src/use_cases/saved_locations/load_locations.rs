//! Load locations use case.
//!
//! Fetches the owner's list and heals the "zero defaults with a non-empty
//! list" state left behind by an interrupted default swap or a deleted
//! default: the earliest-created record is promoted deterministically.

use std::sync::Arc;

use mishwar_domain::{SavedLocation, UserId};

use crate::infrastructure::ports::{LocationPatch, LocationRepo, RepoError};

/// Fetch an owner's saved locations and repair the default invariant.
pub struct LoadLocations {
    repo: Arc<dyn LocationRepo>,
}

impl LoadLocations {
    pub fn new(repo: Arc<dyn LocationRepo>) -> Self {
        Self { repo }
    }

    /// Fetch the list, ordered by creation time.
    ///
    /// When the list is non-empty and nothing is flagged default, the
    /// earliest-created record is promoted with a remote write. A repair
    /// failure downgrades to a warning; the unrepaired list is still
    /// returned so the screen can render.
    pub async fn execute(&self, owner: UserId) -> Result<Vec<SavedLocation>, RepoError> {
        let mut locations = self.repo.fetch_all(owner).await?;

        if !locations.is_empty() && SavedLocation::default_of(&locations).is_none() {
            let earliest = SavedLocation::earliest_of(&locations)
                .map(|l| l.id)
                .unwrap_or_else(|| locations[0].id);

            match self
                .repo
                .update(earliest, LocationPatch::default_flag(true))
                .await
            {
                Ok(()) => {
                    if let Some(l) = locations.iter_mut().find(|l| l.id == earliest) {
                        l.is_default = true;
                    }
                    tracing::info!(
                        owner = %owner,
                        promoted = %earliest,
                        "Repaired missing default by promoting earliest location"
                    );
                }
                Err(e) => {
                    tracing::warn!(
                        owner = %owner,
                        error = %e,
                        "Failed to repair missing default; returning list as fetched"
                    );
                }
            }
        }

        Ok(locations)
    }
}
