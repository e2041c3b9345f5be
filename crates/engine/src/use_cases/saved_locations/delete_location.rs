//! Delete location use case.
//!
//! Deleting the default does NOT promote another record in the same
//! operation; the owner temporarily has no default and the next
//! `LoadLocations` promotes the earliest-created survivor. Keeping the
//! delete to a single remote write avoids a second unguarded mutation in
//! the same user action.

use std::sync::Arc;

use mishwar_domain::{LocationId, SavedLocation};

use crate::infrastructure::ports::{LocationRepo, RepoError};

/// Delete a saved location.
pub struct DeleteLocation {
    repo: Arc<dyn LocationRepo>,
}

impl DeleteLocation {
    pub fn new(repo: Arc<dyn LocationRepo>) -> Self {
        Self { repo }
    }

    /// # Arguments
    /// * `id` - The location to delete
    /// * `current` - The owner's last known list
    ///
    /// # Returns
    /// The list without the deleted record, ready to re-render without a
    /// refetch.
    pub async fn execute(
        &self,
        id: LocationId,
        current: &[SavedLocation],
    ) -> Result<Vec<SavedLocation>, RepoError> {
        self.repo.delete(id).await?;

        let was_default = current.iter().any(|l| l.id == id && l.is_default);
        let remaining: Vec<SavedLocation> =
            current.iter().filter(|l| l.id != id).cloned().collect();

        if was_default && !remaining.is_empty() {
            tracing::info!(
                deleted = %id,
                "Deleted the default location; a new default will be promoted on next fetch"
            );
        }

        Ok(remaining)
    }
}
