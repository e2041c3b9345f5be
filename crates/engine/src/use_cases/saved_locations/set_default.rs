//! Set default use case.
//!
//! The swap is two independent remote writes: demote the old default, then
//! promote the target. The store offers no multi-record atomicity, so a
//! promote failure after a successful demote leaves the owner with zero
//! defaults. That window is deliberately surfaced (not masked); the next
//! `LoadLocations` heals it.

use std::sync::Arc;

use mishwar_domain::{LocationId, SavedLocation};

use crate::infrastructure::ports::{LocationPatch, LocationRepo, RepoError};

/// Make one saved location the owner's default.
pub struct SetDefault {
    repo: Arc<dyn LocationRepo>,
}

impl SetDefault {
    pub fn new(repo: Arc<dyn LocationRepo>) -> Self {
        Self { repo }
    }

    /// Swap the default flag to `target`.
    ///
    /// # Arguments
    /// * `target` - The location to promote
    /// * `current` - The owner's last known list
    ///
    /// # Returns
    /// The list with the flags flipped in memory, ready to re-render without
    /// a refetch.
    pub async fn execute(
        &self,
        target: LocationId,
        current: &[SavedLocation],
    ) -> Result<Vec<SavedLocation>, RepoError> {
        if !current.iter().any(|l| l.id == target) {
            return Err(RepoError::not_found(target));
        }

        let previous = SavedLocation::default_of(current).map(|l| l.id);
        if previous == Some(target) {
            // Already the default; both writes would be no-ops.
            return Ok(current.to_vec());
        }

        // Step 1: demote the old default, if any.
        if let Some(previous_id) = previous {
            self.repo
                .update(previous_id, LocationPatch::default_flag(false))
                .await?;
        }

        // Step 2: promote the target. Failing here after step 1 succeeded
        // leaves zero defaults until the next fetch repairs it.
        if let Err(e) = self
            .repo
            .update(target, LocationPatch::default_flag(true))
            .await
        {
            tracing::warn!(
                target = %target,
                error = %e,
                "Default promotion failed after demotion; owner has no default until next fetch"
            );
            return Err(e);
        }

        let updated = current
            .iter()
            .cloned()
            .map(|mut l| {
                l.is_default = l.id == target;
                l
            })
            .collect();
        Ok(updated)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};
    use mishwar_domain::{Coordinates, LocationName, UserId};
    use mockall::predicate::*;

    use crate::infrastructure::ports::MockLocationRepo;

    fn location(owner: UserId, name: &str, is_default: bool, day: u32) -> SavedLocation {
        SavedLocation::from_storage(
            LocationId::new(),
            owner,
            LocationName::new(name).unwrap(),
            Coordinates::new(24.70, 46.60).unwrap(),
            is_default,
            Utc.with_ymd_and_hms(2025, 3, day, 12, 0, 0).unwrap(),
        )
    }

    #[tokio::test]
    async fn swaps_default_with_two_writes() {
        let owner = UserId::new();
        let home = location(owner, "Home", true, 1);
        let work = location(owner, "Work", false, 2);
        let (home_id, work_id) = (home.id, work.id);

        let mut repo = MockLocationRepo::new();
        repo.expect_update()
            .with(eq(home_id), eq(LocationPatch::default_flag(false)))
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_update()
            .with(eq(work_id), eq(LocationPatch::default_flag(true)))
            .times(1)
            .returning(|_, _| Ok(()));

        let use_case = SetDefault::new(Arc::new(repo));
        let updated = use_case.execute(work_id, &[home, work]).await.unwrap();

        let defaults: Vec<_> = updated.iter().filter(|l| l.is_default).collect();
        assert_eq!(defaults.len(), 1);
        assert_eq!(defaults[0].id, work_id);
    }

    #[tokio::test]
    async fn setting_the_current_default_makes_no_writes() {
        let owner = UserId::new();
        let home = location(owner, "Home", true, 1);
        let home_id = home.id;

        let repo = MockLocationRepo::new(); // no expectations
        let use_case = SetDefault::new(Arc::new(repo));
        let updated = use_case.execute(home_id, &[home]).await.unwrap();

        assert!(updated[0].is_default);
    }

    #[tokio::test]
    async fn unknown_target_fails_before_any_write() {
        let owner = UserId::new();
        let home = location(owner, "Home", true, 1);

        let repo = MockLocationRepo::new();
        let use_case = SetDefault::new(Arc::new(repo));
        let err = use_case
            .execute(LocationId::new(), &[home])
            .await
            .unwrap_err();

        assert!(err.is_not_found());
    }

    #[tokio::test]
    async fn promote_failure_after_demote_is_surfaced() {
        let owner = UserId::new();
        let home = location(owner, "Home", true, 1);
        let work = location(owner, "Work", false, 2);
        let (home_id, work_id) = (home.id, work.id);

        let mut repo = MockLocationRepo::new();
        repo.expect_update()
            .with(eq(home_id), eq(LocationPatch::default_flag(false)))
            .times(1)
            .returning(|_, _| Ok(()));
        repo.expect_update()
            .with(eq(work_id), eq(LocationPatch::default_flag(true)))
            .times(1)
            .returning(|_, _| Err(RepoError::store("update", "500 Internal Server Error")));

        let use_case = SetDefault::new(Arc::new(repo));
        let err = use_case.execute(work_id, &[home, work]).await.unwrap_err();

        assert!(matches!(err, RepoError::Store { .. }));
    }
}
