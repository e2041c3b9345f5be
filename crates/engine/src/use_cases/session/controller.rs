//! Session controller for the saved-locations screen.
//!
//! Orchestrates position acquisition, list loading, enrichment, and the
//! naming sub-flow into one observable state. The owner is an explicit
//! constructor parameter; nothing in here reads ambient session globals.

use std::sync::Arc;

use tokio::sync::watch;
use tokio_util::sync::CancellationToken;

use mishwar_domain::{Coordinates, DomainError, LocationId, SavedLocation, UserId};

use crate::infrastructure::ports::{GeoError, GeoPort, PermissionStatus, Position, RepoError};
use crate::use_cases::enrichment::AddressEnrichment;
use crate::use_cases::saved_locations::{CreateLocationError, SavedLocationUseCases};

use super::state::{ListState, NamingState, PositionState, SessionState};

/// Errors surfaced to the screen from user actions.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error("Position fix not acquired yet")]
    PositionNotReady,

    #[error("Saved locations are still loading")]
    ListNotReady,

    #[error("Saved location limit reached ({max} locations)")]
    CapacityExceeded { max: usize },

    #[error("Naming dialog is not open")]
    NamingNotOpen,

    #[error(transparent)]
    Validation(DomainError),

    #[error(transparent)]
    Repo(RepoError),
}

impl From<CreateLocationError> for SessionError {
    fn from(e: CreateLocationError) -> Self {
        match e {
            CreateLocationError::CapacityExceeded { max } => Self::CapacityExceeded { max },
            CreateLocationError::Validation(e) => Self::Validation(e),
            CreateLocationError::Repo(e) => Self::Repo(e),
        }
    }
}

/// Orchestrates one saved-locations screen session.
///
/// Construct one per screen entry; `close()` (or drop) cancels any pending
/// background enrichment so late results cannot write into a stale session.
pub struct LocationSessionController {
    owner: UserId,
    geo: Arc<dyn GeoPort>,
    locations: Arc<SavedLocationUseCases>,
    enrichment: Arc<AddressEnrichment>,
    state: watch::Sender<SessionState>,
    cancel: CancellationToken,
}

impl LocationSessionController {
    pub fn new(
        owner: UserId,
        geo: Arc<dyn GeoPort>,
        locations: Arc<SavedLocationUseCases>,
        enrichment: Arc<AddressEnrichment>,
    ) -> Self {
        let (state, _) = watch::channel(SessionState::default());
        Self {
            owner,
            geo,
            locations,
            enrichment,
            state,
            cancel: CancellationToken::new(),
        }
    }

    /// Observe session state. The receiver sees every snapshot change.
    pub fn subscribe(&self) -> watch::Receiver<SessionState> {
        self.state.subscribe()
    }

    /// Current snapshot, for callers that do not hold a receiver.
    pub fn snapshot(&self) -> SessionState {
        self.state.borrow().clone()
    }

    /// Start the session: position acquisition and list load run
    /// concurrently and do not order against each other. Returns when both
    /// have settled; enrichment continues in the background.
    pub async fn start(&self) {
        self.state.send_modify(|s| {
            s.position = PositionState::Acquiring;
            s.list = ListState::Loading;
        });

        let (position, list) = tokio::join!(
            self.acquire_position(),
            self.locations.load.execute(self.owner),
        );

        self.state.send_modify(|s| {
            s.position = match position {
                Ok(p) => PositionState::Ready(p),
                Err(e) => PositionState::Error(e),
            };
        });

        match list {
            Ok(locations) => {
                // Fresh list: the old address cache is dead.
                self.enrichment.invalidate();
                self.state.send_modify(|s| {
                    s.addresses.clear();
                    s.list = ListState::Ready(locations.clone());
                });
                self.spawn_enrichment(locations);
            }
            Err(e) => {
                tracing::warn!(owner = %self.owner, error = %e, "Failed to load saved locations");
                self.state.send_modify(|s| s.list = ListState::Error(e));
            }
        }
    }

    /// Re-prompt for permission and retry the position fix.
    pub async fn retry_position(&self) {
        self.state
            .send_modify(|s| s.position = PositionState::Acquiring);
        let position = self.acquire_position().await;
        self.state.send_modify(|s| {
            s.position = match position {
                Ok(p) => PositionState::Ready(p),
                Err(e) => PositionState::Error(e),
            };
        });
    }

    async fn acquire_position(&self) -> Result<Position, GeoError> {
        match self.geo.request_permission().await? {
            PermissionStatus::Granted => self.geo.current_position().await,
            PermissionStatus::Denied => Err(GeoError::PermissionDenied),
        }
    }

    /// Whether the "save new location" action is enabled: position fix in
    /// hand and the list loaded below capacity. Mirrors the capacity rule of
    /// the create use case so a doomed round trip is never started.
    pub fn can_save(&self) -> bool {
        let state = self.state.borrow();
        state.position.position().is_some()
            && state
                .list
                .locations()
                .is_some_and(|l| !SavedLocation::at_capacity(l))
    }

    /// Open the naming dialog for the current position.
    pub fn open_naming(&self) -> Result<(), SessionError> {
        let state = self.state.borrow();
        if state.position.position().is_none() {
            return Err(SessionError::PositionNotReady);
        }
        let locations = state.list.locations().ok_or(SessionError::ListNotReady)?;
        if SavedLocation::at_capacity(locations) {
            return Err(SessionError::CapacityExceeded {
                max: SavedLocation::CAPACITY,
            });
        }
        drop(state);

        self.state
            .send_modify(|s| s.naming = NamingState::Open { error: None });
        Ok(())
    }

    /// Dismiss the naming dialog without saving.
    pub fn cancel_naming(&self) {
        self.state.send_modify(|s| s.naming = NamingState::Closed);
    }

    /// Submit the naming dialog.
    ///
    /// Empty or whitespace-only names are rejected locally before any
    /// network call; the dialog stays open with the error retained. On
    /// repository failure the dialog also stays open; on success it closes
    /// and the new location is appended to the rendered list.
    pub async fn submit_name(&self, name: &str) -> Result<SavedLocation, SessionError> {
        let (position, current) = {
            let state = self.state.borrow();
            if !matches!(state.naming, NamingState::Open { .. }) {
                return Err(SessionError::NamingNotOpen);
            }
            let position = state
                .position
                .position()
                .ok_or(SessionError::PositionNotReady)?;
            let current = state
                .list
                .locations()
                .ok_or(SessionError::ListNotReady)?
                .to_vec();
            (position, current)
        };

        // Local validation before any network call.
        if name.trim().is_empty() {
            let error = DomainError::validation("Location name cannot be empty");
            self.state.send_modify(|s| {
                s.naming = NamingState::Open {
                    error: Some(error.to_string()),
                }
            });
            return Err(SessionError::Validation(error));
        }

        let coordinates = Coordinates::new(position.latitude, position.longitude)
            .map_err(SessionError::Validation)?;

        self.state
            .send_modify(|s| s.naming = NamingState::Submitting);

        match self
            .locations
            .create
            .execute(self.owner, name, coordinates, &current)
            .await
        {
            Ok(location) => {
                let mut updated = current;
                updated.push(location.clone());
                self.state.send_modify(|s| {
                    s.naming = NamingState::Closed;
                    s.list = ListState::Ready(updated.clone());
                });
                self.spawn_enrichment(updated);
                Ok(location)
            }
            Err(e) => {
                let error = SessionError::from(e);
                self.state.send_modify(|s| {
                    s.naming = NamingState::Open {
                        error: Some(error.to_string()),
                    }
                });
                Err(error)
            }
        }
    }

    /// Make `id` the default location. Re-renders from the updated
    /// in-memory records; no refetch.
    pub async fn set_default(&self, id: LocationId) -> Result<(), SessionError> {
        let current = self.current_list()?;
        let updated = self
            .locations
            .set_default
            .execute(id, &current)
            .await
            .map_err(SessionError::Repo)?;
        self.state
            .send_modify(|s| s.list = ListState::Ready(updated));
        Ok(())
    }

    /// Delete `id`. The host UI runs its confirmation step before calling
    /// this. Re-renders from the updated in-memory records; no refetch, and
    /// no default promotion until the next fetch.
    pub async fn delete(&self, id: LocationId) -> Result<(), SessionError> {
        let current = self.current_list()?;
        let updated = self
            .locations
            .delete
            .execute(id, &current)
            .await
            .map_err(SessionError::Repo)?;
        self.state.send_modify(|s| {
            // An in-flight enrichment may still hold this ID; the orphaned
            // entry is harmless because renders go through the list.
            s.addresses.remove(&id);
            s.list = ListState::Ready(updated);
        });
        Ok(())
    }

    /// Tear down the session, cancelling pending background enrichment.
    pub fn close(&self) {
        self.cancel.cancel();
    }

    fn current_list(&self) -> Result<Vec<SavedLocation>, SessionError> {
        self.state
            .borrow()
            .list
            .locations()
            .map(<[SavedLocation]>::to_vec)
            .ok_or(SessionError::ListNotReady)
    }

    /// Fire-and-forget address fill, scoped to this controller's lifetime.
    fn spawn_enrichment(&self, locations: Vec<SavedLocation>) {
        let enrichment = self.enrichment.clone();
        let state = self.state.clone();
        let cancel = self.cancel.clone();
        tokio::spawn(async move {
            tokio::select! {
                () = cancel.cancelled() => {
                    tracing::debug!("Session closed; dropping pending enrichment");
                }
                book = enrichment.enrich(&locations) => {
                    state.send_modify(|s| s.addresses = book);
                }
            }
        });
    }
}

impl Drop for LocationSessionController {
    fn drop(&mut self) {
        self.cancel.cancel();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::time::Duration;

    use chrono::{TimeZone, Utc};
    use mishwar_domain::LocationName;
    use mockall::predicate::*;

    use crate::infrastructure::ports::{
        Address, ClockPort, MockGeoPort, MockGeocodePort, MockLocationRepo,
    };
    use crate::use_cases::saved_locations::{
        CreateLocation, DeleteLocation, LoadLocations, SetDefault,
    };

    struct FixedClock(chrono::DateTime<Utc>);

    impl ClockPort for FixedClock {
        fn now(&self) -> chrono::DateTime<Utc> {
            self.0
        }
    }

    fn use_cases(repo: MockLocationRepo) -> Arc<SavedLocationUseCases> {
        let repo: Arc<dyn crate::infrastructure::ports::LocationRepo> = Arc::new(repo);
        let clock = Arc::new(FixedClock(
            Utc.with_ymd_and_hms(2025, 3, 10, 9, 0, 0).unwrap(),
        ));
        Arc::new(SavedLocationUseCases::new(
            Arc::new(CreateLocation::new(repo.clone(), clock)),
            Arc::new(SetDefault::new(repo.clone())),
            Arc::new(DeleteLocation::new(repo.clone())),
            Arc::new(LoadLocations::new(repo)),
        ))
    }

    fn granted_geo() -> MockGeoPort {
        let mut geo = MockGeoPort::new();
        geo.expect_request_permission()
            .returning(|| Ok(PermissionStatus::Granted));
        geo.expect_current_position().returning(|| {
            Ok(Position {
                latitude: 24.70,
                longitude: 46.60,
            })
        });
        geo
    }

    fn enrichment_with(geocode: MockGeocodePort) -> Arc<AddressEnrichment> {
        Arc::new(AddressEnrichment::new(Arc::new(geocode)))
    }

    fn silent_geocode() -> MockGeocodePort {
        let mut geocode = MockGeocodePort::new();
        geocode.expect_reverse_geocode().returning(|_| Ok(None));
        geocode
    }

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

    async fn settled_addresses(
        rx: &mut watch::Receiver<SessionState>,
    ) -> crate::use_cases::enrichment::AddressBook {
        // Enrichment runs on a spawned task; wait for the address snapshot.
        tokio::time::timeout(Duration::from_secs(1), async {
            loop {
                if !rx.borrow().addresses.is_empty() {
                    return rx.borrow().addresses.clone();
                }
                rx.changed().await.unwrap();
            }
        })
        .await
        .expect("enrichment did not settle")
    }

    #[tokio::test]
    async fn start_resolves_position_and_list_concurrently() {
        let owner = UserId::new();
        let list = vec![location(owner, "Home", true, 1)];
        let fetched = list.clone();

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .with(eq(owner))
            .returning(move |_| Ok(fetched.clone()));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(silent_geocode()),
        );
        controller.start().await;

        let state = controller.snapshot();
        assert!(matches!(state.position, PositionState::Ready(_)));
        assert!(matches!(&state.list, ListState::Ready(l) if l.len() == 1));
        assert!(controller.can_save());
    }

    #[tokio::test]
    async fn permission_denied_surfaces_as_position_error() {
        let owner = UserId::new();
        let mut geo = MockGeoPort::new();
        geo.expect_request_permission()
            .returning(|| Ok(PermissionStatus::Denied));

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all().returning(|_| Ok(Vec::new()));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(geo),
            use_cases(repo),
            enrichment_with(MockGeocodePort::new()),
        );
        controller.start().await;

        let state = controller.snapshot();
        assert!(matches!(
            state.position,
            PositionState::Error(GeoError::PermissionDenied)
        ));
        // The list still loaded; the two flows do not order against each other.
        assert!(matches!(state.list, ListState::Ready(_)));
        assert!(!controller.can_save());
    }

    #[tokio::test]
    async fn list_failure_surfaces_without_blocking_position() {
        let owner = UserId::new();
        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .returning(|_| Err(RepoError::transport("fetch_all", "connection refused")));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(MockGeocodePort::new()),
        );
        controller.start().await;

        let state = controller.snapshot();
        assert!(matches!(state.position, PositionState::Ready(_)));
        assert!(matches!(state.list, ListState::Error(_)));
    }

    #[tokio::test]
    async fn enrichment_fills_addresses_in_the_background() {
        let owner = UserId::new();
        let list = vec![location(owner, "Home", true, 1)];
        let fetched = list.clone();

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .returning(move |_| Ok(fetched.clone()));

        let mut geocode = MockGeocodePort::new();
        geocode.expect_reverse_geocode().returning(|_| {
            Ok(Some(Address {
                road: Some("King Fahd Rd".into()),
                district: None,
                city: Some("Riyadh".into()),
                country: None,
            }))
        });

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(geocode),
        );
        let mut rx = controller.subscribe();
        controller.start().await;

        let addresses = settled_addresses(&mut rx).await;
        assert_eq!(addresses[&list[0].id], "King Fahd Rd, Riyadh");
    }

    #[tokio::test]
    async fn empty_name_submit_makes_no_repository_call() {
        let owner = UserId::new();
        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all().returning(|_| Ok(Vec::new()));
        // No create expectation: a create call would panic.

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(MockGeocodePort::new()),
        );
        controller.start().await;
        controller.open_naming().unwrap();

        let err = controller.submit_name("   ").await.unwrap_err();
        assert!(matches!(err, SessionError::Validation(_)));
        assert!(matches!(
            controller.snapshot().naming,
            NamingState::Open { error: Some(_) }
        ));
    }

    #[tokio::test]
    async fn successful_submit_closes_the_dialog_and_appends() {
        let owner = UserId::new();
        let id = LocationId::new();

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all().returning(|_| Ok(Vec::new()));
        repo.expect_create().returning(move |_| Ok(id));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(silent_geocode()),
        );
        controller.start().await;
        controller.open_naming().unwrap();

        let created = controller.submit_name("Home").await.unwrap();
        assert_eq!(created.id, id);
        assert!(created.is_default); // first record for the owner

        let state = controller.snapshot();
        assert_eq!(state.naming, NamingState::Closed);
        assert!(matches!(&state.list, ListState::Ready(l) if l.len() == 1));
    }

    #[tokio::test]
    async fn failed_submit_keeps_the_dialog_open() {
        let owner = UserId::new();
        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all().returning(|_| Ok(Vec::new()));
        repo.expect_create()
            .returning(|_| Err(RepoError::store("create", "503 Service Unavailable")));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(MockGeocodePort::new()),
        );
        controller.start().await;
        controller.open_naming().unwrap();

        let err = controller.submit_name("Home").await.unwrap_err();
        assert!(matches!(err, SessionError::Repo(_)));
        assert!(matches!(
            controller.snapshot().naming,
            NamingState::Open { error: Some(_) }
        ));
    }

    #[tokio::test]
    async fn open_naming_is_blocked_at_capacity() {
        let owner = UserId::new();
        let list = vec![
            location(owner, "Home", true, 1),
            location(owner, "Work", false, 2),
            location(owner, "Gym", false, 3),
        ];
        let fetched = list.clone();

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .returning(move |_| Ok(fetched.clone()));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(silent_geocode()),
        );
        controller.start().await;

        assert!(!controller.can_save());
        assert!(matches!(
            controller.open_naming().unwrap_err(),
            SessionError::CapacityExceeded { max: 3 }
        ));
    }

    #[tokio::test]
    async fn set_default_rerenders_without_refetch() {
        let owner = UserId::new();
        let home = location(owner, "Home", true, 1);
        let work = location(owner, "Work", false, 2);
        let work_id = work.id;
        let fetched = vec![home.clone(), work.clone()];

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .times(1) // start() only; set_default must not refetch
            .returning(move |_| Ok(fetched.clone()));
        repo.expect_update().times(2).returning(|_, _| Ok(()));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(silent_geocode()),
        );
        controller.start().await;
        controller.set_default(work_id).await.unwrap();

        let state = controller.snapshot();
        let list = state.list.locations().unwrap();
        assert_eq!(list.iter().filter(|l| l.is_default).count(), 1);
        assert!(list.iter().find(|l| l.id == work_id).unwrap().is_default);
    }

    #[tokio::test]
    async fn delete_drops_the_record_and_its_address() {
        let owner = UserId::new();
        let home = location(owner, "Home", true, 1);
        let work = location(owner, "Work", false, 2);
        let work_id = work.id;
        let fetched = vec![home.clone(), work.clone()];

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .returning(move |_| Ok(fetched.clone()));
        repo.expect_delete()
            .with(eq(work_id))
            .returning(|_| Ok(()));

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            enrichment_with(silent_geocode()),
        );
        controller.start().await;
        controller.delete(work_id).await.unwrap();

        let state = controller.snapshot();
        let list = state.list.locations().unwrap();
        assert_eq!(list.len(), 1);
        assert!(!state.addresses.contains_key(&work_id));
    }

    #[tokio::test]
    async fn close_cancels_pending_enrichment() {
        let owner = UserId::new();
        let list = vec![location(owner, "Home", true, 1)];
        let fetched = list.clone();

        let mut repo = MockLocationRepo::new();
        repo.expect_fetch_all()
            .returning(move |_| Ok(fetched.clone()));

        // A geocode lookup that outlives the session.
        struct SlowGeocode;

        #[async_trait::async_trait]
        impl crate::infrastructure::ports::GeocodePort for SlowGeocode {
            async fn reverse_geocode(
                &self,
                _coordinates: Coordinates,
            ) -> Result<Option<Address>, crate::infrastructure::ports::GeocodeError> {
                tokio::time::sleep(Duration::from_secs(60)).await;
                Ok(Some(Address::default()))
            }
        }

        let controller = LocationSessionController::new(
            owner,
            Arc::new(granted_geo()),
            use_cases(repo),
            Arc::new(AddressEnrichment::new(Arc::new(SlowGeocode))),
        );
        controller.start().await;
        controller.close();

        // Give the cancelled task a chance to wind down; no address may land.
        tokio::time::sleep(Duration::from_millis(50)).await;
        assert!(controller.snapshot().addresses.is_empty());
    }
}
