//! Application state and composition.

use std::sync::Arc;

use mishwar_domain::UserId;

use crate::config::EngineConfig;
use crate::infrastructure::clock::SystemClock;
use crate::infrastructure::geocode::NominatimClient;
use crate::infrastructure::ports::{ClockPort, GeoPort, GeocodePort, LocationRepo};
use crate::infrastructure::rest::RestLocationRepo;
use crate::use_cases::enrichment::AddressEnrichment;
use crate::use_cases::saved_locations::{
    CreateLocation, DeleteLocation, LoadLocations, SavedLocationUseCases, SetDefault,
};
use crate::use_cases::session::LocationSessionController;

/// Main application state.
///
/// Holds the wired use cases; the hosting app constructs one `App` and asks
/// it for a session controller per screen entry. Device GPS is injected by
/// the host - the engine ships no adapter for it.
pub struct App {
    geo: Arc<dyn GeoPort>,
    geocode: Arc<dyn GeocodePort>,
    locations: Arc<SavedLocationUseCases>,
}

impl App {
    /// Create an App against the configured remote services.
    pub fn new(config: &EngineConfig, geo: Arc<dyn GeoPort>) -> Self {
        let repo: Arc<dyn LocationRepo> = Arc::new(RestLocationRepo::new(
            &config.api_url,
            config.api_key.clone(),
            config.http_timeout,
        ));
        let geocode: Arc<dyn GeocodePort> =
            Arc::new(NominatimClient::new(&config.geocode_url, config.http_timeout));
        Self::with_ports(geo, repo, geocode, Arc::new(SystemClock::new()))
    }

    /// Create an App from explicit ports. Used by the host when it brings
    /// its own store client, and by integration tests.
    pub fn with_ports(
        geo: Arc<dyn GeoPort>,
        repo: Arc<dyn LocationRepo>,
        geocode: Arc<dyn GeocodePort>,
        clock: Arc<dyn ClockPort>,
    ) -> Self {
        let locations = Arc::new(SavedLocationUseCases::new(
            Arc::new(CreateLocation::new(repo.clone(), clock)),
            Arc::new(SetDefault::new(repo.clone())),
            Arc::new(DeleteLocation::new(repo.clone())),
            Arc::new(LoadLocations::new(repo)),
        ));

        Self {
            geo,
            geocode,
            locations,
        }
    }

    /// Saved-location operations, for callers outside a screen session.
    pub fn locations(&self) -> Arc<SavedLocationUseCases> {
        self.locations.clone()
    }

    /// Build a session controller for one saved-locations screen entry.
    ///
    /// The owner is threaded through explicitly; the controller never reads
    /// an ambient "current user". Each session gets its own address cache,
    /// scoped to the list it displays.
    pub fn session(&self, owner: UserId) -> LocationSessionController {
        LocationSessionController::new(
            owner,
            self.geo.clone(),
            self.locations.clone(),
            Arc::new(AddressEnrichment::new(self.geocode.clone())),
        )
    }
}
