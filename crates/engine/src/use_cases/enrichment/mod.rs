//! Address enrichment - best-effort display addresses for saved locations.
//!
//! Purely a display decoration layer: it never touches persisted state, and
//! no failure in here is allowed to escape to the caller.

use std::collections::HashMap;
use std::sync::Arc;

use dashmap::DashMap;
use futures_util::future::join_all;

use mishwar_domain::{LocationId, SavedLocation};

use crate::infrastructure::ports::GeocodePort;

/// Display addresses keyed by location ID, one snapshot per render.
pub type AddressBook = HashMap<LocationId, String>;

/// Resolves display addresses for a list of saved locations.
///
/// One reverse-geocode call per location, all launched concurrently and
/// independent of each other's success or failure. Results are cached by ID
/// for the lifetime of the current list; a refetch invalidates the whole
/// cache (no partial invalidation). There is no ordering guarantee among
/// results.
pub struct AddressEnrichment {
    geocode: Arc<dyn GeocodePort>,
    cache: DashMap<LocationId, String>,
}

impl AddressEnrichment {
    /// Shown for locations whose lookup failed or returned nothing.
    pub const PLACEHOLDER: &'static str = "Address unavailable";

    pub fn new(geocode: Arc<dyn GeocodePort>) -> Self {
        Self {
            geocode,
            cache: DashMap::new(),
        }
    }

    /// Drop every cached address. Called when the list is refetched.
    pub fn invalidate(&self) {
        self.cache.clear();
    }

    /// Resolve addresses for `locations`, returning a full book covering
    /// every requested ID. Failed or empty lookups map to the placeholder in
    /// the returned book but are NOT cached, so they are retried on the next
    /// pass.
    pub async fn enrich(&self, locations: &[SavedLocation]) -> AddressBook {
        let pending: Vec<&SavedLocation> = locations
            .iter()
            .filter(|l| !self.cache.contains_key(&l.id))
            .collect();

        let lookups = pending.iter().map(|l| {
            let geocode = self.geocode.clone();
            let (id, coordinates) = (l.id, l.coordinates);
            async move { (id, geocode.reverse_geocode(coordinates).await) }
        });

        for (id, result) in join_all(lookups).await {
            match result {
                Ok(Some(address)) => {
                    if let Some(line) = address.display_line() {
                        self.cache.insert(id, line);
                    } else {
                        tracing::debug!(location_id = %id, "Reverse geocode returned an empty address");
                    }
                }
                Ok(None) => {
                    tracing::debug!(location_id = %id, "Reverse geocode had no result");
                }
                Err(e) => {
                    // Absorbed: enrichment failure never blocks the list.
                    tracing::debug!(location_id = %id, error = %e, "Reverse geocode failed");
                }
            }
        }

        locations
            .iter()
            .map(|l| {
                let line = self
                    .cache
                    .get(&l.id)
                    .map(|entry| entry.value().clone())
                    .unwrap_or_else(|| Self::PLACEHOLDER.to_string());
                (l.id, line)
            })
            .collect()
    }
}
