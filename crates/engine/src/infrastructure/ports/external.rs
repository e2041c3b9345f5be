//! External service port traits (device GPS, reverse geocoding).

use async_trait::async_trait;
use mishwar_domain::Coordinates;

use super::error::{GeoError, GeocodeError};

// =============================================================================
// Device GPS
// =============================================================================

/// Outcome of a location permission prompt.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PermissionStatus {
    Granted,
    Denied,
}

/// A raw position fix from the device.
///
/// Unvalidated on purpose: this is what the platform hands us. It is promoted
/// to [`Coordinates`] (and validated) the moment it enters the domain.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
}

/// Device GPS access. Implemented by the hosting application; the engine
/// ships no adapter for it.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeoPort: Send + Sync {
    /// Prompt for (or query) location permission.
    async fn request_permission(&self) -> Result<PermissionStatus, GeoError>;

    /// Obtain the current device position. Callers must have confirmed
    /// permission first; implementations fail with `PermissionDenied`
    /// otherwise.
    async fn current_position(&self) -> Result<Position, GeoError>;
}

// =============================================================================
// Reverse Geocoding
// =============================================================================

/// Structured address components from a reverse-geocode lookup.
///
/// All components are optional - providers return whatever they know.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Address {
    pub road: Option<String>,
    pub district: Option<String>,
    pub city: Option<String>,
    pub country: Option<String>,
}

impl Address {
    /// Single display line, most specific component first.
    ///
    /// Returns `None` when every component is missing.
    pub fn display_line(&self) -> Option<String> {
        let parts: Vec<&str> = [
            self.road.as_deref(),
            self.district.as_deref(),
            self.city.as_deref(),
            self.country.as_deref(),
        ]
        .into_iter()
        .flatten()
        .filter(|p| !p.trim().is_empty())
        .collect();

        if parts.is_empty() {
            None
        } else {
            Some(parts.join(", "))
        }
    }
}

/// Reverse geocoding. `Ok(None)` means the provider had nothing for these
/// coordinates - that is not an error.
#[cfg_attr(test, mockall::automock)]
#[async_trait]
pub trait GeocodePort: Send + Sync {
    async fn reverse_geocode(
        &self,
        coordinates: Coordinates,
    ) -> Result<Option<Address>, GeocodeError>;
}
