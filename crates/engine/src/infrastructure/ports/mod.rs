//! Port traits for infrastructure boundaries.
//!
//! These are the ONLY abstractions in the engine. Everything else is concrete
//! types. Ports exist for:
//! - The remote location store (could swap REST -> gRPC/local cache)
//! - Device GPS (owned by the hosting app, injected here)
//! - Reverse geocoding (could swap Nominatim -> Google)
//! - Clock (for testing)

mod error;
mod external;
mod repos;
mod testing;
mod types;

pub use error::{GeoError, GeocodeError, RepoError};
pub use external::{Address, GeoPort, GeocodePort, PermissionStatus, Position};
pub use repos::LocationRepo;
pub use testing::ClockPort;
pub use types::LocationPatch;

#[cfg(test)]
pub use external::{MockGeoPort, MockGeocodePort};
#[cfg(test)]
pub use repos::MockLocationRepo;
#[cfg(test)]
pub use testing::MockClockPort;
