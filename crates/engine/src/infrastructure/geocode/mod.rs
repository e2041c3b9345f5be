//! Reverse-geocoding adapter.

mod nominatim;

pub use nominatim::{NominatimClient, DEFAULT_NOMINATIM_BASE_URL};
