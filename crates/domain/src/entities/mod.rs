//! Domain entities.

mod saved_location;

pub use saved_location::{SavedLocation, SavedLocationDraft};
