pub mod entities;
pub mod error;
pub mod ids;
pub mod value_objects;

pub use entities::{SavedLocation, SavedLocationDraft};
pub use error::DomainError;
pub use ids::{LocationId, UserId};
pub use value_objects::{Coordinates, LocationName};
