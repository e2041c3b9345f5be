//! Use cases - user story orchestration over the ports.

pub mod enrichment;
pub mod saved_locations;
pub mod session;

pub use enrichment::{AddressBook, AddressEnrichment};
pub use saved_locations::{
    CreateLocation, CreateLocationError, DeleteLocation, LoadLocations, SavedLocationUseCases,
    SetDefault,
};
pub use session::LocationSessionController;
