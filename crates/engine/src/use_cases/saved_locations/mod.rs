//! Saved-location use cases.
//!
//! These wrap the raw `LocationRepo` port and are the only code paths that
//! mutate the collection, so the capacity and single-default invariants are
//! enforced here rather than in the store.

mod create_location;
mod delete_location;
mod load_locations;
mod set_default;

pub use create_location::{CreateLocation, CreateLocationError};
pub use delete_location::DeleteLocation;
pub use load_locations::LoadLocations;
pub use set_default::SetDefault;

use std::sync::Arc;

/// Container for saved-location use cases.
pub struct SavedLocationUseCases {
    pub create: Arc<CreateLocation>,
    pub set_default: Arc<SetDefault>,
    pub delete: Arc<DeleteLocation>,
    pub load: Arc<LoadLocations>,
}

impl SavedLocationUseCases {
    pub fn new(
        create: Arc<CreateLocation>,
        set_default: Arc<SetDefault>,
        delete: Arc<DeleteLocation>,
        load: Arc<LoadLocations>,
    ) -> Self {
        Self {
            create,
            set_default,
            delete,
            load,
        }
    }
}
