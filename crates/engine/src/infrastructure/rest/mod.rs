//! REST adapter for the remote `user_locations` collection.

mod location_repo;

pub use location_repo::RestLocationRepo;
