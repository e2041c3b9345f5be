//! SavedLocation entity - a named place an owner keeps for ride booking.
//!
//! Each owner keeps at most `SavedLocation::CAPACITY` locations, and at most
//! one of them is the default. The display address is deliberately NOT part
//! of this entity: it is a derived decoration resolved by the enrichment
//! layer and cached separately.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::ids::{LocationId, UserId};
use crate::value_objects::{Coordinates, LocationName};

/// A saved geographic location owned by a single user.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocation {
    pub id: LocationId,
    pub owner: UserId,
    pub name: LocationName,
    pub coordinates: Coordinates,
    /// Whether this is the owner's primary location (at most one per owner)
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl SavedLocation {
    /// Maximum number of saved locations per owner.
    pub const CAPACITY: usize = 3;

    /// Reconstruct a saved location from storage.
    pub fn from_storage(
        id: LocationId,
        owner: UserId,
        name: LocationName,
        coordinates: Coordinates,
        is_default: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            id,
            owner,
            name,
            coordinates,
            is_default,
            created_at,
        }
    }

    /// The default location of a list, if any.
    pub fn default_of(locations: &[SavedLocation]) -> Option<&SavedLocation> {
        locations.iter().find(|l| l.is_default)
    }

    /// The earliest-created location of a list, if any.
    ///
    /// Used as the deterministic choice when a default must be promoted.
    pub fn earliest_of(locations: &[SavedLocation]) -> Option<&SavedLocation> {
        locations.iter().min_by_key(|l| l.created_at)
    }

    /// Whether a list has reached the per-owner capacity.
    pub fn at_capacity(locations: &[SavedLocation]) -> bool {
        locations.len() >= Self::CAPACITY
    }
}

/// A saved location that has not yet been assigned an ID by the store.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SavedLocationDraft {
    pub owner: UserId,
    pub name: LocationName,
    pub coordinates: Coordinates,
    pub is_default: bool,
    pub created_at: DateTime<Utc>,
}

impl SavedLocationDraft {
    pub fn new(
        owner: UserId,
        name: LocationName,
        coordinates: Coordinates,
        is_default: bool,
        created_at: DateTime<Utc>,
    ) -> Self {
        Self {
            owner,
            name,
            coordinates,
            is_default,
            created_at,
        }
    }

    /// Promote this draft to a full entity with a store-assigned ID.
    pub fn into_location(self, id: LocationId) -> SavedLocation {
        SavedLocation {
            id,
            owner: self.owner,
            name: self.name,
            coordinates: self.coordinates,
            is_default: self.is_default,
            created_at: self.created_at,
        }
    }
}
