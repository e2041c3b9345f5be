//! Data types shared across port boundaries.

use mishwar_domain::LocationName;

/// Partial update for a saved location.
///
/// `None` fields are left untouched by the store.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct LocationPatch {
    pub name: Option<LocationName>,
    pub is_default: Option<bool>,
}

impl LocationPatch {
    /// Patch that only flips the default flag.
    pub fn default_flag(is_default: bool) -> Self {
        Self {
            name: None,
            is_default: Some(is_default),
        }
    }

    /// Patch that only renames the location.
    pub fn rename(name: LocationName) -> Self {
        Self {
            name: Some(name),
            is_default: None,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.is_default.is_none()
    }
}
