//! Observable state of a saved-locations screen session.

use mishwar_domain::SavedLocation;

use crate::infrastructure::ports::{GeoError, Position, RepoError};
use crate::use_cases::enrichment::AddressBook;

/// Progress of the device position fix.
#[derive(Debug, Clone, Default)]
pub enum PositionState {
    #[default]
    Idle,
    Acquiring,
    Ready(Position),
    Error(GeoError),
}

impl PositionState {
    pub fn position(&self) -> Option<Position> {
        match self {
            Self::Ready(position) => Some(*position),
            _ => None,
        }
    }
}

/// Progress of the saved-locations list load.
#[derive(Debug, Clone, Default)]
pub enum ListState {
    #[default]
    Loading,
    Ready(Vec<SavedLocation>),
    Error(RepoError),
}

impl ListState {
    pub fn locations(&self) -> Option<&[SavedLocation]> {
        match self {
            Self::Ready(locations) => Some(locations),
            _ => None,
        }
    }
}

/// The nested naming sub-flow for saving a new location.
#[derive(Debug, Clone, Default, PartialEq)]
pub enum NamingState {
    #[default]
    Closed,
    /// Dialog open; `error` holds the last submission failure, if any.
    Open { error: Option<String> },
    Submitting,
}

/// One observable snapshot of the whole session.
///
/// The address book is filled in by background enrichment after the list is
/// ready; renders must never wait for it.
#[derive(Debug, Clone, Default)]
pub struct SessionState {
    pub position: PositionState,
    pub list: ListState,
    pub addresses: AddressBook,
    pub naming: NamingState,
}
