//! Session orchestration for the saved-locations screen.

mod controller;
mod state;

pub use controller::{LocationSessionController, SessionError};
pub use state::{ListState, NamingState, PositionState, SessionState};
