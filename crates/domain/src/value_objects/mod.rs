//! Value objects - validated-by-construction wrappers over primitive data.

mod geo;
mod names;

pub use geo::Coordinates;
pub use names::LocationName;
