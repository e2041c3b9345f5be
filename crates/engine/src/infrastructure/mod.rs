//! Infrastructure implementations.
//!
//! Contains port trait implementations for external dependencies.

pub mod clock;
pub mod geocode;
pub mod ports;
pub mod rest;
