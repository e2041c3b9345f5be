//! Mishwar Engine library.
//!
//! This crate contains the saved-location core of the Mishwar ride app.
//!
//! ## Structure
//!
//! - `infrastructure/` - External dependency implementations (ports + adapters)
//! - `use_cases/` - Saved-location operations, address enrichment, session orchestration
//! - `app` - Application composition
//! - `config` - Environment-driven configuration
//! - `logging` - Tracing setup for the hosting application

pub mod app;
pub mod config;
pub mod infrastructure;
pub mod logging;
pub mod use_cases;

pub use app::App;
pub use config::EngineConfig;
