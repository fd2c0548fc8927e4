//! Application layer for wolf-tracker.
//!
//! Ties the domain model to a [`ProjectStore`](wolf_tracker_store::ProjectStore):
//! opening and saving projects, writing statistics, and loading settings.

pub mod config;
pub mod logging;
pub mod service;

// Re-exports for convenience
pub use config::TrackerConfig;
pub use logging::install_tracing;
pub use service::ProjectService;
