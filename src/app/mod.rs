//! Application-level modules for the forest viewer.
//!
//! Holds the centralized state and the coordinator that applies panel
//! interactions and load results to it.

mod app_state;
mod application_coordinator;

pub use app_state::{AppState, ForestSource};
pub use application_coordinator::ApplicationCoordinator;
