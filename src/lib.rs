pub mod config;
pub mod game;
pub mod infra;
pub mod planner;
pub mod state;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types for convenience
pub use infra::{Pathfinder, Position, Route, SearchError};
pub use state::{CellKind, GridError, Map};
